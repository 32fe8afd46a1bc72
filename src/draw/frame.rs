//! Diagram container holding the named shapes selected for output.

use super::shape::{Drawable, Shape};
use crate::config::RenderOrder;
use log::warn;

/// A shape together with the name it was bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub shape: Shape,
}

/// Shapes collected for rendering, in binding order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    entries: Vec<Entry>,
}

impl Diagram {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Collects every binding whose name does not start with `_`.
    pub fn from_bindings<I, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, Shape)>,
        S: Into<String>,
    {
        let mut diagram = Self::new();
        for (name, shape) in bindings {
            diagram.add_shape(name, shape);
        }
        diagram
    }

    /// Adds a named shape on top. Names starting with `_` are skipped.
    ///
    /// Returns `true` if the shape was added.
    pub fn add_shape(&mut self, name: impl Into<String>, shape: Shape) -> bool {
        let name = name.into();
        if name.starts_with('_') {
            return false;
        }
        self.entries.push(Entry { name, shape });
        true
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in output order.
    ///
    /// [`RenderOrder::Binding`] keeps binding order even when it disagrees with
    /// z; the disagreement is logged. [`RenderOrder::ZOrder`] sorts ascending by
    /// z, keeping binding order between equal z values.
    pub fn ordered(&self, order: RenderOrder) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        match order {
            RenderOrder::Binding => {
                if !self.is_z_sorted() {
                    warn!("Binding order differs from z order; rendering in binding order");
                }
            }
            RenderOrder::ZOrder => entries.sort_by_key(|entry| entry.shape.z()),
        }
        entries
    }

    fn is_z_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].shape.z() <= pair[1].shape.z())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Polygon, Style};

    fn rect_with_z(z: u64) -> Shape {
        Polygon::rect(0.0, 0.0, 1.0, 1.0, z, Style::default())
            .unwrap()
            .into()
    }

    #[test]
    fn underscore_names_are_excluded() {
        let diagram = Diagram::from_bindings([
            ("visible", rect_with_z(1)),
            ("_hidden", rect_with_z(2)),
        ]);
        assert_eq!(diagram.len(), 1);
        assert_eq!(diagram.entries()[0].name, "visible");
    }

    #[test]
    fn binding_order_is_kept_by_default() {
        let diagram = Diagram::from_bindings([("b", rect_with_z(2)), ("a", rect_with_z(1))]);
        let names: Vec<&str> = diagram
            .ordered(RenderOrder::Binding)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn z_order_sorts_stably() {
        let diagram = Diagram::from_bindings([
            ("c", rect_with_z(3)),
            ("a", rect_with_z(1)),
            ("copy_of_a", rect_with_z(1)),
        ]);
        let names: Vec<&str> = diagram
            .ordered(RenderOrder::ZOrder)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["a", "copy_of_a", "c"]);
    }
}
