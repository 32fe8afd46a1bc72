//! Union and difference of drawable shapes.
//!
//! Operands are converted with [`Drawable::to_polygon`] first. The result is a
//! new [`Polygon`] that inherits the first operand's offset, style and z; the
//! operands themselves are never modified. Both operations fail only when an
//! operand lies outside the clipping grid.

use super::shape::{Drawable, Polygon};
use crate::error::GeometryError;
use crate::geometry::Clipper;
use crate::geometry::clip::Operand;
use log::debug;

/// Returns `x` minus `y` using the default grid resolution.
pub fn subtract(x: &dyn Drawable, y: &dyn Drawable) -> Result<Polygon, GeometryError> {
    subtract_with(&Clipper::default(), x, y)
}

/// Returns the union of `start` and every shape in `rest`, using the default grid resolution.
pub fn add(start: &dyn Drawable, rest: &[&dyn Drawable]) -> Result<Polygon, GeometryError> {
    add_with(&Clipper::default(), start, rest)
}

pub fn subtract_with(
    clipper: &Clipper,
    x: &dyn Drawable,
    y: &dyn Drawable,
) -> Result<Polygon, GeometryError> {
    let subject = x.to_polygon();
    let clip = y.to_polygon();
    let (dx, dy) = relative_offset(&subject, &clip);

    let rings = clipper.difference(
        Operand::new(subject.rings(), 0.0, 0.0),
        Operand::new(clip.rings(), dx, dy),
    )?;
    debug!(
        "subtract: {} ring(s) minus {} ring(s) -> {} ring(s)",
        subject.rings().len(),
        clip.rings().len(),
        rings.len()
    );
    Ok(Polygon::derived(rings, &subject))
}

/// Folds pairwise unions left to right: `((start + a) + b) + ...`.
pub fn add_with(
    clipper: &Clipper,
    start: &dyn Drawable,
    rest: &[&dyn Drawable],
) -> Result<Polygon, GeometryError> {
    let subject = start.to_polygon();
    let others: Vec<Polygon> = rest.iter().map(|shape| shape.to_polygon()).collect();
    let operands: Vec<Operand<'_>> = others
        .iter()
        .map(|other| {
            let (dx, dy) = relative_offset(&subject, other);
            Operand::new(other.rings(), dx, dy)
        })
        .collect();

    let rings = clipper.union(Operand::new(subject.rings(), 0.0, 0.0), &operands)?;
    debug!(
        "add: {} operand(s) -> {} ring(s)",
        operands.len() + 1,
        rings.len()
    );
    Ok(Polygon::derived(rings, &subject))
}

/// Offset that brings `other` into `base`'s coordinate frame.
fn relative_offset(base: &Polygon, other: &Polygon) -> (f64, f64) {
    (other.ref_x - base.ref_x, other.ref_y - base.ref_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Circle, Style};
    use crate::geometry::Point;

    fn square(x: f64, y: f64, size: f64, z: u64) -> Polygon {
        Polygon::rect(x, y, size, size, z, Style::default()).unwrap()
    }

    /// Approximate even-odd area by sampling a grid of cell centers.
    fn sampled_area(polygon: &Polygon, step: f64, extent: f64) -> usize {
        let rings: Vec<Vec<Point>> = polygon.absolute_rings().collect();
        let mut count = 0;
        let mut y = step / 2.0;
        while y < extent {
            let mut x = step / 2.0;
            while x < extent {
                let crossings = rings
                    .iter()
                    .filter(|ring| point_in_ring(ring, x, y))
                    .count();
                if crossings % 2 == 1 {
                    count += 1;
                }
                x += step;
            }
            y += step;
        }
        count
    }

    fn point_in_ring(ring: &[Point], x: f64, y: f64) -> bool {
        let mut inside = false;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (a, b) = (ring[i], ring[j]);
            if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    #[test]
    fn subtracting_a_shape_from_itself_is_empty() {
        let a = square(1.0, 1.0, 5.0, 1);
        let result = subtract(&a, &a).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.rings().len(), 0);
    }

    #[test]
    fn square_minus_circle_leaves_a_hole() {
        let rect = square(0.0, 0.0, 10.0, 1);
        let circle = Circle::new(5.0, 5.0, 3.0, 2, Style::default()).unwrap();
        let result = subtract(&rect, &circle).unwrap();

        assert_eq!(result.rings().len(), 2);
        assert_eq!(result.z, 1);

        let outer = result.rings().iter().find(|r| r.len() == 4).expect("outer ring");
        for corner in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
            assert!(outer.iter().any(|p| (p.x, p.y) == corner));
        }

        let hole = result.rings().iter().find(|r| r.len() == 20).expect("hole ring");
        for p in hole {
            let r = ((p.x - 5.0).powi(2) + (p.y - 5.0).powi(2)).sqrt();
            assert!((r - 3.0).abs() < 0.002);
        }
    }

    #[test]
    fn result_inherits_first_operand_attributes() {
        let mut style = Style::default();
        style.set("fill", "red");
        let mut a = Polygon::rect(0.0, 0.0, 4.0, 4.0, 5, style).unwrap();
        a.ref_x = 3.0;
        let b = square(10.0, 10.0, 1.0, 9);

        let result = add(&a, &[&b]).unwrap();
        assert_eq!(result.z, 5);
        assert_eq!(result.offset(), (3.0, 0.0));
        assert_eq!(result.style.get("fill"), Some("red"));
    }

    #[test]
    fn operands_are_not_mutated() {
        let a = square(0.0, 0.0, 4.0, 1);
        let b = square(2.0, 2.0, 4.0, 2);
        let before = (a.clone(), b.clone());
        subtract(&a, &b).unwrap();
        add(&a, &[&b]).unwrap();
        assert_eq!((a, b), before);
    }

    #[test]
    fn offsets_are_honored_in_the_first_operand_frame() {
        let mut a = square(0.0, 0.0, 2.0, 1);
        a.ref_x = 10.0;
        // b sits exactly on top of a once offsets are applied
        let mut b = square(5.0, 0.0, 2.0, 2);
        b.ref_x = 5.0;
        assert!(subtract(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn union_is_commutative_in_area() {
        let a = square(0.0, 0.0, 6.0, 1);
        let b = Circle::new(6.0, 6.0, 3.0, 2, Style::default()).unwrap();
        let ab = add(&a, &[&b]).unwrap();
        let ba = add(&b, &[&a]).unwrap();
        assert_eq!(sampled_area(&ab, 0.25, 12.0), sampled_area(&ba, 0.25, 12.0));
    }

    #[test]
    fn union_with_itself_is_idempotent() {
        let a = square(1.0, 1.0, 3.0, 1);
        let aa = add(&a, &[&a]).unwrap();
        assert_eq!(sampled_area(&aa, 0.25, 8.0), sampled_area(&a, 0.25, 8.0));
    }

    #[test]
    fn union_folds_all_operands() {
        let a = square(0.0, 0.0, 2.0, 1);
        let b = square(1.0, 0.0, 2.0, 2);
        let c = square(2.0, 0.0, 2.0, 3);
        let result = add(&a, &[&b, &c]).unwrap();
        assert_eq!(result.rings().len(), 1);
        assert_eq!(sampled_area(&result, 0.5, 6.0), 4 * 2 * 4);
    }

    #[test]
    fn operands_off_the_grid_are_rejected() {
        let plate = square(0.0, 0.0, 1e17, 1);
        let circle = Circle::new(5.0, 5.0, 3.0, 2, Style::default()).unwrap();
        let err = subtract(&plate, &circle).unwrap_err();
        assert!(matches!(err, GeometryError::OutOfRange { .. }));

        // in range on its own, pushed off the grid by the first operand's frame
        let mut far = square(0.0, 0.0, 1.0, 3);
        far.ref_x = -1e16;
        assert!(add(&far, &[&circle]).is_err());
    }
}
