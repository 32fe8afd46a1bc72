//! Shape definitions for diagrams.

use super::style::Style;
use crate::error::GeometryError;
use crate::geometry::{Point, Ring};
use std::f64::consts::TAU;

/// Number of boundary samples used when a circle is approximated as a polygon.
pub const CIRCLE_SEGMENTS: usize = 20;

/// Capability shared by every drawable shape.
///
/// Boolean operations only ever see the polygon returned by
/// [`Drawable::to_polygon`], so they never need to know the concrete shape kind.
pub trait Drawable {
    /// Returns a polygon approximation carrying this shape's style and z.
    fn to_polygon(&self) -> Polygon;

    /// Reference offset `(ref_x, ref_y)` applied to the geometry at render time.
    fn offset(&self) -> (f64, f64);

    /// Shifts the reference offset in place.
    fn shift(&mut self, dx: f64, dy: f64);

    /// Draw order tag.
    fn z(&self) -> u64;

    fn style(&self) -> &Style;
}

/// One or more rings drawn as a single shape with the even-odd fill rule.
///
/// Multiple rings express holes and disjoint parts, typically produced by a
/// boolean operation. A polygon with zero rings only ever comes out of a
/// boolean operation and renders nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    rings: Vec<Ring>,
    /// Horizontal offset added to every point at render time
    pub ref_x: f64,
    /// Vertical offset added to every point at render time
    pub ref_y: f64,
    /// Draw order
    pub z: u64,
    /// Presentation attributes
    pub style: Style,
}

impl Polygon {
    /// Creates a polygon at offset `(0, 0)`.
    ///
    /// # Errors
    /// Returns [`GeometryError::NoRings`] if `rings` is empty.
    pub fn new(rings: Vec<Ring>, z: u64, style: Style) -> Result<Self, GeometryError> {
        if rings.is_empty() {
            return Err(GeometryError::NoRings);
        }
        Ok(Self {
            rings,
            ref_x: 0.0,
            ref_y: 0.0,
            z,
            style,
        })
    }

    /// Creates an axis-aligned `width` x `height` box with its corner at `(x, y)`.
    ///
    /// # Errors
    /// Returns [`GeometryError::EmptyRect`] when either side is zero.
    pub fn rect(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        z: u64,
        style: Style,
    ) -> Result<Self, GeometryError> {
        if width == 0.0 || height == 0.0 {
            return Err(GeometryError::EmptyRect { width, height });
        }
        let ring = Ring::from_coords([
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ])?;
        Self::new(vec![ring], z, style)
    }

    /// Wraps a boolean-operation result, inheriting offset, style and z from `template`.
    pub(crate) fn derived(rings: Vec<Ring>, template: &Polygon) -> Self {
        Self {
            rings,
            ref_x: template.ref_x,
            ref_y: template.ref_y,
            z: template.z,
            style: template.style.clone(),
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// True when every point stays finite once the reference offset is applied.
    pub fn has_finite_extent(&self) -> bool {
        self.absolute_rings()
            .flatten()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Iterates over every ring with the reference offset applied.
    pub fn absolute_rings(&self) -> impl Iterator<Item = Vec<Point>> + '_ {
        self.rings.iter().map(move |ring| {
            ring.iter()
                .map(|p| p.offset(self.ref_x, self.ref_y))
                .collect()
        })
    }
}

impl Drawable for Polygon {
    fn to_polygon(&self) -> Polygon {
        self.clone()
    }

    fn offset(&self) -> (f64, f64) {
        (self.ref_x, self.ref_y)
    }

    fn shift(&mut self, dx: f64, dy: f64) {
        self.ref_x += dx;
        self.ref_y += dy;
    }

    fn z(&self) -> u64 {
        self.z
    }

    fn style(&self) -> &Style {
        &self.style
    }
}

/// A circle, rendered natively and approximated for boolean operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    /// Center X coordinate
    pub x: f64,
    /// Center Y coordinate
    pub y: f64,
    /// Radius
    pub radius: f64,
    /// Boundary samples used by [`Drawable::to_polygon`]
    pub segments: usize,
    /// Horizontal offset added to the center at render time
    pub ref_x: f64,
    /// Vertical offset added to the center at render time
    pub ref_y: f64,
    /// Draw order
    pub z: u64,
    /// Presentation attributes
    pub style: Style,
}

impl Circle {
    /// # Errors
    /// Returns an error for non-finite center coordinates, a negative or
    /// non-finite radius, or a boundary that overflows to infinity.
    pub fn new(x: f64, y: f64, radius: f64, z: u64, style: Style) -> Result<Self, GeometryError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GeometryError::NonFinite { x, y });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        let circle = Self {
            x,
            y,
            radius,
            segments: CIRCLE_SEGMENTS,
            ref_x: 0.0,
            ref_y: 0.0,
            z,
            style,
        };
        if !circle.has_finite_extent() {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(circle)
    }

    /// True when the whole boundary, offset included, has finite coordinates.
    pub fn has_finite_extent(&self) -> bool {
        let center = self.center();
        [
            center.x - self.radius,
            center.x + self.radius,
            center.y - self.radius,
            center.y + self.radius,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Sets the number of boundary samples (at least 3).
    #[must_use]
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(3);
        self
    }

    /// Center with the reference offset applied.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.ref_x, self.y + self.ref_y)
    }
}

impl Drawable for Circle {
    /// Samples the boundary at equally spaced angles starting at angle zero.
    ///
    /// The sampled points already include the center offset, so the returned
    /// polygon sits at offset `(0, 0)`.
    fn to_polygon(&self) -> Polygon {
        let center = self.center();
        let segments = self.segments.max(3);
        let points = (0..segments)
            .map(|step| {
                let angle = step as f64 * TAU / segments as f64;
                Point::new(
                    center.x + self.radius * angle.cos(),
                    center.y + self.radius * angle.sin(),
                )
            })
            .collect();
        // a boundary pushed to infinity samples no valid ring
        let rings = Ring::new(points).map(|ring| vec![ring]).unwrap_or_default();
        Polygon {
            rings,
            ref_x: 0.0,
            ref_y: 0.0,
            z: self.z,
            style: self.style.clone(),
        }
    }

    fn offset(&self) -> (f64, f64) {
        (self.ref_x, self.ref_y)
    }

    fn shift(&mut self, dx: f64, dy: f64) {
        self.ref_x += dx;
        self.ref_y += dy;
    }

    fn z(&self) -> u64 {
        self.z
    }

    fn style(&self) -> &Style {
        &self.style
    }
}

/// Any drawable shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
}

impl Shape {
    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Polygon(_) => "Polygon",
            Shape::Circle(_) => "Circle",
        }
    }

    pub fn has_finite_extent(&self) -> bool {
        match self {
            Shape::Polygon(p) => p.has_finite_extent(),
            Shape::Circle(c) => c.has_finite_extent(),
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl Drawable for Shape {
    fn to_polygon(&self) -> Polygon {
        match self {
            Shape::Polygon(p) => p.to_polygon(),
            Shape::Circle(c) => c.to_polygon(),
        }
    }

    fn offset(&self) -> (f64, f64) {
        match self {
            Shape::Polygon(p) => p.offset(),
            Shape::Circle(c) => c.offset(),
        }
    }

    fn shift(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Polygon(p) => p.shift(dx, dy),
            Shape::Circle(c) => c.shift(dx, dy),
        }
    }

    fn z(&self) -> u64 {
        match self {
            Shape::Polygon(p) => p.z,
            Shape::Circle(c) => c.z,
        }
    }

    fn style(&self) -> &Style {
        match self {
            Shape::Polygon(p) => &p.style,
            Shape::Circle(c) => &c.style,
        }
    }
}
