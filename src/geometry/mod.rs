//! Geometry primitives: points, rings, and the integer grid used for clipping.
//!
//! A [`Ring`] is an implicitly closed sequence of points. Shapes own their rings
//! exclusively and never store them pre-translated by their reference offset.

pub mod clip;

pub use clip::{CLIP_SCALE, ClipOp, Clipper};

use crate::error::GeometryError;

/// A point in two-dimensional space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate, left to right.
    pub x: f64,
    /// Y coordinate, top to bottom.
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An ordered, implicitly closed sequence of points forming one boundary.
///
/// Point order defines winding. Rings are immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring(Vec<Point>);

impl Ring {
    /// Validates and wraps a point sequence.
    ///
    /// # Errors
    /// Returns [`GeometryError::TooFewPoints`] for fewer than 3 points and
    /// [`GeometryError::NonFinite`] if any coordinate is NaN or infinite.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite { x: bad.x, y: bad.y });
        }
        Ok(Self(points))
    }

    /// Builds a ring from `(x, y)` tuples.
    pub fn from_coords<I>(coords: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(coords.into_iter().map(Point::from).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A point on the integer clipping grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

/// A ring on the integer clipping grid.
pub type IntRing = Vec<IntPoint>;

/// Largest grid coordinate magnitude. Beyond 2^53 grid values no longer
/// round-trip through `f64` exactly.
pub const MAX_GRID_COORD: f64 = 9_007_199_254_740_992.0;

/// Shifts every ring by `(dx, dy)`, multiplies by `scale` and rounds to the grid.
///
/// # Errors
/// Returns [`GeometryError::OutOfRange`] if a shifted point lands outside
/// `±MAX_GRID_COORD` once scaled.
pub fn scale_rings(
    rings: &[Ring],
    scale: f64,
    dx: f64,
    dy: f64,
) -> Result<Vec<IntRing>, GeometryError> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|p| {
                    let shifted = p.offset(dx, dy);
                    match (to_grid(shifted.x, scale), to_grid(shifted.y, scale)) {
                        (Some(x), Some(y)) => Ok(IntPoint { x, y }),
                        _ => Err(GeometryError::OutOfRange {
                            x: shifted.x,
                            y: shifted.y,
                        }),
                    }
                })
                .collect()
        })
        .collect()
}

fn to_grid(value: f64, scale: f64) -> Option<i64> {
    let scaled = (value * scale).round();
    (scaled.is_finite() && scaled.abs() <= MAX_GRID_COORD).then_some(scaled as i64)
}

/// Maps grid rings back to floating coordinates by dividing by `scale`.
///
/// Grid rings with fewer than 3 points are dropped.
pub fn unscale_rings(rings: &[IntRing], scale: f64) -> Vec<Ring> {
    rings
        .iter()
        .filter_map(|ring| {
            let points = ring
                .iter()
                .map(|p| Point::new(p.x as f64 / scale, p.y as f64 / scale))
                .collect();
            Ring::new(points).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_rejects_fewer_than_three_points() {
        let err = Ring::from_coords([(0.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints(2));
        assert!(Ring::new(Vec::new()).is_err());
    }

    #[test]
    fn ring_rejects_non_finite_coordinates() {
        let err = Ring::from_coords([(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, GeometryError::NonFinite { .. }));
    }

    #[test]
    fn scaling_round_trip_stays_within_grid_step() {
        let ring = Ring::from_coords([(0.12345, 7.0), (3.14159, 2.71828), (-1.0006, 9.9999)])
            .unwrap();
        let scaled = scale_rings(std::slice::from_ref(&ring), CLIP_SCALE, 0.0, 0.0).unwrap();
        let back = unscale_rings(&scaled, CLIP_SCALE);

        assert_eq!(back.len(), 1);
        for (orig, restored) in ring.iter().zip(back[0].iter()) {
            assert!((orig.x - restored.x).abs() <= 0.001);
            assert!((orig.y - restored.y).abs() <= 0.001);
        }
    }

    #[test]
    fn scaling_applies_offset_before_rounding() {
        let ring = Ring::from_coords([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let scaled = scale_rings(&[ring], 1000.0, 2.5, -1.0).unwrap();
        assert_eq!(scaled[0][0], IntPoint { x: 2500, y: -1000 });
        assert_eq!(scaled[0][2], IntPoint { x: 3500, y: 0 });
    }

    #[test]
    fn scaling_rejects_coordinates_off_the_grid() {
        let edge = Ring::from_coords([(0.0, 0.0), (9e12, 0.0), (9e12, -9e12)]).unwrap();
        let scaled = scale_rings(std::slice::from_ref(&edge), CLIP_SCALE, 0.0, 0.0).unwrap();
        assert_eq!(scaled[0][2], IntPoint { x: 9_000_000_000_000_000, y: -9_000_000_000_000_000 });

        let huge = Ring::from_coords([(0.0, 0.0), (1e17, 0.0), (1e17, 1e17)]).unwrap();
        let err = scale_rings(&[huge], CLIP_SCALE, 0.0, 0.0).unwrap_err();
        assert_eq!(err, GeometryError::OutOfRange { x: 1e17, y: 0.0 });

        // an in-range ring pushed off the grid by its offset
        let small = Ring::from_coords([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        assert!(scale_rings(&[small], CLIP_SCALE, 0.0, f64::MAX).is_err());
    }
}
