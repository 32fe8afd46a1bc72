//! Integer-grid polygon clipping.
//!
//! Operands are scaled onto a fixed-precision integer grid, combined with a
//! single clip pass using the even-odd fill rule on both inputs, and the output
//! outlines are snapped back onto the grid. Working on the grid keeps results
//! reproducible for floating-point input.

use super::{IntPoint, IntRing, Ring, scale_rings, unscale_rings};
use crate::error::GeometryError;
use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use log::debug;

/// Default grid resolution: coordinates are multiplied by this before clipping.
pub const CLIP_SCALE: f64 = 1000.0;

/// The set operation performed by a clip pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOp {
    /// Subject or clip.
    Union,
    /// Subject minus clip.
    Difference,
}

/// A ring set tagged with the offset it must be shifted by before clipping.
#[derive(Debug, Clone, Copy)]
pub struct Operand<'a> {
    pub rings: &'a [Ring],
    pub dx: f64,
    pub dy: f64,
}

impl<'a> Operand<'a> {
    pub fn new(rings: &'a [Ring], dx: f64, dy: f64) -> Self {
        Self { rings, dx, dy }
    }
}

/// Runs boolean operations on ring sets at a fixed grid resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clipper {
    scale: f64,
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new(CLIP_SCALE)
    }
}

impl Clipper {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Subtracts `clip` from `subject`. Returns possibly zero rings.
    ///
    /// # Errors
    /// Fails with [`GeometryError::OutOfRange`] if an operand does not fit the grid.
    pub fn difference(
        &self,
        subject: Operand<'_>,
        clip: Operand<'_>,
    ) -> Result<Vec<Ring>, GeometryError> {
        let a = self.to_grid(subject)?;
        let b = self.to_grid(clip)?;
        let result = clip_pass(&a, &b, ClipOp::Difference);
        Ok(unscale_rings(&result, self.scale))
    }

    /// Unions `start` with every operand in `rest`, folding left to right.
    ///
    /// Each intermediate result becomes the subject of the next pass.
    pub fn union(
        &self,
        start: Operand<'_>,
        rest: &[Operand<'_>],
    ) -> Result<Vec<Ring>, GeometryError> {
        let first = self.to_grid(start)?;
        let result = rest.iter().try_fold(first, |acc, operand| {
            let b = self.to_grid(*operand)?;
            Ok::<_, GeometryError>(clip_pass(&acc, &b, ClipOp::Union))
        })?;
        Ok(unscale_rings(&result, self.scale))
    }

    fn to_grid(&self, operand: Operand<'_>) -> Result<Vec<IntRing>, GeometryError> {
        scale_rings(operand.rings, self.scale, operand.dx, operand.dy)
    }
}

/// Executes a single clip pass on grid rings.
///
/// Each operand is resolved with the even-odd rule before the operation, so
/// overlapping rings inside one operand cancel out and nested rings form holes.
/// The returned rings are outer boundaries and holes; rendering them with the
/// even-odd rule reproduces the result region.
pub fn clip_pass(subject: &[IntRing], clip: &[IntRing], op: ClipOp) -> Vec<IntRing> {
    debug!("Clipping subject {:?}", subject);
    debug!("Clipping clip {:?}", clip);

    let a = even_odd_region(subject);
    let b = even_odd_region(clip);

    let region = match op {
        ClipOp::Union => a.union(&b),
        ClipOp::Difference => a.difference(&b),
    };

    let rings = region_to_rings(&region);
    if rings.is_empty() {
        debug!("{:?} pass produced no output rings", op);
    }
    rings
}

/// Resolves a ring set into the region it covers under the even-odd rule.
fn even_odd_region(rings: &[IntRing]) -> MultiPolygon<f64> {
    rings
        .iter()
        .filter(|ring| !is_degenerate(ring))
        .fold(MultiPolygon::new(Vec::new()), |acc, ring| {
            let polygon = MultiPolygon::new(vec![ring_to_polygon(ring)]);
            acc.xor(&polygon)
        })
}

fn ring_to_polygon(ring: &[IntPoint]) -> Polygon<f64> {
    let coords = ring
        .iter()
        .map(|p| Coord {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect::<Vec<_>>();
    Polygon::new(LineString::new(coords), Vec::new())
}

fn region_to_rings(region: &MultiPolygon<f64>) -> Vec<IntRing> {
    let mut rings = Vec::new();
    for polygon in &region.0 {
        let outlines = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        rings.extend(outlines.filter_map(snap_line_string));
    }
    rings
}

/// Rounds an outline onto the grid, dropping the closing point and any
/// consecutive duplicates. Rings that collapse are discarded.
fn snap_line_string(line: &LineString<f64>) -> Option<IntRing> {
    let mut ring: IntRing = Vec::with_capacity(line.0.len());
    for coord in &line.0 {
        let point = IntPoint {
            x: coord.x.round() as i64,
            y: coord.y.round() as i64,
        };
        if ring.last() != Some(&point) {
            ring.push(point);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    (!is_degenerate(&ring)).then_some(ring)
}

/// A ring is degenerate when all of its points lie on one line.
fn is_degenerate(ring: &[IntPoint]) -> bool {
    let Some(&a) = ring.first() else {
        return true;
    };
    let Some(&b) = ring.iter().find(|&&p| p != a) else {
        return true;
    };
    !ring.iter().any(|p| {
        let cross = (b.x - a.x) as i128 * (p.y - a.y) as i128
            - (b.y - a.y) as i128 * (p.x - a.x) as i128;
        cross != 0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Twice the signed area of a grid ring (shoelace formula).
    fn doubled_area(ring: &[IntPoint]) -> i128 {
        let mut sum: i128 = 0;
        for (i, p) in ring.iter().enumerate() {
            let q = ring[(i + 1) % ring.len()];
            sum += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
        }
        sum
    }

    fn square(x: i64, y: i64, size: i64) -> IntRing {
        vec![
            IntPoint { x, y },
            IntPoint { x: x + size, y },
            IntPoint {
                x: x + size,
                y: y + size,
            },
            IntPoint { x, y: y + size },
        ]
    }

    fn total_area(rings: &[IntRing]) -> i128 {
        // doubled area of the even-odd region covered by `rings`
        let region = even_odd_region(rings);
        region
            .0
            .iter()
            .map(|polygon| {
                let outer = snap_line_string(polygon.exterior())
                    .map_or(0, |r| doubled_area(&r).abs());
                let holes: i128 = polygon
                    .interiors()
                    .iter()
                    .filter_map(snap_line_string)
                    .map(|r| doubled_area(&r).abs())
                    .sum();
                outer - holes
            })
            .sum()
    }

    #[test]
    fn difference_of_identical_squares_is_empty() {
        let a = vec![square(0, 0, 10_000)];
        assert!(clip_pass(&a, &a, ClipOp::Difference).is_empty());
    }

    #[test]
    fn union_of_disjoint_squares_keeps_both() {
        let a = vec![square(0, 0, 1000)];
        let b = vec![square(5000, 5000, 1000)];
        let result = clip_pass(&a, &b, ClipOp::Union);
        assert_eq!(result.len(), 2);
        assert_eq!(total_area(&result), 2 * 2 * 1000 * 1000);
    }

    #[test]
    fn union_of_overlapping_squares_has_merged_area() {
        let a = vec![square(0, 0, 2000)];
        let b = vec![square(1000, 0, 2000)];
        let result = clip_pass(&a, &b, ClipOp::Union);
        assert_eq!(result.len(), 1);
        assert_eq!(total_area(&result), 2 * 3000 * 2000);
    }

    #[test]
    fn difference_punches_a_hole() {
        let a = vec![square(0, 0, 10_000)];
        let b = vec![square(4000, 4000, 2000)];
        let result = clip_pass(&a, &b, ClipOp::Difference);
        assert_eq!(result.len(), 2);
        assert_eq!(total_area(&result), 2 * (100_000_000 - 4_000_000));
    }

    #[test]
    fn nested_rings_in_one_operand_follow_even_odd() {
        // a square with a square hole, unioned with nothing overlapping it
        let a = vec![square(0, 0, 10_000), square(2000, 2000, 2000)];
        let b = vec![square(20_000, 0, 1000)];
        let result = clip_pass(&a, &b, ClipOp::Union);
        assert_eq!(
            total_area(&result),
            2 * (100_000_000 - 4_000_000 + 1_000_000)
        );
    }

    #[test]
    fn degenerate_rings_are_ignored() {
        let flat = vec![vec![
            IntPoint { x: 0, y: 0 },
            IntPoint { x: 10, y: 0 },
            IntPoint { x: 20, y: 0 },
        ]];
        let a = vec![square(0, 0, 1000)];
        let result = clip_pass(&a, &flat, ClipOp::Difference);
        assert_eq!(total_area(&result), 2 * 1000 * 1000);
    }

    #[test]
    fn clipper_union_folds_every_operand() {
        let a = [Ring::from_coords([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()];
        let clipper = Clipper::default();
        let rings = clipper
            .union(
                Operand::new(&a, 0.0, 0.0),
                &[Operand::new(&a, 0.5, 0.0), Operand::new(&a, 1.0, 0.0)],
            )
            .unwrap();
        assert_eq!(rings.len(), 1);
        let max_x = rings[0].iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((max_x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn clipper_rejects_operands_off_the_grid() {
        let a = [Ring::from_coords([(0.0, 0.0), (1e17, 0.0), (1e17, 1e17), (0.0, 1e17)]).unwrap()];
        let b = [Ring::from_coords([(2.0, 2.0), (8.0, 2.0), (8.0, 8.0)]).unwrap()];
        let clipper = Clipper::default();

        let err = clipper
            .difference(Operand::new(&a, 0.0, 0.0), Operand::new(&b, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, GeometryError::OutOfRange { .. }));
        assert!(
            clipper
                .union(Operand::new(&b, 0.0, 0.0), &[Operand::new(&a, 0.0, 0.0)])
                .is_err()
        );
    }
}
