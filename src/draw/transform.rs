//! Translation helpers.

use super::shape::Drawable;

/// Returns an independent copy of `shape` shifted by `(dx, dy)`.
///
/// The copy keeps the original's style and z, so a family of copies stacks
/// the same way as the shape it came from.
pub fn translate<T: Drawable + Clone>(shape: &T, dx: f64, dy: f64) -> T {
    let mut copy = shape.clone();
    copy.shift(dx, dy);
    copy
}

/// Shifts `shape` by `(dx, dy)` in place.
pub fn move_by<T: Drawable + ?Sized>(shape: &mut T, dx: f64, dy: f64) {
    shape.shift(dx, dy);
}
