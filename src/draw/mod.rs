//! Shape model and SVG output.
//!
//! This module defines the drawable types of a diagram:
//! - [`Polygon`] and [`Circle`]: the shape variants, unified by [`Shape`]
//! - [`Style`]: per-shape presentation attributes
//! - [`Session`]: draw-order counter and default style for one diagram
//! - [`Diagram`]: named shapes selected for output
//! - Boolean composition ([`add`], [`subtract`]), translation helpers and SVG rendering

pub mod boolean;
pub mod frame;
pub mod render;
pub mod session;
pub mod shape;
pub mod style;
pub mod transform;

// Re-export commonly used types at module level
pub use boolean::{add, subtract};
pub use frame::{Diagram, Entry};
pub use render::{render_document, render_shape};
pub use session::Session;
pub use shape::{CIRCLE_SEGMENTS, Circle, Drawable, Polygon, Shape};
pub use style::Style;
pub use transform::{move_by, translate};
