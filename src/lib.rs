//! Library exports for diagrammer.
//!
//! Exposes the geometry and shape model, the boolean composition engine, the
//! script interpreter and the SVG renderer so diagrams can be built either from
//! a script or directly from Rust.

pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod script;

pub use config::Config;
pub use error::{GeometryError, ScriptError};
