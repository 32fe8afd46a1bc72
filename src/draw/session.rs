//! Diagram-building context.
//!
//! A [`Session`] owns the state every constructor needs: the draw-order counter
//! and the default style. Each diagram gets its own session, so diagrams built
//! side by side never share counters or styles.

use super::boolean;
use super::shape::{CIRCLE_SEGMENTS, Circle, Drawable, Polygon};
use super::style::Style;
use crate::config::Config;
use crate::error::GeometryError;
use crate::geometry::{Clipper, Ring};

#[derive(Debug, Clone)]
pub struct Session {
    last_z: u64,
    style: Style,
    circle_segments: usize,
    clipper: Clipper,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with the built-in default style.
    pub fn new() -> Self {
        Self {
            last_z: 0,
            style: Style::default(),
            circle_segments: CIRCLE_SEGMENTS,
            clipper: Clipper::default(),
        }
    }

    /// Creates a session using the style overrides and geometry settings from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut session = Self::new();
        for (key, value) in &config.style {
            session.style.set(key, value.clone());
        }
        session.circle_segments = config.geometry.circle_segments;
        session.clipper = Clipper::new(config.geometry.clip_scale);
        session
    }

    /// Increments the draw-order counter and returns the new value.
    ///
    /// The first call returns 1; values never repeat within a session.
    pub fn zorder(&mut self) -> u64 {
        self.last_z += 1;
        self.last_z
    }

    /// Overrides one attribute of the default style.
    ///
    /// Only shapes constructed afterwards see the change.
    pub fn set_style(&mut self, key: &str, value: impl Into<String>) {
        self.style.set(key, value);
    }

    pub fn default_style(&self) -> &Style {
        &self.style
    }

    pub fn clipper(&self) -> &Clipper {
        &self.clipper
    }

    pub fn polygon(&mut self, rings: Vec<Ring>) -> Result<Polygon, GeometryError> {
        let mut polygon = Polygon::new(rings, 0, self.style.clone())?;
        polygon.z = self.zorder();
        Ok(polygon)
    }

    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<Polygon, GeometryError> {
        let mut rect = Polygon::rect(x, y, width, height, 0, self.style.clone())?;
        rect.z = self.zorder();
        Ok(rect)
    }

    pub fn circle(&mut self, x: f64, y: f64, radius: f64) -> Result<Circle, GeometryError> {
        let mut circle =
            Circle::new(x, y, radius, 0, self.style.clone())?.with_segments(self.circle_segments);
        circle.z = self.zorder();
        Ok(circle)
    }

    /// Union at this session's grid resolution. See [`boolean::add`].
    pub fn add(
        &self,
        start: &dyn Drawable,
        rest: &[&dyn Drawable],
    ) -> Result<Polygon, GeometryError> {
        boolean::add_with(&self.clipper, start, rest)
    }

    /// Difference at this session's grid resolution. See [`boolean::subtract`].
    pub fn subtract(&self, x: &dyn Drawable, y: &dyn Drawable) -> Result<Polygon, GeometryError> {
        boolean::subtract_with(&self.clipper, x, y)
    }
}
