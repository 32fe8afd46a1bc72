//! Configuration type definitions.

use super::enums::RenderOrder;
use crate::draw::CIRCLE_SEGMENTS;
use crate::geometry::CLIP_SCALE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output document settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentConfig {
    /// Document width, also the width of the view box (default: 297, A4 landscape in mm)
    #[serde(default = "default_width")]
    pub width: f64,

    /// Document height, also the height of the view box (default: 210)
    #[serde(default = "default_height")]
    pub height: f64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Rendering preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Shape output order: "binding" (default) or "z-order"
    #[serde(default)]
    pub order: RenderOrder,

    /// Emit a `<!-- name -->` comment before every shape
    #[serde(default = "default_name_comments")]
    pub name_comments: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            order: RenderOrder::default(),
            name_comments: default_name_comments(),
        }
    }
}

/// Geometry approximation and clipping settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeometryConfig {
    /// Boundary samples used when a circle takes part in a boolean operation (valid range: 3 - 720)
    #[serde(default = "default_circle_segments")]
    pub circle_segments: usize,

    /// Integer grid resolution for clipping; coordinates are multiplied by this
    /// before the clip pass (valid range: 1 - 1000000)
    #[serde(default = "default_clip_scale")]
    pub clip_scale: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            circle_segments: default_circle_segments(),
            clip_scale: default_clip_scale(),
        }
    }
}

fn default_width() -> f64 {
    297.0
}

fn default_height() -> f64 {
    210.0
}

fn default_name_comments() -> bool {
    true
}

fn default_circle_segments() -> usize {
    CIRCLE_SEGMENTS
}

fn default_clip_scale() -> f64 {
    CLIP_SCALE
}
