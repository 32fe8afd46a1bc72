//! Configuration file support for diagrammer.
//!
//! Settings are read from `~/.config/diagrammer/config.toml`, or from a file
//! given explicitly on the command line. Settings cover the output document
//! size, the shape output order, geometry approximation, and default style
//! overrides.
//!
//! If no config file exists, defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::RenderOrder;
pub use types::{DocumentConfig, GeometryConfig, RenderConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [document]
/// width = 297.0
/// height = 210.0
///
/// [render]
/// order = "z-order"
/// name_comments = true
///
/// [geometry]
/// circle_segments = 20
/// clip_scale = 1000.0
///
/// [style]
/// fill = "steelblue"
/// stroke_width = "0.5"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Output document size
    #[serde(default)]
    pub document: DocumentConfig,

    /// Output order and comments
    #[serde(default)]
    pub render: RenderConfig,

    /// Circle approximation and clipping resolution
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// Overrides applied to the default shape style before the script runs
    #[serde(default)]
    pub style: BTreeMap<String, String>,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `document.width`, `document.height`: greater than 0 (falls back to A4 landscape)
    /// - `geometry.circle_segments`: 3 - 720
    /// - `geometry.clip_scale`: 1.0 - 1000000.0
    fn validate_and_clamp(&mut self) {
        if !(self.document.width.is_finite() && self.document.width > 0.0) {
            log::warn!(
                "Invalid document width {}, falling back to 297",
                self.document.width
            );
            self.document.width = 297.0;
        }

        if !(self.document.height.is_finite() && self.document.height > 0.0) {
            log::warn!(
                "Invalid document height {}, falling back to 210",
                self.document.height
            );
            self.document.height = 210.0;
        }

        if !(3..=720).contains(&self.geometry.circle_segments) {
            log::warn!(
                "Invalid circle_segments {}, clamping to 3-720 range",
                self.geometry.circle_segments
            );
            self.geometry.circle_segments = self.geometry.circle_segments.clamp(3, 720);
        }

        if !(1.0..=1_000_000.0).contains(&self.geometry.clip_scale) {
            log::warn!(
                "Invalid clip_scale {}, clamping to 1-1000000 range",
                self.geometry.clip_scale
            );
            self.geometry.clip_scale = if self.geometry.clip_scale.is_nan() {
                crate::geometry::CLIP_SCALE
            } else {
                self.geometry.clip_scale.clamp(1.0, 1_000_000.0)
            };
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/diagrammer/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("diagrammer");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = match Self::get_config_path() {
            Ok(path) => path,
            Err(err) => {
                info!("{err:#}, using defaults");
                return Ok(Self::default());
            }
        };

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::parse(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn parse(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
