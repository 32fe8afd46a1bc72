//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Order in which selected shapes are written to the document.
///
/// Every shape carries a z value, but output follows binding order unless
/// `z-order` is requested.
#[derive(
    Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RenderOrder {
    /// Order in which names were first bound by the script
    #[default]
    Binding,
    /// Ascending z value, ties kept in binding order
    ZOrder,
}
