//! Error types shared by the geometry model and the script interpreter.

use thiserror::Error;

/// Malformed shape input, rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid geometry: ring has {0} points, at least 3 are required")]
    TooFewPoints(usize),

    #[error("invalid geometry: shape has no rings")]
    NoRings,

    #[error("invalid geometry: non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("invalid geometry: circle radius {0} must be finite and not negative")]
    InvalidRadius(f64),

    #[error("invalid geometry: rectangle {width} x {height} has no area")]
    EmptyRect { width: f64, height: f64 },

    #[error("invalid geometry: coordinate ({x}, {y}) is outside the clipping grid")]
    OutOfRange { x: f64, y: f64 },
}

/// Errors raised while lexing, parsing or evaluating a diagram script.
///
/// Any of these aborts the whole run before output is produced.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("line {line}: {message}")]
    Runtime { line: usize, message: String },

    #[error("line {line}: {source}")]
    Geometry {
        line: usize,
        #[source]
        source: GeometryError,
    },
}

impl ScriptError {
    pub(crate) fn runtime(line: usize, message: impl Into<String>) -> Self {
        ScriptError::Runtime {
            line,
            message: message.into(),
        }
    }

    /// Line number the error was reported at (1-based).
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Syntax { line, .. }
            | ScriptError::Runtime { line, .. }
            | ScriptError::Geometry { line, .. } => *line,
        }
    }
}
