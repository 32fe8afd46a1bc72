//! Diagram scripting.
//!
//! Scripts are a small, line-oriented expression language. Each statement is
//! either an assignment `name = expr` or a bare expression such as a call:
//!
//! ```text
//! # a plate with a hole
//! setstyle(fill="steelblue", fill_opacity=0.8)
//! plate = Rect(10, 10, 100, 60)
//! hole = Circle(60, 40, 15)
//! part = subtract(plate, hole)
//! move(part, 5, 0)
//! _scratch = copy(part, 0, 80)
//! ```
//!
//! Every shape bound to a name not starting with `_` ends up in the diagram.

pub mod interpreter;
pub mod lexer;
pub mod parser;

pub use interpreter::{BUILTINS, Interpreter, Namespace, Value};

use crate::draw::Session;
use crate::error::ScriptError;
use log::debug;

/// Runs `source` against `session` and returns the resulting bindings.
///
/// # Errors
/// Returns the first syntax, runtime or geometry error; no partial namespace is
/// returned.
pub fn run(source: &str, session: &mut Session) -> Result<Namespace, ScriptError> {
    let tokens = lexer::tokenize(source)?;
    let statements = parser::parse(&tokens)?;
    debug!("Parsed {} statement(s)", statements.len());
    Interpreter::new(session).run(&statements)
}
