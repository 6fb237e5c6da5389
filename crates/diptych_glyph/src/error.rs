//! Error types for diptych_glyph formatter.

use crate::options::Dialect;
use thiserror::Error;

/// Errors that can occur during formatting
#[derive(Debug, Error)]
pub enum FormatError {
    /// The snippet is not valid source for the requested dialect
    #[error("Failed to parse {dialect} snippet: {message}")]
    ScriptParseError {
        /// Dialect the snippet was parsed as
        dialect: Dialect,
        /// Parser diagnostics joined with `; `
        message: String,
    },
}

impl FormatError {
    /// Build a parse error from a list of parser diagnostics.
    pub fn parse(dialect: Dialect, diagnostics: &[String]) -> Self {
        FormatError::ScriptParseError {
            dialect,
            message: diagnostics.join("; "),
        }
    }
}
