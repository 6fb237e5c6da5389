//! Error types for TypeScript downleveling.

use thiserror::Error;

/// Errors that can occur while turning TypeScript into JavaScript
#[derive(Debug, Error)]
pub enum TranspileError {
    /// The TypeScript source has syntax errors
    #[error("Failed to parse TypeScript: {0}")]
    Parse(String),

    /// Semantic analysis rejected the program
    #[error("Semantic analysis failed: {0}")]
    Semantic(String),

    /// The TypeScript transform reported errors
    #[error("Failed to transform TypeScript: {0}")]
    Transform(String),

    /// The configured target is not understood
    #[error("Invalid transpile target `{target}`: {message}")]
    InvalidTarget { target: String, message: String },
}
