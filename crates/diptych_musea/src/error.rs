//! Registry lookup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("unknown package `{0}`")]
    UnknownPackage(String),

    /// A function entry names a package the registry does not have
    #[error("function `{function}` belongs to unknown package `{package}`")]
    DanglingPackage { function: String, package: String },

    #[error("invalid registry: {0}")]
    InvalidRegistry(#[from] serde_json::Error),
}
