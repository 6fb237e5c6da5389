//! Per-block error type.

use diptych_atelier::TranspileError;
use diptych_glyph::FormatError;
use thiserror::Error;

/// Why a block was passed through unchanged
#[derive(Debug, Error)]
pub enum BlockError {
    /// A rendering could not be canonicalized
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The TypeScript could not be downleveled
    #[error(transparent)]
    Transpile(#[from] TranspileError),

    /// The snippet is larger than the per-block limit
    #[error("snippet is {size} bytes, over the {limit} byte limit")]
    Oversized { size: usize, limit: usize },

    /// The document already used its snippet budget
    #[error("document snippet budget of {limit} bytes exhausted")]
    BudgetExhausted { limit: usize },

    /// The worker running the block did not finish
    #[error("block task failed: {0}")]
    Task(String),
}
