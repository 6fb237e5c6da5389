//! Rewrite results and diagnostics.

use serde::Serialize;
use std::fmt;

/// What happened to one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockOutcome {
    /// Both renderings are identical, the fence was kept
    Unchanged,
    /// The fence was replaced by a dual view
    Diverged,
    /// A work limit kept the block from being processed
    Skipped,
    /// Formatting or transpiling failed, the fence was kept
    Failed,
}

/// A non-fatal problem with one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Position of the block in the document
    pub block: usize,
    /// 1-based line of the opening fence
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Per-document summary, one outcome per block in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub outcomes: Vec<BlockOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RewriteReport {
    /// Number of blocks found
    #[inline]
    pub fn blocks(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of blocks rendered as dual views
    pub fn diverged(&self) -> usize {
        self.count(BlockOutcome::Diverged)
    }

    /// Count blocks with the given outcome
    pub fn count(&self, outcome: BlockOutcome) -> usize {
        self.outcomes.iter().filter(|o| **o == outcome).count()
    }

    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Rewritten document with its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub document: String,
    pub report: RewriteReport,
}

impl RewriteOutput {
    /// Whether any block was replaced
    #[inline]
    pub fn changed(&self) -> bool {
        self.report.diverged() > 0
    }
}
