//! # diptych_panel
//!
//! Panel - The hinged pair of Diptych.
//! Finds TypeScript samples in a markdown document and, where the JavaScript
//! a reader would write differs from the TypeScript shown, replaces the sample
//! with a toggle between both versions.
//!
//! ## Name Origin
//!
//! **Panel** is one leaf of a diptych. Every rewritten sample becomes two
//! panels hinged together: the TypeScript as the author wrote it, and the
//! JavaScript derived from it.
//!
//! ## Pipeline
//!
//! 1. [`scan_blocks`] collects ```` ```ts ```` fences in source order
//! 2. [`decide`] canonicalizes both renderings with `diptych_glyph` and
//!    compares them
//! 3. [`BlockRewriter`] splices every [`DualView`] back into the document
//!
//! Any block that cannot be formatted or transpiled is left exactly as
//! written and reported through [`RewriteReport::diagnostics`].
//!
//! ## Example
//!
//! ```ignore
//! use diptych_panel::{BlockRewriter, RewriteOptions};
//!
//! let rewriter = BlockRewriter::new(RewriteOptions::default());
//! let output = rewriter.rewrite("```ts\nconst a: number = 1\n```\n");
//! assert!(output.document.starts_with("<CodeToggle>"));
//! ```

mod block;
mod decide;
mod error;
mod options;
mod report;
mod rewrite;

pub use block::{scan_blocks, CodeBlock};
pub use decide::{decide, decide_or_pass, Decision, DualView, Rendering};
pub use error::BlockError;
pub use options::{Limits, PaneMarkers, RewriteOptions};
pub use report::{BlockOutcome, Diagnostic, RewriteOutput, RewriteReport};
pub use rewrite::BlockRewriter;

/// Rewrite a document with default options
pub fn rewrite_document(document: &str) -> RewriteOutput {
    BlockRewriter::default().rewrite(document)
}

/// Decide a standalone snippet, as if it were the only block of a document
pub fn decide_snippet(
    meta: &str,
    body: &str,
    options: &RewriteOptions,
) -> Result<Decision, BlockError> {
    decide(&CodeBlock::from_snippet(meta, body), options)
}
