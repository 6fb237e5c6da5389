//! Document-level block rewriting.
//!
//! Rewriting happens in three steps:
//!
//! 1. every block is collected eagerly with its span in the original text,
//!    and work limits are applied in source order;
//! 2. each block is decided independently, in parallel (rayon) or as
//!    concurrent blocking tasks (tokio);
//! 3. one left-to-right pass splices the replacements against the original
//!    offsets, ordered by block index.

use crate::block::{scan_blocks, CodeBlock};
use crate::decide::{decide_or_pass, Decision};
use crate::error::BlockError;
use crate::options::RewriteOptions;
use crate::report::{BlockOutcome, Diagnostic, RewriteOutput, RewriteReport};
use futures::future::join_all;
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;

/// A collected block and whether it will be processed
#[derive(Debug)]
enum Planned {
    Run(CodeBlock),
    Skip { block: CodeBlock, reason: BlockError },
}

/// A decided block, ready to be spliced
#[derive(Debug)]
struct Resolved {
    index: usize,
    line: usize,
    span: Range<usize>,
    outcome: BlockOutcome,
    replacement: Option<String>,
    error: Option<BlockError>,
}

impl Resolved {
    fn passthrough(block: &CodeBlock, outcome: BlockOutcome, error: BlockError) -> Self {
        Self {
            index: block.index,
            line: block.line,
            span: block.span.clone(),
            outcome,
            replacement: None,
            error: Some(error),
        }
    }
}

/// Rewrites the TypeScript blocks of documents into dual views.
///
/// Cheap to clone; options are shared between clones and worker tasks.
#[derive(Debug, Clone, Default)]
pub struct BlockRewriter {
    options: Arc<RewriteOptions>,
}

impl BlockRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    #[inline]
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite all blocks of `document`, deciding blocks in parallel
    pub fn rewrite(&self, document: &str) -> RewriteOutput {
        let options = self.options.as_ref();
        let resolved: Vec<Resolved> = self
            .plan(document)
            .into_par_iter()
            .map(|planned| resolve(planned, options))
            .collect();

        splice(document, resolved, options)
    }

    /// Rewrite all blocks of `document`, deciding each block on the blocking pool.
    ///
    /// Must be called from within a tokio runtime. A block whose task panics
    /// is passed through like any other failure.
    pub async fn rewrite_async(&self, document: &str) -> RewriteOutput {
        let tasks = self.plan(document).into_iter().map(|planned| {
            let options = Arc::clone(&self.options);
            async move {
                let (index, line, span) = match &planned {
                    Planned::Run(block) | Planned::Skip { block, .. } => {
                        (block.index, block.line, block.span.clone())
                    }
                };

                match tokio::task::spawn_blocking(move || resolve(planned, &options)).await {
                    Ok(resolved) => resolved,
                    Err(err) => {
                        let error = BlockError::Task(err.to_string());
                        tracing::warn!(
                            block = index,
                            line,
                            error = %error,
                            "code block passed through unchanged"
                        );
                        Resolved {
                            index,
                            line,
                            span,
                            outcome: BlockOutcome::Failed,
                            replacement: None,
                            error: Some(error),
                        }
                    }
                }
            }
        });

        let resolved = join_all(tasks).await;
        splice(document, resolved, &self.options)
    }

    /// Collect blocks and apply work limits in source order
    fn plan(&self, document: &str) -> Vec<Planned> {
        let limits = self.options.limits;
        let mut spent = 0usize;

        scan_blocks(document, &self.options.markers)
            .into_iter()
            .map(|block| {
                let size = block.body.len();
                if size > limits.max_block_bytes {
                    return Planned::Skip {
                        block,
                        reason: BlockError::Oversized {
                            size,
                            limit: limits.max_block_bytes,
                        },
                    };
                }
                if spent + size > limits.max_document_bytes {
                    return Planned::Skip {
                        block,
                        reason: BlockError::BudgetExhausted {
                            limit: limits.max_document_bytes,
                        },
                    };
                }
                spent += size;
                Planned::Run(block)
            })
            .collect()
    }
}

/// Decide one planned block
fn resolve(planned: Planned, options: &RewriteOptions) -> Resolved {
    let block = match planned {
        Planned::Run(block) => block,
        Planned::Skip { block, reason } => {
            tracing::warn!(
                block = block.index,
                line = block.line,
                error = %reason,
                "code block skipped"
            );
            return Resolved::passthrough(&block, BlockOutcome::Skipped, reason);
        }
    };

    match decide_or_pass(&block, options) {
        (_, Some(error)) => Resolved::passthrough(&block, BlockOutcome::Failed, error),
        (Decision::Unchanged, None) => {
            tracing::debug!(block = block.index, line = block.line, "code block unchanged");
            Resolved {
                index: block.index,
                line: block.line,
                span: block.span,
                outcome: BlockOutcome::Unchanged,
                replacement: None,
                error: None,
            }
        }
        (Decision::Diverged(view), None) => {
            tracing::debug!(block = block.index, line = block.line, "code block diverged");
            Resolved {
                index: block.index,
                line: block.line,
                span: block.span,
                outcome: BlockOutcome::Diverged,
                replacement: Some(view.render(&options.markers)),
                error: None,
            }
        }
    }
}

/// Rebuild the document from the original text and the resolved blocks
fn splice(document: &str, mut resolved: Vec<Resolved>, options: &RewriteOptions) -> RewriteOutput {
    resolved.sort_by_key(|r| r.index);

    let extra: usize = resolved
        .iter()
        .filter_map(|r| r.replacement.as_ref())
        .map(|s| s.len())
        .sum();
    let mut output = String::with_capacity(document.len() + extra);
    let mut report = RewriteReport::default();
    let mut cursor = 0;

    for block in resolved {
        output.push_str(&document[cursor..block.span.start]);
        match &block.replacement {
            Some(replacement) => output.push_str(replacement),
            None => output.push_str(&document[block.span.clone()]),
        }
        cursor = block.span.end;

        report.outcomes.push(block.outcome);
        if let Some(error) = block.error {
            report.diagnostics.push(Diagnostic {
                block: block.index,
                line: block.line,
                message: error.to_string(),
            });
        }
    }
    output.push_str(&document[cursor..]);

    tracing::trace!(
        blocks = report.blocks(),
        diverged = report.diverged(),
        toggle = %options.markers.toggle,
        "document rewritten"
    );

    RewriteOutput {
        document: output,
        report,
    }
}
