//! Equivalence decision for a single block.
//!
//! Both renderings go through the same [`FormatOptions`](diptych_glyph::FormatOptions),
//! so a plain string comparison tells whether the JavaScript panel would show
//! anything the TypeScript panel does not.

use crate::block::CodeBlock;
use crate::error::BlockError;
use crate::options::{PaneMarkers, RewriteOptions};
use diptych_atelier::twoslash::include_directives;
use diptych_atelier::{strip_inspection_annotations, to_javascript};
use diptych_glyph::{format_code, Dialect};
use std::borrow::Cow;

/// Canonical TypeScript and JavaScript renderings of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub canonical_ts: String,
    pub canonical_js: String,
}

impl Rendering {
    /// Build both renderings of a block
    pub fn of(block: &CodeBlock, options: &RewriteOptions) -> Result<Self, BlockError> {
        let canonical_ts = format_code(&block.body, Dialect::Ts, &options.format)?;

        let normalized_ts = if block.has_flag(&options.twoslash_token) {
            let includes = include_directives(&block.body);
            if !includes.is_empty() {
                tracing::debug!(
                    block = block.index,
                    includes = ?includes,
                    "twoslash includes are transpiled as written"
                );
            }
            let stripped = strip_inspection_annotations(&block.body);
            Cow::Owned(format_code(&stripped, Dialect::Ts, &options.format)?)
        } else {
            Cow::Borrowed(canonical_ts.as_str())
        };

        let raw_js = to_javascript(&normalized_ts, &options.transpile)?;
        let canonical_js = format_code(&raw_js, Dialect::Js, &options.format)?;

        Ok(Self {
            canonical_ts,
            canonical_js,
        })
    }

    #[inline]
    pub fn is_equivalent(&self) -> bool {
        self.canonical_ts == self.canonical_js
    }
}

/// The two panes shown for a diverged block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualView {
    /// Opening fence of the TypeScript pane, as the author wrote it
    pub ts_fence: String,
    /// TypeScript pane body, as the author wrote it
    pub ts_pane: String,
    /// JavaScript pane body, canonicalized
    pub js_pane: String,
}

impl DualView {
    /// Render the toggle container with both panes
    pub fn render(&self, markers: &PaneMarkers) -> String {
        let mut out = String::with_capacity(
            self.ts_pane.len() + self.js_pane.len() + self.ts_fence.len() + 160,
        );

        out.push_str(&markers.open_tag());
        out.push('\n');

        push_pane(&mut out, &markers.ts_class, &self.ts_fence, &self.ts_pane);
        out.push('\n');
        push_pane(&mut out, &markers.js_class, "```js", &self.js_pane);
        out.push('\n');

        out.push_str(&markers.close_tag());
        out
    }
}

fn push_pane(out: &mut String, class: &str, fence: &str, body: &str) {
    out.push_str("<div class=\"");
    out.push_str(class);
    out.push_str("\">\n\n");
    out.push_str(fence);
    out.push('\n');
    out.push_str(body);
    out.push_str("\n```\n\n</div>");
}

/// Result of comparing the two renderings of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The block is shown as written
    Unchanged,
    /// The block is replaced by a toggle between both panes
    Diverged(DualView),
}

impl Decision {
    #[inline]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Decision::Diverged(_))
    }
}

/// Decide whether a block needs a JavaScript pane.
///
/// Errors are returned as-is; see [`decide_or_pass`] for the fail-open form.
pub fn decide(block: &CodeBlock, options: &RewriteOptions) -> Result<Decision, BlockError> {
    let rendering = Rendering::of(block, options)?;

    if rendering.is_equivalent() {
        return Ok(Decision::Unchanged);
    }

    Ok(Decision::Diverged(DualView {
        ts_fence: block.opening_line(),
        ts_pane: block.body.clone(),
        js_pane: rendering.canonical_js,
    }))
}

/// Decide with the fail-open policy: any error yields `Unchanged`.
///
/// The error is logged and handed back so callers can report it.
pub fn decide_or_pass(
    block: &CodeBlock,
    options: &RewriteOptions,
) -> (Decision, Option<BlockError>) {
    match decide(block, options) {
        Ok(decision) => (decision, None),
        Err(err) => {
            tracing::warn!(
                block = block.index,
                line = block.line,
                error = %err,
                "code block passed through unchanged"
            );
            (Decision::Unchanged, Some(err))
        }
    }
}
