//! Options for code block rewriting.

use diptych_atelier::twoslash::TWOSLASH_TOKEN;
use diptych_atelier::TranspileOptions;
use diptych_glyph::FormatOptions;
use serde::{Deserialize, Serialize};

/// Options shared by every block of a rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOptions {
    /// Style used to canonicalize both renderings before comparing them
    #[serde(default)]
    pub format: FormatOptions,

    /// TypeScript transform settings
    #[serde(default)]
    pub transpile: TranspileOptions,

    /// Markup wrapped around the two panes
    #[serde(default)]
    pub markers: PaneMarkers,

    /// Work bounds per block and per document
    #[serde(default)]
    pub limits: Limits,

    /// Meta token marking samples with inspection annotations (default: twoslash)
    #[serde(default = "default_twoslash_token")]
    pub twoslash_token: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            format: FormatOptions::canonical(),
            transpile: TranspileOptions::default(),
            markers: PaneMarkers::default(),
            limits: Limits::default(),
            twoslash_token: default_twoslash_token(),
        }
    }
}

fn default_twoslash_token() -> String {
    TWOSLASH_TOKEN.to_string()
}

/// Markup recognized by the host renderer for the toggle and its panes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneMarkers {
    /// Toggle container component (default: CodeToggle)
    #[serde(default = "default_toggle")]
    pub toggle: String,

    /// Class of the TypeScript pane (default: code-block-ts)
    #[serde(default = "default_ts_class")]
    pub ts_class: String,

    /// Class of the JavaScript pane (default: code-block-js)
    #[serde(default = "default_js_class")]
    pub js_class: String,
}

impl Default for PaneMarkers {
    fn default() -> Self {
        Self {
            toggle: default_toggle(),
            ts_class: default_ts_class(),
            js_class: default_js_class(),
        }
    }
}

fn default_toggle() -> String {
    "CodeToggle".to_string()
}

fn default_ts_class() -> String {
    "code-block-ts".to_string()
}

fn default_js_class() -> String {
    "code-block-js".to_string()
}

impl PaneMarkers {
    /// Opening tag of the toggle container
    #[inline]
    pub fn open_tag(&self) -> String {
        format!("<{}>", self.toggle)
    }

    /// Closing tag of the toggle container
    #[inline]
    pub fn close_tag(&self) -> String {
        format!("</{}>", self.toggle)
    }
}

/// Bounds on formatting and transpile work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    /// Largest snippet body processed, in bytes (default: 64 KiB)
    #[serde(default = "default_max_block_bytes")]
    pub max_block_bytes: usize,

    /// Total snippet bytes processed per document (default: 1 MiB)
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_block_bytes: default_max_block_bytes(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_max_block_bytes() -> usize {
    64 * 1024
}

fn default_max_document_bytes() -> usize {
    1024 * 1024
}
