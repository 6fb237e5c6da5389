//! Format options for diptych_glyph.
//!
//! The defaults describe the canonical style used to compare a TypeScript
//! sample against its JavaScript counterpart: no semicolons, single quotes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source dialect of a snippet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// TypeScript module
    #[default]
    Ts,
    /// JavaScript module
    Js,
}

impl Dialect {
    /// Fence language tag for this dialect
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Ts => "ts",
            Dialect::Js => "js",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Formatting options for code samples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// Number of spaces per indentation level (default: 2)
    #[serde(default = "default_tab_width")]
    pub tab_width: u8,

    /// Use tabs instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Print semicolons at the ends of statements (default: false)
    #[serde(default)]
    pub semi: bool,

    /// Use single quotes instead of double quotes (default: true)
    #[serde(default = "default_true")]
    pub single_quote: bool,

    /// Collapse runs of newlines before parsing (default: true)
    #[serde(default = "default_true")]
    pub collapse_blank_lines: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::canonical()
    }
}

fn default_tab_width() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

impl FormatOptions {
    /// The style used when deciding whether two renderings are equivalent
    #[inline]
    pub fn canonical() -> Self {
        Self {
            tab_width: default_tab_width(),
            use_tabs: false,
            semi: false,
            single_quote: true,
            collapse_blank_lines: true,
        }
    }

    /// Get the indent string for one level
    #[inline]
    pub fn indent_string(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_width as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_defaults() {
        let options = FormatOptions::default();
        assert!(!options.semi);
        assert!(options.single_quote);
        assert!(options.collapse_blank_lines);
        assert_eq!(options.indent_string(), "  ");
    }

    #[test]
    fn test_deserialize_partial() {
        let options: FormatOptions = serde_json::from_str(r#"{"useTabs":true}"#).unwrap();
        assert!(options.use_tabs);
        assert!(options.single_quote);
        assert_eq!(options.indent_string(), "\t");
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Ts.to_string(), "ts");
        assert_eq!(Dialect::Js.tag(), "js");
    }
}
