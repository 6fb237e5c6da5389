//! # diptych_glyph
//!
//! Glyph - The canonical letterforms for Diptych.
//! Deterministic formatter used to compare a TypeScript sample with the
//! JavaScript derived from it.
//!
//! ## Name Origin
//!
//! **Glyph** (/ɡlɪf/) is the visual form of a character. Two panels of a
//! diptych can only be compared when they are drawn in the same hand, and
//! `diptych_glyph` is that hand: both renderings of a sample pass through the
//! same options before they are compared.
//!
//! ## Example
//!
//! ```ignore
//! use diptych_glyph::{format_code, Dialect, FormatOptions};
//!
//! let code = format_code("const a = \"x\";", Dialect::Ts, &FormatOptions::canonical()).unwrap();
//! assert_eq!(code, "const a = 'x'");
//! ```

mod error;
mod options;
mod script;

pub use error::*;
pub use options::*;

/// Canonicalize a snippet in the given dialect.
///
/// Fails with [`FormatError`] when the snippet is not valid source for
/// `dialect`.
#[inline]
pub fn format_code(
    source: &str,
    dialect: Dialect,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    script::format_script_content(source, dialect, options)
}
