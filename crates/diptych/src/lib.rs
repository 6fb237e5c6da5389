//! # Diptych
//!
//! TypeScript and JavaScript side by side in function documentation.
//!
//! This crate re-exports all Diptych sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`glyph`] - Canonical formatting of TypeScript and JavaScript snippets
//! - [`atelier`] - TypeScript to JavaScript downleveling and twoslash stripping
//! - [`panel`] - Code block scanning and dual-view rewriting
//! - [`musea`] - Function page assembly

/// Canonical formatting of TypeScript and JavaScript snippets.
pub use diptych_glyph as glyph;

/// TypeScript to JavaScript downleveling and twoslash stripping.
pub use diptych_atelier as atelier;

/// Code block scanning and dual-view rewriting.
pub use diptych_panel as panel;

/// Function page assembly.
pub use diptych_musea as musea;
