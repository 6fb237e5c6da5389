//! # diptych_atelier
//!
//! Atelier - The workshop where samples are reworked.
//! Turns a TypeScript documentation sample into plain JavaScript.
//!
//! ## Name Origin
//!
//! **Atelier** (/ˌætəlˈjeɪ/) is the workshop where a piece is prepared
//! before it is shown. Here the typed sample is cleaned of inspection
//! notations and stripped of its types so the untyped panel can be drawn.
//!
//! ## Pipeline
//!
//! ```text
//! twoslash sample ──strip_inspection_annotations──▶ TypeScript
//! TypeScript ──to_javascript (oxc_transformer)──▶ JavaScript
//! ```

mod downlevel;
mod error;
pub mod twoslash;

pub use downlevel::{to_javascript, TranspileOptions};
pub use error::TranspileError;
pub use twoslash::{is_twoslash_meta, strip_inspection_annotations};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_then_transpile() {
        let sample = "const count = ref<number>(0)\n//    ^?\n";
        let stripped = strip_inspection_annotations(sample);
        let js = to_javascript(&stripped, &TranspileOptions::default()).unwrap();

        assert!(js.contains("const count = ref(0)"));
        assert!(!js.contains('^'));
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: TranspileOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, TranspileOptions::default());
        assert_eq!(options.target, "esnext");
    }
}
