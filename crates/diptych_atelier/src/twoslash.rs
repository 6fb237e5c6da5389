//! Twoslash annotation handling.
//!
//! Samples marked `twoslash` carry inline notations for a companion type
//! inspection pass (`// ^?` queries, cut markers, handbook flags). They are
//! removed before transpiling. Compiler option lines and `// @include:`
//! directives are kept so the sample still compiles as a unit.

use once_cell::sync::Lazy;
use regex::Regex;

/// Meta token that marks a fence as a twoslash sample
pub const TWOSLASH_TOKEN: &str = "twoslash";

/// `// ^?`, `// ^|` and `// ^^^` lines
static QUERY_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*//\s*\^").unwrap());

/// A query written after code on the same line
static TRAILING_QUERY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*//\s*\^[?|]\s*$").unwrap());

static CUT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*//\s*---cut(?:-(?:before|after|start|end))?---\s*$").unwrap()
});

/// Handbook flags understood by twoslash itself, as opposed to compiler options
static HANDBOOK_FLAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*//\s*@(?:errors|noErrors|noErrorValidation|noErrorsCutted|showEmit|showEmittedFile|keepNotations|noStaticSemanticInfo|annotate|log|warn|error)\b",
    )
    .unwrap()
});

static INCLUDE_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*//\s*@include:\s*(\S+)").unwrap());

/// Check whether a fence meta string carries `flag` as one of its tokens.
///
/// Tokens are whitespace separated and compared case-insensitively.
#[inline]
pub fn has_meta_flag(meta: &str, flag: &str) -> bool {
    meta.split_whitespace()
        .any(|token| token.eq_ignore_ascii_case(flag))
}

/// Check whether a fence meta string marks a twoslash sample
#[inline]
pub fn is_twoslash_meta(meta: &str) -> bool {
    has_meta_flag(meta, TWOSLASH_TOKEN)
}

/// Remove inspection notations, producing plain TypeScript.
pub fn strip_inspection_annotations(code: &str) -> String {
    let mut lines = Vec::new();

    for line in code.lines() {
        if QUERY_LINE.is_match(line) || CUT_MARKER.is_match(line) || HANDBOOK_FLAG.is_match(line)
        {
            continue;
        }

        match TRAILING_QUERY.find(line) {
            Some(m) => lines.push(&line[..m.start()]),
            None => lines.push(line),
        }
    }

    let mut stripped = lines.join("\n");
    if code.ends_with('\n') {
        stripped.push('\n');
    }
    stripped
}

/// List the names referenced by `// @include:` directives, in order
pub fn include_directives(code: &str) -> Vec<&str> {
    code.lines()
        .filter_map(|line| INCLUDE_DIRECTIVE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_flag() {
        assert!(is_twoslash_meta("twoslash"));
        assert!(is_twoslash_meta("{1,3} TwoSlash"));
        assert!(!is_twoslash_meta("twoslash-like"));
        assert!(!is_twoslash_meta(""));
    }

    #[test]
    fn test_strips_query_lines() {
        let code = "const count = ref(0)\n//    ^?\nconst x = 1\n";
        assert_eq!(
            strip_inspection_annotations(code),
            "const count = ref(0)\nconst x = 1\n"
        );
    }

    #[test]
    fn test_strips_completion_and_highlight() {
        let code = "foo.\n//  ^|\nbar()\n// ^^^ highlighted\n";
        assert_eq!(strip_inspection_annotations(code), "foo.\nbar()\n");
    }

    #[test]
    fn test_strips_trailing_query() {
        let code = "const { x, y } = useMouse() // ^?";
        assert_eq!(
            strip_inspection_annotations(code),
            "const { x, y } = useMouse()"
        );
    }

    #[test]
    fn test_strips_cut_markers_but_keeps_boilerplate() {
        let code = "declare const el: HTMLElement\n// ---cut---\nuseFocus(el)";
        assert_eq!(
            strip_inspection_annotations(code),
            "declare const el: HTMLElement\nuseFocus(el)"
        );
    }

    #[test]
    fn test_strips_handbook_flags() {
        let code = "// @errors: 2304\n// @noErrors\nfoo()";
        assert_eq!(strip_inspection_annotations(code), "foo()");
    }

    #[test]
    fn test_keeps_compiler_directives() {
        let code = "// @include: main\n// @strict: true\nconst a = 1";
        assert_eq!(strip_inspection_annotations(code), code);
    }

    #[test]
    fn test_include_directives() {
        let code = "// @include: main\nconst a = 1\n// @include: extra\n";
        assert_eq!(include_directives(code), vec!["main", "extra"]);
    }
}
