//! Cross-reference rewriting for function pages.

use crate::fence::fenced_regions;
use crate::registry::Registry;
use crate::AssembleOptions;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([A-Za-z_$][\w$]*)`").unwrap());

/// Rewrite links in the prose of `document`.
///
/// Outside code fences, absolute links to the site become root-relative and
/// inline code naming a known function becomes a link to its page. Inline
/// code that is already link text, and references to `current` (the page's
/// own function), are left alone.
pub fn rewrite_links(
    document: &str,
    registry: &Registry,
    options: &AssembleOptions,
    current: Option<&str>,
) -> String {
    let mut out = String::with_capacity(document.len() + 256);
    let mut cursor = 0;

    for region in fenced_regions(document) {
        out.push_str(&link_prose(
            &document[cursor..region.start],
            registry,
            options,
            current,
        ));
        out.push_str(&document[region.clone()]);
        cursor = region.end;
    }
    out.push_str(&link_prose(&document[cursor..], registry, options, current));

    out
}

fn link_prose<'a>(
    text: &'a str,
    registry: &Registry,
    options: &AssembleOptions,
    current: Option<&str>,
) -> Cow<'a, str> {
    let site_url = options.site_url.as_str();
    let text = if !site_url.is_empty() && text.contains(site_url) {
        Cow::Owned(text.replace(site_url, "/"))
    } else {
        Cow::Borrowed(text)
    };

    if !options.link_functions {
        return text;
    }

    let linked = match INLINE_CODE.replace_all(&text, |caps: &Captures| {
        let whole = &caps[0];
        let name = &caps[1];
        let start = caps.get(0).map_or(0, |m| m.start());

        if text[..start].ends_with('[') || current == Some(name) {
            return whole.to_string();
        }
        match registry.link_for(name) {
            Ok(link) => format!("[{}]({})", whole, link),
            Err(_) => whole.to_string(),
        }
    }) {
        Cow::Owned(s) => Some(s),
        Cow::Borrowed(_) => None,
    };

    match linked {
        Some(s) => Cow::Owned(s),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_json(
            r#"{
                "packages": [{ "name": "core", "npm": "@vueuse/core" }],
                "functions": [
                    { "name": "useCounter", "package": "core" },
                    { "name": "useToggle", "package": "core" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn rewrite(doc: &str, current: Option<&str>) -> String {
        rewrite_links(doc, &registry(), &AssembleOptions::default(), current)
    }

    #[test]
    fn test_links_known_functions() {
        assert_eq!(
            rewrite("See `useToggle` and `ref`.", None),
            "See [`useToggle`](/core/useToggle/) and `ref`."
        );
    }

    #[test]
    fn test_skips_self_reference() {
        assert_eq!(
            rewrite("`useCounter` pairs with `useToggle`", Some("useCounter")),
            "`useCounter` pairs with [`useToggle`](/core/useToggle/)"
        );
    }

    #[test]
    fn test_skips_existing_links() {
        let doc = "See [`useToggle`](/core/useToggle/).";
        assert_eq!(rewrite(doc, None), doc);
    }

    #[test]
    fn test_site_url_made_relative() {
        assert_eq!(
            rewrite("Read [the guide](https://vueuse.org/guide/).", None),
            "Read [the guide](/guide/)."
        );
    }

    #[test]
    fn test_code_fences_untouched() {
        let doc = "Use `useToggle`:\n\n```ts\n// `useToggle` https://vueuse.org/core/\nconst [on, toggle] = useToggle()\n```\n";
        let out = rewrite(doc, None);
        assert!(out.starts_with("Use [`useToggle`](/core/useToggle/):"));
        assert!(out.contains("// `useToggle` https://vueuse.org/core/\n"));
    }

    #[test]
    fn test_linking_disabled() {
        let options = AssembleOptions {
            link_functions: false,
            ..AssembleOptions::default()
        };
        let doc = "See `useToggle`.";
        assert_eq!(rewrite_links(doc, &registry(), &options, None), doc);
    }

    #[test]
    fn test_idempotent() {
        let once = rewrite("`useToggle` and https://vueuse.org/core/", None);
        assert_eq!(rewrite(&once, None), once);
    }
}
