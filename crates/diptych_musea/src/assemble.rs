//! Function page assembly.

use crate::fence::{fenced_regions, is_fenced};
use crate::links::rewrite_links;
use crate::registry::Registry;
use crate::sections::{function_sections, PageContext};
use crate::AssembleOptions;
use diptych_panel::{BlockRewriter, RewriteReport};
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# [^\n]+$").unwrap());

static SECTION_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{2,6}[ \t]\S").unwrap());

static COMPONENT_USAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^## Components?(?:[ \t]Usage)?[ \t]*$").unwrap());

static DIRECTIVE_USAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^## Directives?(?:[ \t]Usage)?[ \t]*$").unwrap());

/// A fully assembled function page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    pub document: String,
    /// Report of the code block rewrite
    pub report: RewriteReport,
}

/// Assemble the page of one function.
///
/// Links are rewritten first, then code blocks, then the generated header is
/// inserted before the first section heading of the rewritten text and the
/// footer is appended.
pub fn assemble_function_page(
    document: &str,
    ctx: &PageContext,
    registry: &Registry,
    rewriter: &BlockRewriter,
    options: &AssembleOptions,
) -> AssembledPage {
    let linked = rewrite_links(document, registry, options, Some(&ctx.name));
    let output = rewriter.rewrite(&linked);

    AssembledPage {
        document: finish(output.document, ctx, registry, options),
        report: output.report,
    }
}

/// Same as [`assemble_function_page`], with code blocks decided on the
/// tokio blocking pool.
pub async fn assemble_function_page_async(
    document: &str,
    ctx: &PageContext,
    registry: &Registry,
    rewriter: &BlockRewriter,
    options: &AssembleOptions,
) -> AssembledPage {
    let linked = rewrite_links(document, registry, options, Some(&ctx.name));
    let output = rewriter.rewrite_async(&linked).await;

    AssembledPage {
        document: finish(output.document, ctx, registry, options),
        report: output.report,
    }
}

fn finish(
    mut document: String,
    ctx: &PageContext,
    registry: &Registry,
    options: &AssembleOptions,
) -> String {
    let sections = function_sections(ctx, registry, options);

    insert_after_first(
        &mut document,
        &TITLE,
        &format!("\n\n<FunctionInfo fn=\"{}\"/>", ctx.name),
    );
    insert_after_first(&mut document, &COMPONENT_USAGE, "\n\n<LearnMoreComponents />");
    insert_after_first(&mut document, &DIRECTIVE_USAGE, "\n\n<LearnMoreDirectives />");

    let at = header_index(&document);
    document.insert_str(at, &sections.header);

    if !document.is_empty() && !document.ends_with('\n') {
        document.push('\n');
    }
    document.push_str(&sections.footer);

    document
}

/// Insert `text` at the end of the first unfenced line matching `pattern`
fn insert_after_first(document: &mut String, pattern: &Regex, text: &str) {
    let regions = fenced_regions(document.as_str());
    let found = pattern
        .find_iter(document.as_str())
        .find(|m| !is_fenced(&regions, m.start()))
        .map(|m| m.end());

    if let Some(end) = found {
        document.insert_str(end, text);
    }
}

/// Where the generated header goes.
///
/// Before the line break preceding the first `##`-`######` heading, else
/// right after the front matter, else at the start.
fn header_index(document: &str) -> usize {
    let regions = fenced_regions(document);
    let heading = SECTION_HEADING
        .find_iter(document)
        .find(|m| !is_fenced(&regions, m.start()));

    if let Some(heading) = heading {
        return heading.start().saturating_sub(1);
    }

    front_matter_end(document).unwrap_or(0)
}

/// Offset just past the closing `---` line of leading front matter
fn front_matter_end(document: &str) -> Option<usize> {
    let rest = document.strip_prefix("---\n")?;
    let close = rest.find("\n---\n")?;
    Some("---\n".len() + close + "\n---\n".len())
}
