//! Fenced TypeScript block scanning.
//!
//! A block is a line of three backticks followed by `ts` and optional
//! space separated meta tokens, one or more body lines, and a closing line of
//! three backticks. Matching is non-greedy and non-overlapping, left to right.
//! Lines may end with `\r\n`.

use crate::options::PaneMarkers;
use diptych_atelier::twoslash::has_meta_flag;
use memchr::memchr_iter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TS_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^```ts(?P<meta> [^\r\n]*)?\r?\n(?P<body>.+?)\r?\n```[ \t]*\r?$").unwrap()
});

/// A fenced TypeScript sample extracted from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Position among the blocks of the document, starting at 0
    pub index: usize,
    /// Fence annotation exactly as written after `ts`, including its leading space
    pub meta: String,
    /// Snippet text between the fences
    pub body: String,
    /// Byte range of the fence in the original document
    pub span: Range<usize>,
    /// 1-based line of the opening fence
    pub line: usize,
}

impl CodeBlock {
    /// Build a block that is not tied to a document
    pub fn from_snippet(meta: &str, body: &str) -> Self {
        let meta = if meta.is_empty() || meta.starts_with(' ') {
            meta.to_string()
        } else {
            format!(" {}", meta)
        };

        Self {
            index: 0,
            meta,
            body: body.to_string(),
            span: 0..0,
            line: 1,
        }
    }

    /// Language tag of the block
    #[inline]
    pub fn language(&self) -> &'static str {
        "ts"
    }

    /// The opening fence line, byte-for-byte as in the source
    #[inline]
    pub fn opening_line(&self) -> String {
        format!("```ts{}", self.meta)
    }

    /// Check whether the meta carries `flag`
    #[inline]
    pub fn has_flag(&self, flag: &str) -> bool {
        has_meta_flag(&self.meta, flag)
    }
}

/// Collect every TypeScript block of `document` in source order.
///
/// Blocks inside an existing toggle container are left out, which keeps a
/// second rewrite of already rewritten output a no-op.
pub fn scan_blocks(document: &str, markers: &PaneMarkers) -> Vec<CodeBlock> {
    let guarded = toggle_regions(document, markers);
    let mut lines = LineCounter::new(document);
    let mut blocks = Vec::new();

    for caps in TS_FENCE.captures_iter(document) {
        let Some(fence) = caps.get(0) else {
            continue;
        };
        if guarded
            .iter()
            .any(|region| region.contains(&fence.start()))
        {
            continue;
        }

        let meta = caps.name("meta").map_or("", |m| m.as_str());
        let body = caps.name("body").map_or("", |m| m.as_str());
        let body = if body.contains('\r') {
            body.replace("\r\n", "\n")
        } else {
            body.to_string()
        };

        // The line ending after the closing fence stays in the document
        let mut span = fence.range();
        if document[..span.end].ends_with('\r') {
            span.end -= 1;
        }

        blocks.push(CodeBlock {
            index: blocks.len(),
            meta: meta.to_string(),
            body,
            line: lines.line_at(span.start),
            span,
        });
    }

    blocks
}

/// Byte ranges covered by toggle containers.
///
/// A container is recognized only in the shape a dual view renders: an
/// unfenced line that is exactly the open tag, directly followed by the
/// TypeScript pane line, up to the next unfenced line that is exactly the
/// close tag. An open tag without its close tag guards nothing.
fn toggle_regions(document: &str, markers: &PaneMarkers) -> Vec<Range<usize>> {
    let open = markers.open_tag();
    let close = markers.close_tag();
    let ts_pane = format!("<div class=\"{}\">", markers.ts_class);

    let lines = line_ranges(document);
    let mut regions = Vec::new();
    let mut fences = FenceTracker::default();
    let mut i = 0;

    while i < lines.len() {
        let line = &document[lines[i].clone()];
        if fences.feed(line) {
            i += 1;
            continue;
        }

        let opens = line == open
            && lines
                .get(i + 1)
                .is_some_and(|next| document[next.clone()] == *ts_pane);
        if opens {
            if let Some(offset) = closing_line(document, &lines[i + 1..], &close) {
                let last = i + 1 + offset;
                regions.push(lines[i].start..lines[last].end);
                i = last + 1;
                continue;
            }
        }

        i += 1;
    }

    regions
}

/// Index of the first unfenced line of `lines` that is exactly `close`
fn closing_line(document: &str, lines: &[Range<usize>], close: &str) -> Option<usize> {
    let mut fences = FenceTracker::default();
    lines.iter().position(|range| {
        let line = &document[range.clone()];
        !fences.feed(line) && line == close
    })
}

/// Line contents of `document`, without their `\n` or `\r\n` endings
fn line_ranges(document: &str) -> Vec<Range<usize>> {
    let bytes = document.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;

    for end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        let content_end = if end > start && bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };
        ranges.push(start..content_end);
        start = end + 1;
    }

    ranges
}

/// Tracks backtick and tilde fences line by line
#[derive(Default)]
struct FenceTracker {
    open: Option<(u8, usize)>,
}

impl FenceTracker {
    /// Feed the next line. Returns true for fence lines and fenced content.
    fn feed(&mut self, line: &str) -> bool {
        let line = line.trim_start();
        match self.open {
            None => {
                self.open = fence_marker(line);
                self.open.is_some()
            }
            Some((marker, count)) => {
                if let Some((closing, closing_count)) = fence_marker(line) {
                    let rest = line.trim_start_matches(closing as char).trim();
                    if closing == marker && closing_count >= count && rest.is_empty() {
                        self.open = None;
                    }
                }
                true
            }
        }
    }
}

fn fence_marker(line: &str) -> Option<(u8, usize)> {
    let marker = *line.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let count = line.bytes().take_while(|&b| b == marker).count();
    (count >= 3).then_some((marker, count))
}

/// Incremental byte offset to line number conversion
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(document: &'a str) -> Self {
        Self {
            bytes: document.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    /// Offsets must be queried in increasing order
    fn line_at(&mut self, offset: usize) -> usize {
        self.line += memchr_iter(b'\n', &self.bytes[self.offset..offset]).count();
        self.offset = offset;
        self.line
    }
}
