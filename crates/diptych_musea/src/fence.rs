//! Fenced code region detection.

use memchr::memchr_iter;
use std::ops::Range;

/// Byte ranges of fenced code regions, fence lines included.
///
/// A fence opens with three or more backticks or tildes and closes with a
/// line of at least as many of the same character. An unterminated fence
/// runs to the end of the document.
pub(crate) fn fenced_regions(document: &str) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut open: Option<(usize, u8, usize)> = None;
    let mut line_start = 0;

    let ends = memchr_iter(b'\n', document.as_bytes()).chain(std::iter::once(document.len()));
    for line_end in ends {
        if line_start > document.len() {
            break;
        }
        let line = document[line_start..line_end].trim_start();

        match open {
            None => {
                if let Some((marker, count)) = fence_marker(line) {
                    open = Some((line_start, marker, count));
                }
            }
            Some((start, marker, count)) => {
                if let Some((closing, closing_count)) = fence_marker(line) {
                    let rest = line.trim_start_matches(closing as char).trim();
                    if closing == marker && closing_count >= count && rest.is_empty() {
                        regions.push(start..line_end);
                        open = None;
                    }
                }
            }
        }

        line_start = line_end + 1;
    }

    if let Some((start, _, _)) = open {
        regions.push(start..document.len());
    }

    regions
}

/// Whether `offset` falls inside one of `regions`
pub(crate) fn is_fenced(regions: &[Range<usize>], offset: usize) -> bool {
    regions.iter().any(|region| region.contains(&offset))
}

fn fence_marker(line: &str) -> Option<(u8, usize)> {
    let marker = *line.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let count = line.bytes().take_while(|&b| b == marker).count();
    (count >= 3).then_some((marker, count))
}
