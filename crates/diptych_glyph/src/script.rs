//! Script/TypeScript canonicalization using oxc_codegen.
//!
//! The snippet is parsed with OXC and printed back by `oxc_codegen`, then a
//! line-oriented pass applies the parts of the canonical style codegen does
//! not cover: indentation width, optional semicolons and trailing whitespace.

use crate::error::FormatError;
use crate::options::{Dialect, FormatOptions};
use memchr::memchr_iter;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Format JavaScript/TypeScript content using oxc_codegen
pub fn format_script_content(
    source: &str,
    dialect: Dialect,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let source = if options.collapse_blank_lines {
        collapse_newlines(source)
    } else {
        source.replace("\r\n", "\n")
    };

    // Fast path for empty content
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let allocator = Allocator::default();
    let source_type = match dialect {
        Dialect::Ts => SourceType::ts(),
        Dialect::Js => SourceType::mjs(),
    };

    let parsed = Parser::new(&allocator, trimmed, source_type).parse();
    if !parsed.errors.is_empty() {
        let messages: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
        return Err(FormatError::parse(dialect, &messages));
    }

    let codegen_options = CodegenOptions {
        single_quote: options.single_quote,
        ..CodegenOptions::default()
    };
    let printed = Codegen::new()
        .with_options(codegen_options)
        .build(&parsed.program)
        .code;

    Ok(post_process(&printed, options))
}

/// Collapse runs of newlines into a single newline.
///
/// Line endings are normalized to `\n` on the way.
fn collapse_newlines(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut result = String::with_capacity(source.len());
    let mut line_start = 0;

    for newline_pos in memchr_iter(b'\n', bytes) {
        let line = &source[line_start..newline_pos];
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            result.push_str(line);
            result.push('\n');
        }
        line_start = newline_pos + 1;
    }

    result.push_str(&source[line_start..]);
    result
}

/// Lexical state carried from one printed line to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    SingleQuote,
    DoubleQuote,
    Template,
    BlockComment,
}

/// What the scanner learned about a single line
#[derive(Debug, Clone, Copy)]
struct LineInfo {
    /// The line begins outside any string, template or comment
    starts_in_code: bool,
    /// The line ends outside any string, template, comment or `${}` hole
    ends_in_code: bool,
    /// Byte offset of the last semicolon seen in code
    last_semi: Option<usize>,
    /// Byte offset of a trailing `//` comment
    comment_start: Option<usize>,
}

/// Minimal JS lexer that tracks strings, templates and comments across lines.
///
/// Regex literals are not recognized.
#[derive(Debug)]
struct LineScanner {
    mode: Mode,
    /// Brace depth for each open `${` hole, innermost last
    template_braces: Vec<u32>,
}

impl Default for LineScanner {
    fn default() -> Self {
        Self {
            mode: Mode::Code,
            template_braces: Vec::new(),
        }
    }
}

impl LineScanner {
    fn scan(&mut self, line: &str) -> LineInfo {
        let starts_in_code = self.mode == Mode::Code;
        let bytes = line.as_bytes();
        let len = bytes.len();
        let mut last_semi = None;
        let mut comment_start = None;
        let mut i = 0;

        while i < len {
            let b = bytes[i];
            let next = bytes.get(i + 1).copied();

            match self.mode {
                Mode::Code => match b {
                    b'/' if next == Some(b'/') => {
                        comment_start = Some(i);
                        break;
                    }
                    b'/' if next == Some(b'*') => {
                        self.mode = Mode::BlockComment;
                        i += 1;
                    }
                    b'\'' => self.mode = Mode::SingleQuote,
                    b'"' => self.mode = Mode::DoubleQuote,
                    b'`' => self.mode = Mode::Template,
                    b'{' => {
                        if let Some(depth) = self.template_braces.last_mut() {
                            *depth += 1;
                        }
                    }
                    b'}' => match self.template_braces.last().copied() {
                        Some(0) => {
                            self.template_braces.pop();
                            self.mode = Mode::Template;
                        }
                        Some(_) => {
                            if let Some(depth) = self.template_braces.last_mut() {
                                *depth -= 1;
                            }
                        }
                        None => {}
                    },
                    b';' => last_semi = Some(i),
                    _ => {}
                },
                Mode::SingleQuote | Mode::DoubleQuote => {
                    let quote = if self.mode == Mode::SingleQuote {
                        b'\''
                    } else {
                        b'"'
                    };
                    if b == b'\\' {
                        i += 1;
                    } else if b == quote {
                        self.mode = Mode::Code;
                    }
                }
                Mode::Template => {
                    if b == b'\\' {
                        i += 1;
                    } else if b == b'`' {
                        self.mode = Mode::Code;
                    } else if b == b'$' && next == Some(b'{') {
                        self.template_braces.push(0);
                        self.mode = Mode::Code;
                        i += 1;
                    }
                }
                Mode::BlockComment => {
                    if b == b'*' && next == Some(b'/') {
                        self.mode = Mode::Code;
                        i += 1;
                    }
                }
            }

            i += 1;
        }

        // Quoted strings cannot span lines
        if matches!(self.mode, Mode::SingleQuote | Mode::DoubleQuote) {
            self.mode = Mode::Code;
        }

        LineInfo {
            starts_in_code,
            ends_in_code: self.mode == Mode::Code && self.template_braces.is_empty(),
            last_semi,
            comment_start,
        }
    }
}

/// Apply the canonical style to codegen output
fn post_process(source: &str, options: &FormatOptions) -> String {
    let indent = options.indent_string();
    let mut scanner = LineScanner::default();
    let mut result = String::with_capacity(source.len() + source.len() / 4);
    // A removed semicolon must not glue the next statement onto this one
    let mut guard_next_line = false;

    for raw in source.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let info = scanner.scan(raw);

        let mut line = String::with_capacity(raw.len() + indent.len() * 4);
        let body_start = if info.starts_in_code {
            let depth = raw.bytes().take_while(|&b| b == b'\t').count();
            for _ in 0..depth {
                line.push_str(&indent);
            }
            depth
        } else {
            0
        };

        let removable_semi = if options.semi {
            None
        } else {
            removable_semicolon(raw, body_start, &info)
        };

        let body = &raw[body_start..];
        if guard_next_line && info.starts_in_code && !body.trim().is_empty() {
            if body.starts_with(['(', '[', '`']) {
                line.push(';');
            }
            guard_next_line = false;
        }

        match removable_semi {
            Some(pos) => {
                line.push_str(&raw[body_start..pos]);
                line.push_str(&raw[pos + 1..]);
                guard_next_line = true;
            }
            None => line.push_str(body),
        }

        if info.ends_in_code {
            result.push_str(line.trim_end());
        } else {
            result.push_str(&line);
        }
        result.push('\n');
    }

    result.trim().to_string()
}

/// Find a statement-terminating semicolon that can be dropped
#[inline]
fn removable_semicolon(raw: &str, body_start: usize, info: &LineInfo) -> Option<usize> {
    let pos = info.last_semi?;
    if !info.ends_in_code || pos < body_start {
        return None;
    }

    let tail_end = info.comment_start.unwrap_or(raw.len());
    if tail_end < pos || !raw[pos + 1..tail_end].trim().is_empty() {
        return None;
    }

    // A lone `;` is an empty statement
    if raw[body_start..pos].trim().is_empty() {
        return None;
    }

    Some(pos)
}
