//! Snippet command - Decide one TypeScript sample

use crate::config::load_config;
use clap::Args;
use diptych_panel::{decide_snippet, Decision};
use std::io::Read;
use std::path::PathBuf;

#[derive(Args)]
pub struct SnippetArgs {
    /// File holding the snippet body (default: stdin)
    pub file: Option<PathBuf>,

    /// Fence meta, as written after ```ts
    #[arg(long, default_value = "")]
    pub meta: String,

    /// Treat the snippet as a twoslash sample
    #[arg(long)]
    pub twoslash: bool,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: SnippetArgs) {
    let config = load_config(args.config.as_deref());

    let body = match read_body(args.file.as_ref()) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Failed to read snippet: {}", e);
            std::process::exit(1);
        }
    };

    let meta = snippet_meta(&args.meta, args.twoslash, &config.rewrite.twoslash_token);

    match decide_snippet(&meta, body.trim_end_matches('\n'), &config.rewrite) {
        Ok(Decision::Diverged(view)) => {
            eprintln!("Diverged: JavaScript pane follows");
            println!("{}", view.js_pane);
        }
        Ok(Decision::Unchanged) => {
            eprintln!("Unchanged: TypeScript and JavaScript render identically");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_body(file: Option<&PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn snippet_meta(meta: &str, twoslash: bool, token: &str) -> String {
    let meta = meta.trim();
    match (twoslash, meta.is_empty()) {
        (false, _) => meta.to_string(),
        (true, true) => token.to_string(),
        (true, false) => format!("{} {}", token, meta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_meta() {
        assert_eq!(snippet_meta("", false, "twoslash"), "");
        assert_eq!(snippet_meta("", true, "twoslash"), "twoslash");
        assert_eq!(snippet_meta(" {2} ", true, "twoslash"), "twoslash {2}");
        assert_eq!(snippet_meta("{2}", false, "twoslash"), "{2}");
    }
}
