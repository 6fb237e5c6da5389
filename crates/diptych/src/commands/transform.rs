//! Transform command - Dual-view code blocks and function pages

use crate::config::{load_config, DiptychConfig};
use clap::Args;
use diptych_musea::{assemble_function_page, PageContext, Registry};
use diptych_panel::{BlockRewriter, Diagnostic};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Demo component names looked up next to a function page, in order
const DEMO_FILES: [&str; 2] = ["demo.vue", "demo.client.vue"];

#[derive(Args, Default)]
pub struct TransformArgs {
    /// Markdown files or directories (default: .)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Rewrite code blocks in place
    #[arg(short, long, conflicts_with = "out_dir")]
    pub write: bool,

    /// Write assembled pages under this directory, mirroring input paths
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Exit with an error if any code block would be rewritten
    #[arg(long)]
    pub check: bool,

    /// Exit with an error if any code block could not be processed
    #[arg(long)]
    pub strict: bool,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Shared state of one transform run
struct Session {
    config: DiptychConfig,
    registry: Option<Registry>,
    rewriter: BlockRewriter,
}

/// Result of one file
struct FileResult {
    changed: bool,
    assembled: bool,
    diagnostics: Vec<Diagnostic>,
}

pub fn run(args: TransformArgs) {
    let config = load_config(args.config.as_deref());

    let registry = match config.registry.as_deref().map(load_registry).transpose() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("Error loading registry: {}", err);
            std::process::exit(1);
        }
    };

    let session = Session {
        rewriter: BlockRewriter::new(config.rewrite.clone()),
        registry,
        config,
    };

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let files = collect_files(&paths);

    if files.is_empty() {
        eprintln!("No .md files found in the given paths");
        return;
    }

    eprintln!("Found {} .md file(s)", files.len());

    let print = files.len() == 1 && !args.write && !args.check && args.out_dir.is_none();

    let has_errors = AtomicBool::new(false);
    let files_changed = AtomicUsize::new(0);
    let files_assembled = AtomicUsize::new(0);
    let files_errored = AtomicUsize::new(0);
    let block_diagnostics = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match process_file(path, &session, &args, print) {
            Ok(result) => {
                if result.changed {
                    files_changed.fetch_add(1, Ordering::Relaxed);
                    if args.check {
                        has_errors.store(true, Ordering::Relaxed);
                    }
                }
                if result.assembled {
                    files_assembled.fetch_add(1, Ordering::Relaxed);
                }
                for diagnostic in &result.diagnostics {
                    eprintln!("{}: {}", path.display(), diagnostic);
                }
                if !result.diagnostics.is_empty() {
                    block_diagnostics.fetch_add(result.diagnostics.len(), Ordering::Relaxed);
                    if args.strict {
                        has_errors.store(true, Ordering::Relaxed);
                    }
                }
            }
            Err(err) => {
                eprintln!("Error transforming {}: {}", path.display(), err);
                files_errored.fetch_add(1, Ordering::Relaxed);
                has_errors.store(true, Ordering::Relaxed);
            }
        }
    });

    // Print summary
    let changed = files_changed.load(Ordering::Relaxed);
    let assembled = files_assembled.load(Ordering::Relaxed);
    let errored = files_errored.load(Ordering::Relaxed);
    let diagnostics = block_diagnostics.load(Ordering::Relaxed);

    eprintln!();
    if args.check {
        eprintln!("Checked {} file(s)", files.len());
        if changed > 0 {
            eprintln!("  {} file(s) would be rewritten", changed);
        }
    } else if args.write {
        eprintln!("Transformed {} file(s)", files.len());
        if changed > 0 {
            eprintln!("  {} file(s) rewritten", changed);
        }
    } else if let Some(out_dir) = &args.out_dir {
        eprintln!("Transformed {} file(s) into {}", files.len(), out_dir.display());
        if assembled > 0 {
            eprintln!("  {} function page(s) assembled", assembled);
        }
    } else if !print {
        eprintln!(
            "Checked {} file(s) (use --write or --out-dir to apply changes)",
            files.len()
        );
        if changed > 0 {
            eprintln!("  {} file(s) would be rewritten", changed);
        }
    }

    if diagnostics > 0 {
        eprintln!("  {} code block(s) passed through unchanged", diagnostics);
    }
    if errored > 0 {
        eprintln!("  {} file(s) had errors", errored);
    }

    if has_errors.load(Ordering::Relaxed) {
        std::process::exit(1);
    }
}

fn load_registry(path: &Path) -> Result<Registry, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Registry::from_json(&source).map_err(|e| format!("{}: {}", path.display(), e))
}

fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        // Use ignore crate to walk directories respecting .gitignore
        let walker = WalkBuilder::new(path)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker.filter_map(Result::ok) {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                files.push(path.to_path_buf());
            }
        }
    }

    // Remove duplicates
    files.sort();
    files.dedup();

    files
}

fn process_file(
    path: &Path,
    session: &Session,
    args: &TransformArgs,
    print: bool,
) -> Result<FileResult, String> {
    let source = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    if args.check || args.write {
        let rewritten = session.rewriter.rewrite(&source);
        let changed = rewritten.changed();

        if changed && args.check {
            eprintln!("Would rewrite: {}", path.display());
        } else if changed {
            fs::write(path, &rewritten.document)
                .map_err(|e| format!("Failed to write file: {}", e))?;
            eprintln!("Rewrote: {}", path.display());
        }
        return Ok(FileResult {
            changed,
            assembled: false,
            diagnostics: rewritten.report.diagnostics,
        });
    }

    let (document, result) = render(path, &source, session);

    if let Some(out_dir) = &args.out_dir {
        let target = out_dir.join(relative_output_path(path));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        fs::write(&target, &document).map_err(|e| format!("Failed to write file: {}", e))?;
    } else if print {
        print!("{}", document);
    } else if result.changed || result.assembled {
        eprintln!("Would rewrite: {}", path.display());
    }

    Ok(result)
}

/// Assemble `source` when it is a known function page, else rewrite its blocks.
///
/// Each code block is decided once either way.
fn render(path: &Path, source: &str, session: &Session) -> (String, FileResult) {
    let context = session
        .registry
        .as_ref()
        .and_then(|registry| page_context(path, registry, session.config.types_dir.as_deref()));

    match (&session.registry, context) {
        (Some(registry), Some(ctx)) => {
            tracing::debug!(file = %path.display(), function = %ctx.name, "assembling function page");
            let page = assemble_function_page(
                source,
                &ctx,
                registry,
                &session.rewriter,
                &session.config.assemble,
            );
            let result = FileResult {
                changed: page.report.diverged() > 0,
                assembled: true,
                diagnostics: page.report.diagnostics,
            };
            (page.document, result)
        }
        _ => {
            let rewritten = session.rewriter.rewrite(source);
            let result = FileResult {
                changed: rewritten.changed(),
                assembled: false,
                diagnostics: rewritten.report.diagnostics,
            };
            (rewritten.document, result)
        }
    }
}

/// Page context of `<package>/<function>/index.md`, when the function is known
fn page_context(path: &Path, registry: &Registry, types_dir: Option<&Path>) -> Option<PageContext> {
    if path.file_name()? != "index.md" {
        return None;
    }
    let function_dir = path.parent()?;
    let name = registry.resolve_function_name(function_dir.file_name()?.to_str()?)?;
    let package = registry.function(name).ok()?.package.clone();

    let mut ctx = PageContext::new(package, name);

    if let Some(demo) = DEMO_FILES
        .iter()
        .find(|demo| function_dir.join(demo).is_file())
    {
        ctx = ctx.with_demo(*demo);
    }

    if let Some(types_dir) = types_dir {
        let types_path = types_dir.join(&ctx.package).join(&ctx.name).join("index.d.ts");
        match fs::read_to_string(&types_path) {
            Ok(types) => ctx = ctx.with_types(types),
            Err(_) => {
                tracing::debug!(path = %types_path.display(), "no type declarations");
            }
        }
    }

    Some(ctx)
}

/// Path of `path` below the output directory
fn relative_output_path(path: &Path) -> PathBuf {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf());

    relative
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"{
        "packages": [{ "name": "core", "npm": "@vueuse/core" }],
        "functions": [{ "name": "useCounter", "package": "core" }]
    }"#;

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("core/useCounter");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.md"), "# useCounter\n").unwrap();
        fs::write(nested.join("index.ts"), "export {}\n").unwrap();
        fs::write(dir.path().join("README.md"), "# Readme\n").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "md")));
    }

    #[test]
    fn test_page_context() {
        let dir = tempfile::tempdir().unwrap();
        let function_dir = dir.path().join("core/usecounter");
        fs::create_dir_all(&function_dir).unwrap();
        fs::write(function_dir.join("index.md"), "# useCounter\n").unwrap();
        fs::write(function_dir.join("demo.client.vue"), "<template/>\n").unwrap();

        let types_dir = dir.path().join("types");
        fs::create_dir_all(types_dir.join("core/useCounter")).unwrap();
        fs::write(
            types_dir.join("core/useCounter/index.d.ts"),
            "export declare function useCounter(): void\n",
        )
        .unwrap();

        let registry = Registry::from_json(REGISTRY).unwrap();
        let ctx = page_context(&function_dir.join("index.md"), &registry, Some(&types_dir)).unwrap();
        assert_eq!(ctx.package, "core");
        assert_eq!(ctx.name, "useCounter");
        assert_eq!(ctx.demo.as_deref(), Some("demo.client.vue"));
        assert!(ctx.types.unwrap().contains("useCounter"));
    }

    #[test]
    fn test_page_context_requires_known_index() {
        let registry = Registry::from_json(REGISTRY).unwrap();
        assert!(page_context(Path::new("core/useCounter/notes.md"), &registry, None).is_none());
        assert!(page_context(Path::new("core/useOther/index.md"), &registry, None).is_none());
    }

    #[test]
    fn test_write_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("guide.md");
        fs::write(&file, "```ts\nconst a: number = 1\n```\n").unwrap();

        let session = Session {
            config: DiptychConfig::default(),
            registry: None,
            rewriter: BlockRewriter::default(),
        };
        let args = TransformArgs {
            write: true,
            ..TransformArgs::default()
        };

        let result = process_file(&file, &session, &args, false).unwrap();
        assert!(result.changed);
        let written = fs::read_to_string(&file).unwrap();
        assert!(written.starts_with("<CodeToggle>"));

        let again = process_file(&file, &session, &args, false).unwrap();
        assert!(!again.changed);
        assert_eq!(fs::read_to_string(&file).unwrap(), written);
    }

    #[test]
    fn test_out_dir_assembles_pages() {
        let dir = tempfile::tempdir().unwrap();
        let function_dir = dir.path().join("core/useCounter");
        fs::create_dir_all(&function_dir).unwrap();
        let file = function_dir.join("index.md");
        fs::write(&file, "# useCounter\n\n## Usage\n\n```ts\nconst a: number = 1\n```\n").unwrap();

        let out_dir = dir.path().join("out");
        let session = Session {
            config: DiptychConfig::default(),
            registry: Some(Registry::from_json(REGISTRY).unwrap()),
            rewriter: BlockRewriter::default(),
        };
        let args = TransformArgs {
            out_dir: Some(out_dir.clone()),
            ..TransformArgs::default()
        };

        let result = process_file(&file, &session, &args, false).unwrap();
        assert!(result.assembled);
        assert!(result.diagnostics.is_empty());

        let target = out_dir.join(relative_output_path(&file));
        let page = fs::read_to_string(target).unwrap();
        assert!(page.contains("<FunctionInfo fn=\"useCounter\"/>"));
        assert!(page.contains("## Source"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "# useCounter\n\n## Usage\n\n```ts\nconst a: number = 1\n```\n");
    }

    #[test]
    fn test_render_decides_page_blocks_once() {
        let dir = tempfile::tempdir().unwrap();
        let function_dir = dir.path().join("core/useCounter");
        fs::create_dir_all(&function_dir).unwrap();
        let file = function_dir.join("index.md");
        let source = "# useCounter\n\n## Usage\n\n```ts\nconst a: number = 1\n```\n\n```ts\nconst = ;\n```\n";

        let session = Session {
            config: DiptychConfig::default(),
            registry: Some(Registry::from_json(REGISTRY).unwrap()),
            rewriter: BlockRewriter::default(),
        };

        let (document, result) = render(&file, source, &session);
        assert!(result.assembled);
        assert!(result.changed);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 9);
        assert_eq!(document.matches("<CodeToggle>").count(), 1);
        assert!(document.contains("```ts\nconst = ;\n```"));
    }

    #[test]
    fn test_render_without_registry_rewrites_blocks() {
        let session = Session {
            config: DiptychConfig::default(),
            registry: None,
            rewriter: BlockRewriter::default(),
        };

        let (document, result) = render(Path::new("guide.md"), "```ts\nconst a = 1\n```\n", &session);
        assert!(!result.assembled);
        assert!(!result.changed);
        assert_eq!(document, "```ts\nconst a = 1\n```\n");
    }

    #[test]
    fn test_relative_output_path_drops_root() {
        let relative = relative_output_path(Path::new("/abs/core/useCounter/index.md"));
        assert!(relative.is_relative());
        assert!(relative.ends_with("core/useCounter/index.md"));
    }
}
