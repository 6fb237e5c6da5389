//! Schema command - JSON Schema for editor autocompletion

use crate::config::write_schema;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SchemaArgs {
    /// Project directory (default: current directory)
    pub dir: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) {
    match write_schema(args.dir.as_deref()) {
        Ok(path) => eprintln!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("Failed to write schema: {}", e);
            std::process::exit(1);
        }
    }
}
