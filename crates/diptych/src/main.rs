//! # diptych
//!
//! Diptych - TypeScript and JavaScript side by side in function documentation.
//!
//! ## Name Origin
//!
//! A **diptych** (/ˈdɪptɪk/) is a pair of painted panels joined by a hinge.
//! Every typed sample in a function page becomes one: the TypeScript the
//! author wrote and the JavaScript a reader would write, hinged by a toggle.

mod commands;
mod config;
mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "diptych")]
#[command(about = "TypeScript and JavaScript side by side in function documentation", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Log per-block decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite code blocks and assemble function pages (default command)
    #[command(visible_alias = "panel")]
    Transform(commands::transform::TransformArgs),

    /// Decide a single snippet and print its JavaScript
    Snippet(commands::snippet::SnippetArgs),

    /// Write the JSON Schema of diptych.config.json
    Schema(commands::schema::SchemaArgs),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(Commands::Transform(args)) => commands::transform::run(args),
        Some(Commands::Snippet(args)) => commands::snippet::run(args),
        Some(Commands::Schema(args)) => commands::schema::run(args),
        None => {
            // Default to transform command with default args
            commands::transform::run(commands::transform::TransformArgs::default());
        }
    }
}
