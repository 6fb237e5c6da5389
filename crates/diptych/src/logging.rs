//! Log output for the command line.

use tracing::Level;

/// Send library diagnostics to stderr.
///
/// Only warnings are shown unless `verbose`, which adds per-block decisions.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .init();
}
