//! Logging setup for the command-line tool.
//!
//! Log lines go to stderr so report output on stdout stays clean.
//! `RUST_LOG` takes precedence over the level picked from `-q`/`-v`.

use std::io;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map quiet/verbose counts to a default level
pub fn level_for(quiet: u8, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (q, _) if q > 1 => LevelFilter::ERROR,
        (1, _) => LevelFilter::WARN,
        (_, 0) => LevelFilter::INFO,
        (_, 1) => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
