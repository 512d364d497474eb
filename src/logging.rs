//! Shared `tracing` setup for the three binaries.
//!
//! Each binary exposes a repeatable `-v` flag (`ArgAction::Count`); this
//! module turns that count into a filter directive scoped to this crate so
//! that `-v` doesn't also flood the terminal with every dependency's trace
//! output.

use tracing_subscriber::EnvFilter;

/// Initialises the global tracing subscriber for the given verbosity count.
///
/// - 0: warnings only
/// - 1 (`-v`): info
/// - 2 (`-vv`): debug
/// - 3+ (`-vvv`): trace
pub fn init(verbosity: u8) {
    let directive = match verbosity {
        0 => "corpus_pipeline=warn",
        1 => "corpus_pipeline=info",
        2 => "corpus_pipeline=debug",
        _ => "corpus_pipeline=trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
