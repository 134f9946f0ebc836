//! Logging setup for the CLI

use std::io;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter level used when `RUST_LOG` is not set
#[must_use]
pub const fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Build the log filter, preferring `RUST_LOG` when it is set
#[must_use]
pub fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
}

/// Install the global subscriber
///
/// Logs go to stderr so that stdout carries only the manifest.
pub fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(build_filter(verbose))
        .init();
}
