//! Tracing setup for the command-line front end
//!
//! Logs go to stderr so stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// Default level for a `-v` count; `RUST_LOG` overrides it
#[must_use]
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
