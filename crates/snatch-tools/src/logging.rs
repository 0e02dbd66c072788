//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries only the per-file report lines.
//! `RUST_LOG` overrides the configured level.

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
///
/// # Errors
/// Fails on anything else.
pub fn parse_level(level: &str) -> anyhow::Result<LevelFilter> {
    level
        .trim()
        .parse()
        .with_context(|| format!("invalid log level '{level}'"))
}

/// Install the global subscriber
///
/// A subscriber that is already installed is left in place.
///
/// # Errors
/// Fails if `level` is not a valid level name.
pub fn init(level: &str) -> anyhow::Result<()> {
    let default = parse_level(level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}
