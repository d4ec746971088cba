use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "goreleaser-resolve.log";

/// Default filter directive, overridden by RUST_LOG
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "goreleaser_resolve=debug"
    } else {
        "goreleaser_resolve=info"
    }
}

fn create_log_dir(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))
}

/// Initialize logging for the goreleaser-resolve CLI
///
/// Human-readable output goes to stderr, JSON lines to `<log_dir>/goreleaser-resolve.log`.
///
/// The log level can be controlled via the RUST_LOG environment variable:
/// - RUST_LOG=goreleaser_resolve=debug (feed URLs, tag counts, resolved tags)
/// - RUST_LOG=goreleaser_resolve=warn  (warnings and errors only)
pub fn init(log_dir: &Path, verbose: bool) -> Result<()> {
    create_log_dir(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
