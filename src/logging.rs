//! Structured logging setup.

use crate::constants::{DEFAULT_LOG_LEVEL, VERBOSE_LOG_LEVEL};
use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level name for the `--verbose` flag
pub fn log_level(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn setup_logging(verbose: bool) -> Result<()> {
    let log_level = log_level(verbose);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drivenote_converter={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .without_time()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to install logging subscriber")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
