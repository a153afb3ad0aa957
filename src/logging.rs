//! Tracing setup.
//!
//! The filter comes from `MINDFUL_LOG`, then `RUST_LOG`, then defaults to
//! warnings only. The interactive screen owns the terminal, so it logs to a
//! file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::MindfulError;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MINDFUL_LOG";

const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr.
pub fn init_stderr() {
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter())
        .try_init();
}

/// Append logs to `path`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_file(path: &Path) -> Result<(), MindfulError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .with(filter())
        .try_init();
    Ok(())
}
