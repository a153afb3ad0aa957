//! Output formatting for mindful.
//!
//! Each formatter renders either colored text or pretty-printed JSON.

mod json;
mod pretty;

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::MindfulError;
use crate::tui::SessionSummary;

pub use json::*;
pub use pretty::*;

/// Format quotes based on output format
///
/// # Errors
///
/// Returns `MindfulError::Json` if JSON serialization fails.
pub fn format_quotes(quotes: &[&str], format: OutputFormat) -> Result<String, MindfulError> {
    match format {
        OutputFormat::Pretty => Ok(format_quotes_pretty(quotes)),
        OutputFormat::Json => format_quotes_json(quotes),
    }
}

/// Format the effective configuration based on output format
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_config(
    config: &Config,
    path: &Path,
    format: OutputFormat,
) -> Result<String, MindfulError> {
    match format {
        OutputFormat::Pretty => format_config_pretty(config, path),
        OutputFormat::Json => format_config_json(config, path),
    }
}

/// Format a file path based on output format
///
/// # Errors
///
/// Returns `MindfulError::Json` if JSON serialization fails.
pub fn format_path(path: &Path, format: OutputFormat) -> Result<String, MindfulError> {
    match format {
        OutputFormat::Pretty => Ok(path.display().to_string()),
        OutputFormat::Json => to_json(&serde_json::json!({ "path": path })),
    }
}

/// Format the end-of-screen summary based on output format
///
/// # Errors
///
/// Returns `MindfulError::Json` if JSON serialization fails.
pub fn format_summary(
    summary: &SessionSummary,
    format: OutputFormat,
) -> Result<String, MindfulError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}
