//! JSON output formatting for mindful.

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::MindfulError;

/// Serialize any value as pretty-printed JSON
///
/// # Errors
///
/// Returns `MindfulError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, MindfulError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format quotes as JSON
///
/// # Errors
///
/// Returns `MindfulError::Json` if JSON serialization fails.
pub fn format_quotes_json(quotes: &[&str]) -> Result<String, MindfulError> {
    to_json(&json!({
        "count": quotes.len(),
        "items": quotes
    }))
}

/// Format the configuration as JSON
///
/// # Errors
///
/// Returns `MindfulError::Json` if JSON serialization fails.
pub fn format_config_json(config: &Config, path: &Path) -> Result<String, MindfulError> {
    to_json(&json!({
        "path": path,
        "exists": path.exists(),
        "config": config
    }))
}
