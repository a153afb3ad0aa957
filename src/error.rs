//! Error types for mindful.

use thiserror::Error;

/// Errors raised by the timer, its capabilities and the CLI around them.
///
/// Nothing here is fatal to the interactive screen: the controller logs and
/// absorbs capability failures, and only startup problems reach `main`.
#[derive(Debug, Error)]
pub enum MindfulError {
    /// Configuration could not be resolved, read or written.
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An audio track refused to start.
    #[error("playback rejected: {0}")]
    Playback(String),

    /// A desktop notification could not be raised.
    #[error("notification failed: {0}")]
    Notification(String),

    /// A meditation length outside 1..=60 minutes.
    #[error("invalid duration: {0} (expected 1-60 minutes)")]
    InvalidDuration(String),

    /// The terminal could not be set up or drawn to.
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl MindfulError {
    /// Short, user-facing description used in the status line.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Playback(msg) => format!("Sound unavailable: {msg}"),
            Self::Notification(msg) => format!("Notification failed: {msg}"),
            other => other.to_string(),
        }
    }
}
