//! Configuration management for mindful.
//!
//! This module handles loading configuration from `~/.mindful/`.

mod paths;
mod settings;

pub use paths::{Paths, AMBIENT_FILE, CHIME_FILE};
pub use settings::{AudioConfig, Config, Haptics, NotificationConfig, TimerConfig};
