//! Configuration settings for mindful.
//!
//! Settings are loaded from `~/.mindful/config.yaml` once at startup. Changes
//! made on the session screen are never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::MindfulError;
use crate::features::meditation::{Minutes, NotificationPreferences};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Countdown settings.
    pub timer: TimerConfig,
    /// Ambient loop and chime settings.
    pub audio: AudioConfig,
    /// Completion reminder defaults.
    pub notifications: NotificationConfig,
}

/// Countdown settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Duration selected when the screen opens, in minutes (1-60).
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
}

/// Ambient loop and chime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Looping background track. Defaults to `~/.mindful/sounds/ambient-meditation.mp3`.
    #[serde(default)]
    pub ambient: Option<PathBuf>,
    /// One-shot completion chime. Defaults to `~/.mindful/sounds/meditation-bell.mp3`.
    #[serde(default)]
    pub chime: Option<PathBuf>,
    /// Initial ambient volume (0.0 - 1.0).
    #[serde(default = "default_volume")]
    pub volume: f32,
}

/// Completion reminder defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Raise a desktop notification when a session ends.
    #[serde(default)]
    pub desktop: bool,
    /// Play the completion chime.
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Pulse the vibration capability.
    #[serde(default = "default_true")]
    pub vibrate: bool,
    /// Body of the desktop notification.
    #[serde(default = "default_message")]
    pub message: String,
    /// What stands in for a vibration motor.
    #[serde(default)]
    pub haptics: Haptics,
}

/// Vibration backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Haptics {
    /// Ring the terminal bell for each pulse.
    #[default]
    Bell,
    /// No vibration capability.
    None,
}

// Default value functions for serde
const fn default_minutes() -> u32 {
    5
}

const fn default_volume() -> f32 {
    0.5
}

const fn default_true() -> bool {
    true
}

fn default_message() -> String {
    "Time for a mindful break! 🌿".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ambient: None,
            chime: None,
            volume: default_volume(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            desktop: false,
            sound: default_true(),
            vibrate: default_true(),
            message: default_message(),
            haptics: Haptics::default(),
        }
    }
}

impl TimerConfig {
    /// The configured default, validated.
    ///
    /// # Errors
    ///
    /// Returns `MindfulError::InvalidDuration` if the value is outside 1-60.
    pub fn minutes(&self) -> Result<Minutes, MindfulError> {
        Minutes::new(self.default_minutes)
    }
}

impl AudioConfig {
    /// Ambient track path, falling back to the sounds directory.
    #[must_use]
    pub fn ambient_path(&self, paths: &Paths) -> PathBuf {
        self.ambient.clone().unwrap_or_else(|| paths.ambient_track())
    }

    /// Chime path, falling back to the sounds directory.
    #[must_use]
    pub fn chime_path(&self, paths: &Paths) -> PathBuf {
        self.chime.clone().unwrap_or_else(|| paths.chime_track())
    }
}

impl NotificationConfig {
    /// Starting preferences for a session screen.
    #[must_use]
    pub fn preferences(&self) -> NotificationPreferences {
        NotificationPreferences {
            desktop_enabled: self.desktop,
            sound_enabled: self.sound,
            vibrate_enabled: self.vibrate,
            message: self.message.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, MindfulError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            MindfulError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            MindfulError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), MindfulError> {
        let contents = serde_yaml::to_string(self)?;

        std::fs::write(path, contents).map_err(|e| {
            MindfulError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    fn validate(&self) -> Result<(), MindfulError> {
        self.timer.minutes()?;
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(MindfulError::Config(format!(
                "audio.volume must be between 0 and 1, got {}",
                self.audio.volume
            )));
        }
        Ok(())
    }
}
