//! Path resolution for mindful configuration and data files.
//!
//! All mindful data lives in `~/.mindful/`:
//! - `config.yaml` - Main configuration file
//! - `sounds/` - Ambient loop and completion chime
//! - `mindful.log` - Log output of the interactive screen

use std::path::PathBuf;

use crate::error::MindfulError;

/// Default file name of the looping ambient track.
pub const AMBIENT_FILE: &str = "ambient-meditation.mp3";

/// Default file name of the completion chime.
pub const CHIME_FILE: &str = "meditation-bell.mp3";

/// Paths to mindful configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.mindful/`
    pub root: PathBuf,
    /// Config file: `~/.mindful/config.yaml`
    pub config_file: PathBuf,
    /// Sounds directory: `~/.mindful/sounds/`
    pub sounds: PathBuf,
    /// Log file: `~/.mindful/mindful.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MindfulError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| MindfulError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".mindful")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            sounds: root.join("sounds"),
            log_file: root.join("mindful.log"),
            root,
        }
    }

    /// Default location of the ambient track.
    #[must_use]
    pub fn ambient_track(&self) -> PathBuf {
        self.sounds.join(AMBIENT_FILE)
    }

    /// Default location of the completion chime.
    #[must_use]
    pub fn chime_track(&self) -> PathBuf {
        self.sounds.join(CHIME_FILE)
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), MindfulError> {
        for dir in [&self.root, &self.sounds] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    MindfulError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-mindful");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.sounds, root.join("sounds"));
        assert_eq!(paths.log_file, root.join("mindful.log"));
        assert_eq!(paths.chime_track(), root.join("sounds").join(CHIME_FILE));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.sounds.exists());
    }
}
