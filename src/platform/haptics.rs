//! Vibration capability.
//!
//! Desktops have no vibration motor; [`TerminalBell`] rings the terminal bell
//! once per "on" segment instead.

use std::io::Write;
use std::time::Duration;

use crate::error::MindfulError;

/// Pattern pulsed alongside the completion notice: on, off, on (ms).
pub const COMPLETION_PATTERN: [u32; 3] = [200, 100, 200];

/// Single pulse used when the chime cannot play.
pub const FALLBACK_PULSE: [u32; 1] = [200];

/// Something that can pulse a vibration pattern.
#[cfg_attr(test, mockall::automock)]
pub trait Vibrator {
    /// Pulse `pattern`: alternating on/off durations in milliseconds,
    /// starting with "on".
    ///
    /// # Errors
    ///
    /// Returns an error if the device refused the pattern.
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), MindfulError>;
}

/// Bell-based stand-in for a vibration motor.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Vibrator for TerminalBell {
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), MindfulError> {
        if pattern.is_empty() {
            return Ok(());
        }
        let pattern = pattern.to_vec();

        std::thread::Builder::new()
            .name("mindful-bell".to_string())
            .spawn(move || {
                let mut stdout = std::io::stdout();
                for (i, ms) in pattern.iter().enumerate() {
                    if i % 2 == 0 {
                        stdout.write_all(b"\x07").ok();
                        stdout.flush().ok();
                    }
                    std::thread::sleep(Duration::from_millis(u64::from(*ms)));
                }
            })?;

        Ok(())
    }
}
