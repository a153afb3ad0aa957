//! Countdown session state machine.
//!
//! A [`Session`] knows nothing about clocks or side effects. It is told when a
//! second has passed and reports whether that tick expired the countdown; the
//! controller decides when ticks happen and what expiry triggers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MindfulError;

/// Quick-select durations offered next to the range input.
pub const PRESETS: [u32; 4] = [5, 10, 15, 20];

/// Shortest selectable meditation.
pub const MIN_MINUTES: u32 = 1;

/// Longest selectable meditation.
pub const MAX_MINUTES: u32 = 60;

/// A validated meditation length in whole minutes (1-60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Minutes(u32);

impl Minutes {
    /// Validate a minute count.
    ///
    /// # Errors
    ///
    /// Returns `MindfulError::InvalidDuration` outside 1-60.
    pub fn new(minutes: u32) -> Result<Self, MindfulError> {
        if (MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(MindfulError::InvalidDuration(minutes.to_string()))
        }
    }

    /// The minute count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Length of the countdown in seconds.
    #[must_use]
    pub const fn as_seconds(self) -> u32 {
        self.0 * 60
    }
}

impl Default for Minutes {
    fn default() -> Self {
        Self(PRESETS[0])
    }
}

impl TryFrom<u32> for Minutes {
    type Error = MindfulError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minutes> for u32 {
    fn from(value: Minutes) -> Self {
        value.0
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minute{}", self.0, if self.0 == 1 { "" } else { "s" })
    }
}

/// Discrete state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No countdown; the duration may be changed.
    Idle,
    /// Counting down.
    Running,
    /// Countdown held at its current value.
    Paused,
}

impl Phase {
    /// Whether a session is underway (running or paused).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// The operation needs an idle session.
    SessionActive,
    /// The operation needs a running or paused session.
    NotActive,
    /// The requested length is outside 1-60 minutes.
    InvalidDuration(u32),
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionActive => write!(f, "a session is already underway"),
            Self::NotActive => write!(f, "no session is underway"),
            Self::InvalidDuration(m) => write!(f, "{m} is not between 1 and 60 minutes"),
        }
    }
}

/// Result of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The tick did not apply (session not running).
    Ignored,
    /// One second was taken off the countdown.
    Counted {
        /// Seconds left after this tick.
        remaining: u32,
    },
    /// The countdown reached zero and the session is idle again.
    Expired,
}

/// One countdown run plus the selected duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    selected: Minutes,
    remaining_seconds: u32,
    phase: Phase,
}

impl Session {
    /// An idle session with the given selection.
    #[must_use]
    pub const fn new(selected: Minutes) -> Self {
        Self {
            selected,
            remaining_seconds: 0,
            phase: Phase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Selected duration.
    #[must_use]
    pub const fn selected(&self) -> Minutes {
        self.selected
    }

    /// Whether a session is underway.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Change the selected duration. Only allowed while idle.
    ///
    /// # Errors
    ///
    /// Rejects the change while a session is underway or when `minutes` is
    /// outside 1-60; the session is left untouched either way.
    pub fn select(&mut self, minutes: u32) -> Result<(), Rejected> {
        if self.is_active() {
            return Err(Rejected::SessionActive);
        }
        self.selected = Minutes::new(minutes).map_err(|_| Rejected::InvalidDuration(minutes))?;
        Ok(())
    }

    /// Begin counting down from the selected duration.
    ///
    /// # Errors
    ///
    /// Rejects the start while a session is already underway.
    pub fn start(&mut self) -> Result<(), Rejected> {
        if self.is_active() {
            return Err(Rejected::SessionActive);
        }
        self.remaining_seconds = self.selected.as_seconds();
        self.phase = Phase::Running;
        Ok(())
    }

    /// Flip between running and paused without touching the countdown.
    ///
    /// # Errors
    ///
    /// Rejects the toggle while idle.
    pub fn toggle_pause(&mut self) -> Result<Phase, Rejected> {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Idle => return Err(Rejected::NotActive),
        };
        Ok(self.phase)
    }

    /// Abandon the countdown from any phase.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.remaining_seconds = 0;
    }

    /// Take one second off a running countdown.
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::Running {
            return Tick::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.phase = Phase::Idle;
            Tick::Expired
        } else {
            Tick::Counted {
                remaining: self.remaining_seconds,
            }
        }
    }

    /// Fraction of the countdown still left (1.0 at start, 0.0 when done).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction_left(&self) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        (f64::from(self.remaining_seconds) / f64::from(self.selected.as_seconds())).min(1.0)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Minutes::default())
    }
}
