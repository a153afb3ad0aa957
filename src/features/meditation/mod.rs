//! Meditation timer.
//!
//! Provides:
//! - A countdown session with presets and a 1-60 minute range
//! - An ambient sound loop with volume control
//! - Completion chime, desktop notice and vibration
//! - A deterministic timer queue driving all of the above

pub mod controller;
pub mod effects;
pub mod playback;
pub mod preferences;
pub mod schedule;
pub mod session;
pub mod timer;

pub use controller::{Capabilities, MeditationTimer, BANNER_LIFETIME, CHIME_CEILING, TICK_PERIOD};
pub use effects::{ChimeOutcome, CompletionReport};
pub use playback::Volume;
pub use preferences::{NotificationPreferences, PreferenceField};
pub use schedule::{Scheduler, TimerId};
pub use session::{Minutes, Phase, Rejected, MAX_MINUTES, MIN_MINUTES, PRESETS};
pub use timer::{format_clock, format_duration, parse_minutes, render_progress_bar};
