//! Feature implementations for mindful.
//!
//! - Meditation timer (session, sound, completion reminders)
//! - Rotating quotes
//! - Breathing guide
//! - Shell completions

pub mod breathing;
pub mod completions;
pub mod meditation;
pub mod quotes;
