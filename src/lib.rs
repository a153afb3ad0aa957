//! mindful - a terminal meditation timer
//!
//! A countdown with presets and a 1-60 minute range, an optional ambient
//! loop, a completion chime, desktop notices and a bell, plus rotating
//! quotes and a breathing guide.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod platform;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::MindfulError;
pub use features::meditation::MeditationTimer;
