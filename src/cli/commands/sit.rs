//! The interactive session screen.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::args::{OutputFormat, SitArgs};
use crate::config::{Config, Paths};
use crate::error::MindfulError;
use crate::features::meditation::{Capabilities, MeditationTimer, Volume};
use crate::output::format_summary;
use crate::tui::{self, App};

/// Open the session screen and report what happened once it closes.
///
/// # Errors
///
/// Returns an error if the configured duration is invalid or the terminal
/// cannot be driven.
pub fn sit(
    args: &SitArgs,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, MindfulError> {
    let minutes = match args.minutes {
        Some(minutes) => minutes,
        None => config.timer.minutes()?,
    };
    let volume = Volume::new(args.volume.unwrap_or(config.audio.volume));

    let timer = MeditationTimer::new(
        Capabilities::from_config(config, paths),
        config.notifications.preferences(),
        volume,
        minutes,
    );
    let mut app = App::new(timer, StdRng::from_entropy());

    if args.music {
        app.apply(tui::Action::ToggleAmbient);
    }
    tracing::info!(minutes = minutes.get(), %volume, "session screen opened");

    tui::run(&mut app)?;
    format_summary(&app.summary(), format)
}
