//! Terminal User Interface (TUI) for mindful.
//!
//! The session screen: countdown, presets and slider, ambient sound controls,
//! rotating quotes and the breathing circle. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Overlay, SettingsPanel};
pub use event::Action;

use std::io;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use serde::Serialize;

use crate::error::MindfulError;
use crate::features::meditation::CompletionReport;

/// Redraw interval; also the longest a key press waits.
const FRAME: Duration = Duration::from_millis(100);

/// What happened while the session screen was open.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub selected_minutes: u32,
    pub sessions_completed: u32,
    pub last_completion: Option<CompletionReport>,
}

impl SessionSummary {
    /// Time the screen was open.
    #[must_use]
    pub fn duration(&self) -> Duration {
        (self.ended_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(app: &mut App) -> Result<(), MindfulError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| MindfulError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| MindfulError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| MindfulError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, app);

    // Sound and timers go before the terminal is handed back
    app.timer.teardown();
    app.quotes.stop();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), MindfulError> {
    let origin = Instant::now();

    while !app.should_quit {
        app.advance(origin.elapsed());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| MindfulError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::poll_action(app, FRAME)? {
            app.apply(action);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_duration() {
        let ended_at = Local::now();
        let summary = SessionSummary {
            started_at: ended_at - chrono::Duration::seconds(90),
            ended_at,
            selected_minutes: 5,
            sessions_completed: 0,
            last_completion: None,
        };
        assert_eq!(summary.duration(), Duration::from_secs(90));
    }

    #[test]
    fn test_summary_never_negative() {
        let started_at = Local::now();
        let summary = SessionSummary {
            started_at,
            ended_at: started_at - chrono::Duration::seconds(5),
            selected_minutes: 5,
            sessions_completed: 0,
            last_completion: None,
        };
        assert_eq!(summary.duration(), Duration::ZERO);
    }
}
