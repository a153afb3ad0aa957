//! Event handling for the session screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::MindfulError;
use crate::tui::app::{App, Overlay, VOLUME_STEP};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start when idle, otherwise pause or resume.
    StartOrPause,
    /// Abandon the session.
    Stop,
    /// Select a quick preset by position.
    Preset(usize),
    /// Move the duration slider.
    NudgeMinutes(i32),
    /// Start or stop the ambient loop.
    ToggleAmbient,
    /// Move the ambient volume.
    NudgeVolume(f32),
    /// Enable notifications, or open their settings once enabled.
    Notifications,
    /// Show or hide the key list.
    Help,
    /// Close whichever popup is open.
    CloseOverlay,
    SettingsUp,
    SettingsDown,
    SettingsToggle,
    SettingsEdit,
    SettingsCommit,
    /// A character typed into the message field.
    Input(char),
    Backspace,
    CancelEdit,
}

/// Key list shown in the help popup.
pub const HELP: &[(&str, &str)] = &[
    ("space", "start / pause / resume"),
    ("s", "stop"),
    ("1-4", "5 / 10 / 15 / 20 minutes"),
    ("←/→ h/l", "duration -/+ 1 minute"),
    ("m", "ambient sound on/off"),
    ("+/-", "volume"),
    ("n", "notifications / settings"),
    ("?", "help"),
    ("q Esc", "quit"),
];

/// Poll for one terminal event, waiting at most `timeout`.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_action(app: &App, timeout: Duration) -> Result<Option<Action>, MindfulError> {
    if !event::poll(timeout).map_err(|e| MindfulError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| MindfulError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(app, key)),
        _ => Ok(None),
    }
}

/// Translate a key press into an action for the current screen state.
#[must_use]
pub fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match &app.overlay {
        Some(Overlay::Settings(panel)) if panel.editing.is_some() => typing_key(key.code),
        Some(Overlay::Settings(_)) => settings_key(key.code),
        Some(Overlay::Help) => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ => Some(Action::CloseOverlay),
        },
        None => main_key(key.code),
    }
}

fn main_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::StartOrPause),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char(c @ '1'..='4') => Some(Action::Preset(c as usize - '1' as usize)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::NudgeMinutes(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NudgeMinutes(1)),
        KeyCode::Char('m') => Some(Action::ToggleAmbient),
        KeyCode::Char('+' | '=') => Some(Action::NudgeVolume(VOLUME_STEP)),
        KeyCode::Char('-' | '_') => Some(Action::NudgeVolume(-VOLUME_STEP)),
        KeyCode::Char('n') => Some(Action::Notifications),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

fn settings_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc => Some(Action::CloseOverlay),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SettingsUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SettingsDown),
        KeyCode::Char(' ') => Some(Action::SettingsToggle),
        KeyCode::Char('e') => Some(Action::SettingsEdit),
        KeyCode::Enter => Some(Action::SettingsCommit),
        _ => None,
    }
}

fn typing_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc => Some(Action::CancelEdit),
        KeyCode::Enter => Some(Action::SettingsCommit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::Input(c)),
        _ => None,
    }
}
