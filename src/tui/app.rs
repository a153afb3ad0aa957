//! Application state for the session screen.

use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;

use crate::features::meditation::{
    MeditationTimer, NotificationPreferences, Phase, PreferenceField, Rejected,
};
use crate::features::quotes::QuoteRotator;
use crate::platform::notifier::Permission;
use crate::tui::event::Action;
use crate::tui::SessionSummary;

/// Step for the volume keys.
pub const VOLUME_STEP: f32 = 0.05;

/// Popup drawn over the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Settings(SettingsPanel),
}

/// Draft of the reminder preferences being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    /// Highlighted row in [`PreferenceField::ALL`].
    pub selected: usize,
    /// Edited copy; only applied on commit.
    pub draft: NotificationPreferences,
    /// Message text being typed, if the message row is in edit mode.
    pub editing: Option<String>,
}

impl SettingsPanel {
    fn new(prefs: &NotificationPreferences) -> Self {
        Self {
            selected: 0,
            draft: prefs.clone(),
            editing: None,
        }
    }

    /// The highlighted field.
    #[must_use]
    pub fn field(&self) -> PreferenceField {
        PreferenceField::ALL[self.selected % PreferenceField::ALL.len()]
    }
}

/// Application state.
pub struct App {
    /// The timer and everything it drives.
    pub timer: MeditationTimer,
    /// Quote shown under the header.
    pub quotes: QuoteRotator<StdRng>,
    /// Open popup, if any.
    pub overlay: Option<Overlay>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Time since the screen opened.
    pub now: Duration,
    started_at: chrono::DateTime<Local>,
}

impl App {
    /// Create a new app instance.
    #[must_use]
    pub fn new(timer: MeditationTimer, rng: StdRng) -> Self {
        Self {
            timer,
            quotes: QuoteRotator::new(rng),
            overlay: None,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
            now: Duration::ZERO,
            started_at: Local::now(),
        }
    }

    /// Move both clocks to `now`.
    pub fn advance(&mut self, now: Duration) {
        let was_active = self.timer.is_active();
        self.now = now;
        self.timer.advance(now);
        self.quotes.advance(now);
        if let Some(e) = self.timer.take_sound_error() {
            self.status = Some(e.summary());
        }

        if was_active && !self.timer.is_active() {
            self.status = Some("Session complete".to_string());
        }
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::StartOrPause => self.start_or_pause(),
            Action::Stop => {
                self.timer.stop();
                self.status = Some("Stopped".to_string());
            }
            Action::Preset(index) => {
                let result = self.timer.select_preset(index);
                self.report_selection(result);
            }
            Action::NudgeMinutes(delta) => {
                let result = self.timer.nudge_minutes(delta);
                self.report_selection(result);
            }
            Action::ToggleAmbient => match self.timer.toggle_ambient() {
                Ok(true) => self.status = Some("Ambient sound on".to_string()),
                Ok(false) => self.status = Some("Ambient sound off".to_string()),
                Err(e) => self.status = Some(e.summary()),
            },
            Action::NudgeVolume(delta) => match self.timer.nudge_volume(delta) {
                Ok(()) => self.status = Some(format!("Volume {}", self.timer.volume())),
                Err(e) => self.status = Some(e.summary()),
            },
            Action::Notifications => self.notifications(),
            Action::Help => {
                self.overlay = match self.overlay {
                    Some(Overlay::Help) => None,
                    _ => Some(Overlay::Help),
                };
            }
            Action::CloseOverlay => self.overlay = None,
            Action::SettingsUp => self.with_settings(|panel| {
                let len = PreferenceField::ALL.len();
                panel.selected = (panel.selected + len - 1) % len;
            }),
            Action::SettingsDown => self.with_settings(|panel| {
                panel.selected = (panel.selected + 1) % PreferenceField::ALL.len();
            }),
            Action::SettingsToggle => self.with_settings(|panel| {
                panel.draft = panel.draft.toggled(panel.field());
            }),
            Action::SettingsEdit => self.with_settings(|panel| {
                if panel.field() == PreferenceField::Message {
                    panel.editing = Some(panel.draft.message.clone());
                }
            }),
            Action::SettingsCommit => self.commit_settings(),
            Action::Input(c) => self.with_settings(|panel| {
                if let Some(text) = panel.editing.as_mut() {
                    text.push(c);
                }
            }),
            Action::Backspace => self.with_settings(|panel| {
                if let Some(text) = panel.editing.as_mut() {
                    text.pop();
                }
            }),
            Action::CancelEdit => self.with_settings(|panel| panel.editing = None),
        }
    }

    fn start_or_pause(&mut self) {
        if self.timer.phase() == Phase::Idle {
            if self.timer.start().is_ok() {
                let minutes = self.timer.selected().get();
                self.status = Some(format!("Meditating for {minutes} min"));
            }
            return;
        }
        match self.timer.toggle_pause() {
            Ok(Phase::Paused) => self.status = Some("Paused".to_string()),
            Ok(_) => self.status = Some("Resumed".to_string()),
            Err(_) => {}
        }
    }

    fn report_selection(&mut self, result: Result<(), Rejected>) {
        self.status = Some(match result {
            Ok(()) => format!("{} min selected", self.timer.selected().get()),
            Err(Rejected::SessionActive) => "Stop the session to change its length".to_string(),
            Err(reason) => reason.to_string(),
        });
    }

    fn notifications(&mut self) {
        if self.timer.notifications_enabled() {
            self.overlay = Some(Overlay::Settings(SettingsPanel::new(
                self.timer.preferences(),
            )));
            return;
        }
        self.status = Some(
            match self.timer.request_notifications() {
                Permission::Granted => "Notifications enabled (press n for settings)",
                Permission::Denied => "Notifications are not available",
                Permission::NotYetRequested => "Notification permission pending",
            }
            .to_string(),
        );
    }

    fn with_settings(&mut self, f: impl FnOnce(&mut SettingsPanel)) {
        if let Some(Overlay::Settings(panel)) = self.overlay.as_mut() {
            f(panel);
        }
    }

    fn commit_settings(&mut self) {
        let Some(Overlay::Settings(panel)) = self.overlay.as_mut() else {
            return;
        };
        if let Some(text) = panel.editing.take() {
            panel.draft = panel.draft.with_message(text);
            return;
        }
        let prefs = panel.draft.clone();
        self.timer.set_preferences(prefs);
        self.overlay = None;
        self.status = Some("Notification settings saved".to_string());
    }

    /// Whether the settings popup is in message-typing mode.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        matches!(&self.overlay, Some(Overlay::Settings(panel)) if panel.editing.is_some())
    }

    /// What happened while the screen was open.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            started_at: self.started_at,
            ended_at: Local::now(),
            selected_minutes: self.timer.selected().get(),
            sessions_completed: self.timer.sessions_completed(),
            last_completion: self.timer.last_completion().cloned(),
        }
    }
}
