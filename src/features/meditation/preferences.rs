//! What happens when a session ends.

use serde::{Deserialize, Serialize};

/// Completion reminder settings, read once per expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Raise a desktop notice.
    pub desktop_enabled: bool,
    /// Play the completion chime.
    pub sound_enabled: bool,
    /// Pulse the vibration capability.
    pub vibrate_enabled: bool,
    /// Body of the desktop notice.
    pub message: String,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            desktop_enabled: false,
            sound_enabled: true,
            vibrate_enabled: true,
            message: "Time for a mindful break! 🌿".to_string(),
        }
    }
}

/// One editable field of [`NotificationPreferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceField {
    Desktop,
    Sound,
    Vibrate,
    Message,
}

impl PreferenceField {
    /// Fields in display order.
    pub const ALL: [Self; 4] = [Self::Desktop, Self::Sound, Self::Vibrate, Self::Message];

    /// Label shown in the settings panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop Notifications",
            Self::Sound => "Sound",
            Self::Vibrate => "Vibration",
            Self::Message => "Custom Message",
        }
    }
}

impl NotificationPreferences {
    /// A copy with the boolean `field` flipped. `Message` is returned unchanged.
    #[must_use]
    pub fn toggled(&self, field: PreferenceField) -> Self {
        let mut next = self.clone();
        match field {
            PreferenceField::Desktop => next.desktop_enabled = !next.desktop_enabled,
            PreferenceField::Sound => next.sound_enabled = !next.sound_enabled,
            PreferenceField::Vibrate => next.vibrate_enabled = !next.vibrate_enabled,
            PreferenceField::Message => {}
        }
        next
    }

    /// A copy carrying `message`.
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self.clone()
        }
    }

    /// Current value of a boolean field; `None` for `Message`.
    #[must_use]
    pub const fn flag(&self, field: PreferenceField) -> Option<bool> {
        match field {
            PreferenceField::Desktop => Some(self.desktop_enabled),
            PreferenceField::Sound => Some(self.sound_enabled),
            PreferenceField::Vibrate => Some(self.vibrate_enabled),
            PreferenceField::Message => None,
        }
    }
}
