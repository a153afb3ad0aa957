//! Notification capability adapter.
//!
//! Wraps an optional [`Notifier`] and an optional [`Vibrator`]. A missing
//! capability behaves as if permission were permanently denied: every call is
//! accepted and does nothing.

use crate::platform::haptics::Vibrator;
use crate::platform::notifier::{Notice, NoticeId, Notifier, Permission};

/// Desktop notices plus vibration, each possibly absent.
pub struct NotificationCenter {
    notifier: Option<Box<dyn Notifier>>,
    vibrator: Option<Box<dyn Vibrator>>,
    enabled: bool,
}

impl NotificationCenter {
    /// Wrap the available capabilities. Permission already granted counts
    /// as enabled straight away.
    #[must_use]
    pub fn new(notifier: Option<Box<dyn Notifier>>, vibrator: Option<Box<dyn Vibrator>>) -> Self {
        let enabled = notifier
            .as_ref()
            .is_some_and(|n| n.permission() == Permission::Granted);
        Self {
            notifier,
            vibrator,
            enabled,
        }
    }

    /// A center with no capabilities at all.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(None, None)
    }

    /// Whether notices have been granted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ask for permission once. After a grant the notifier is never prompted
    /// again and the answer stays `Granted` for the rest of the run.
    pub fn request_permission(&mut self) -> Permission {
        if self.enabled {
            return Permission::Granted;
        }
        let Some(notifier) = self.notifier.as_mut() else {
            return Permission::Denied;
        };

        let permission = notifier.request_permission();
        if permission == Permission::Granted {
            tracing::info!("notifications enabled");
            self.enabled = true;
        }
        permission
    }

    /// Show `notice` if enabled. Failures are logged and swallowed.
    pub fn notify(&mut self, notice: &Notice) -> Option<NoticeId> {
        if !self.enabled {
            return None;
        }
        let notifier = self.notifier.as_mut()?;

        match notifier.notify(notice) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "desktop notification failed");
                None
            }
        }
    }

    /// Close a notice shown earlier.
    pub fn dismiss(&mut self, id: NoticeId) {
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.dismiss(id);
        }
    }

    /// Pulse `pattern`. Returns whether a vibration was actually started.
    pub fn vibrate(&mut self, pattern: &[u32]) -> bool {
        let Some(vibrator) = self.vibrator.as_mut() else {
            return false;
        };

        match vibrator.vibrate(pattern) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "vibration failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MindfulError;
    use crate::platform::haptics::MockVibrator;
    use crate::platform::notifier::MockNotifier;

    #[test]
    fn test_absent_capabilities_are_noops() {
        let mut center = NotificationCenter::unavailable();

        assert!(!center.is_enabled());
        assert_eq!(center.request_permission(), Permission::Denied);
        assert!(!center.is_enabled());
        assert_eq!(center.notify(&Notice::completion("hi")), None);
        assert!(!center.vibrate(&[200]));
        center.dismiss(NoticeId(1));
    }

    #[test]
    fn test_already_granted_is_enabled() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Granted);
        notifier.expect_request_permission().never();

        let mut center = NotificationCenter::new(Some(Box::new(notifier)), None);
        assert!(center.is_enabled());
        assert_eq!(center.request_permission(), Permission::Granted);
    }

    #[test]
    fn test_request_is_idempotent_after_grant() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(Permission::NotYetRequested);
        notifier
            .expect_request_permission()
            .times(1)
            .return_const(Permission::Granted);

        let mut center = NotificationCenter::new(Some(Box::new(notifier)), None);
        assert!(!center.is_enabled());
        assert_eq!(center.request_permission(), Permission::Granted);
        assert_eq!(center.request_permission(), Permission::Granted);
        assert!(center.is_enabled());
    }

    #[test]
    fn test_denied_request_leaves_disabled() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(Permission::NotYetRequested);
        notifier
            .expect_request_permission()
            .return_const(Permission::Denied);
        notifier.expect_notify().never();

        let mut center = NotificationCenter::new(Some(Box::new(notifier)), None);
        assert_eq!(center.request_permission(), Permission::Denied);
        assert_eq!(center.notify(&Notice::completion("hi")), None);
    }

    #[test]
    fn test_notify_failure_is_swallowed() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Granted);
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(MindfulError::Notification("no server".to_string())));

        let mut center = NotificationCenter::new(Some(Box::new(notifier)), None);
        assert_eq!(center.notify(&Notice::completion("hi")), None);
    }

    #[test]
    fn test_vibrate_forwards_pattern() {
        let mut vibrator = MockVibrator::new();
        vibrator
            .expect_vibrate()
            .withf(|pattern: &[u32]| pattern == [200, 100, 200])
            .times(1)
            .returning(|_| Ok(()));

        let mut center = NotificationCenter::new(None, Some(Box::new(vibrator)));
        assert!(center.vibrate(&[200, 100, 200]));
    }

    #[test]
    fn test_failed_vibration_reports_false() {
        let mut vibrator = MockVibrator::new();
        vibrator
            .expect_vibrate()
            .times(1)
            .returning(|_| Err(MindfulError::Notification("no bell".to_string())));

        let mut center = NotificationCenter::new(None, Some(Box::new(vibrator)));
        assert!(!center.vibrate(&[200]));
    }
}
