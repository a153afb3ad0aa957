//! Desktop notification capability.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::MindfulError;

/// Title used for every completion notice.
pub const NOTICE_TITLE: &str = "Meditation Complete";

/// Icon name passed to the notification server.
pub const NOTICE_ICON: &str = "meditation";

/// How long a notice stays up before it is closed.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(5);

/// Whether notices may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The user has not been asked yet.
    NotYetRequested,
    /// Notices may be shown.
    Granted,
    /// Notices are refused (or the capability does not exist).
    Denied,
}

/// Identifies a shown notice so it can be closed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u32);

/// What to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Heading.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Icon name.
    pub icon: String,
    /// Suppress the server's own sound.
    pub silent: bool,
    /// Requested lifetime.
    pub timeout: Duration,
}

impl Notice {
    /// The end-of-session notice carrying `message`.
    #[must_use]
    pub fn completion(message: &str) -> Self {
        Self {
            title: NOTICE_TITLE.to_string(),
            body: message.to_string(),
            icon: NOTICE_ICON.to_string(),
            silent: true,
            timeout: NOTICE_LIFETIME,
        }
    }
}

/// Something that can raise desktop notices.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Current permission, without prompting.
    fn permission(&self) -> Permission;

    /// Ask for permission.
    fn request_permission(&mut self) -> Permission;

    /// Show a notice.
    ///
    /// # Errors
    ///
    /// Returns `MindfulError::Notification` if the notice could not be shown.
    fn notify(&mut self, notice: &Notice) -> Result<NoticeId, MindfulError>;

    /// Close a notice if it is still up.
    fn dismiss(&mut self, id: NoticeId);
}

/// Notices through the platform notification service.
///
/// There is no permission prompt on the desktop; asking grants.
pub struct DesktopNotifier {
    app_name: String,
    permission: Permission,
    next_id: u32,
    #[cfg(all(unix, not(target_os = "macos")))]
    handles: HashMap<NoticeId, notify_rust::NotificationHandle>,
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    handles: HashMap<NoticeId, ()>,
}

impl DesktopNotifier {
    /// A notifier that labels its notices with `app_name`.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            permission: Permission::NotYetRequested,
            next_id: 1,
            handles: HashMap::new(),
        }
    }

    fn build(&self, notice: &Notice) -> notify_rust::Notification {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&self.app_name)
            .summary(&notice.title)
            .body(&notice.body)
            .icon(&notice.icon)
            .timeout(notify_rust::Timeout::Milliseconds(
                u32::try_from(notice.timeout.as_millis()).unwrap_or(u32::MAX),
            ));
        // No sound name is set, so the server plays nothing on its own.
        if !notice.silent {
            notification.sound_name("message-new-instant");
        }
        notification
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        self.permission = Permission::Granted;
        self.permission
    }

    fn notify(&mut self, notice: &Notice) -> Result<NoticeId, MindfulError> {
        let id = NoticeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let shown = self
            .build(notice)
            .show()
            .map_err(|e| MindfulError::Notification(e.to_string()))?;

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            self.handles.insert(id, shown);
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            let _ = shown;
            self.handles.insert(id, ());
        }

        Ok(id)
    }

    fn dismiss(&mut self, id: NoticeId) {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            if let Some(handle) = self.handles.remove(&id) {
                handle.close();
            }
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            self.handles.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_notice() {
        let notice = Notice::completion("Breathe out");
        assert_eq!(notice.title, "Meditation Complete");
        assert_eq!(notice.body, "Breathe out");
        assert!(notice.silent);
        assert_eq!(notice.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_desktop_permission_granted_on_request() {
        let mut notifier = DesktopNotifier::new("mindful");
        assert_eq!(notifier.permission(), Permission::NotYetRequested);
        assert_eq!(notifier.request_permission(), Permission::Granted);
        assert_eq!(notifier.permission(), Permission::Granted);
    }

    #[test]
    fn test_dismiss_unknown_notice_is_harmless() {
        let mut notifier = DesktopNotifier::new("mindful");
        notifier.dismiss(NoticeId(42));
    }
}
