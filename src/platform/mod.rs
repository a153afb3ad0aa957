//! Capabilities the timer drives but does not own.
//!
//! Each capability is a trait so the session screen can run with real
//! sound output and notification services while tests swap in mocks.

pub mod alerts;
pub mod audio;
pub mod haptics;
pub mod notifier;

pub use alerts::NotificationCenter;
pub use audio::{AudioTrack, SinkTrack};
pub use haptics::{TerminalBell, Vibrator, COMPLETION_PATTERN, FALLBACK_PULSE};
pub use notifier::{DesktopNotifier, Notice, NoticeId, Notifier, Permission};
