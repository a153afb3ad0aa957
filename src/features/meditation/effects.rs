//! End-of-session side effects.
//!
//! Runs in a fixed order: silence the ambient loop, sound the chime, raise
//! the notice and vibration. Each step absorbs its own failure so the next one
//! still runs. Timers that undo these effects are armed by the controller.

use serde::Serialize;

use crate::features::meditation::playback::Playback;
use crate::features::meditation::preferences::NotificationPreferences;
use crate::platform::alerts::NotificationCenter;
use crate::platform::haptics::{COMPLETION_PATTERN, FALLBACK_PULSE};
use crate::platform::notifier::{Notice, NoticeId};

/// What became of the completion chime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChimeOutcome {
    /// The chime started.
    Played,
    /// The chime was refused and a vibration pulse stood in.
    FellBackToVibration,
    /// The chime was refused and nothing could stand in.
    Unavailable,
    /// Sound is turned off in the preferences.
    Muted,
}

/// What one expiry actually did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    /// The ambient loop was playing and has been stopped.
    pub ambient_stopped: bool,
    /// Chime result.
    pub chime: ChimeOutcome,
    /// Notice raised, if any.
    #[serde(skip)]
    pub notice: Option<NoticeId>,
    /// The notification vibration pattern was pulsed.
    pub vibrated: bool,
}

/// Run the completion side effects once.
pub fn run_completion(
    playback: &mut Playback,
    alerts: &mut NotificationCenter,
    prefs: &NotificationPreferences,
) -> CompletionReport {
    let ambient_stopped = playback.stop_ambient();
    let chime = sound_chime(playback, alerts, prefs);
    let (notice, vibrated) = notify(alerts, prefs);

    CompletionReport {
        ambient_stopped,
        chime,
        notice,
        vibrated,
    }
}

fn sound_chime(
    playback: &mut Playback,
    alerts: &mut NotificationCenter,
    prefs: &NotificationPreferences,
) -> ChimeOutcome {
    if !prefs.sound_enabled {
        return ChimeOutcome::Muted;
    }

    match playback.play_chime() {
        Ok(()) => ChimeOutcome::Played,
        Err(e) => {
            tracing::warn!(error = %e, "chime unavailable");
            if alerts.vibrate(&FALLBACK_PULSE) {
                ChimeOutcome::FellBackToVibration
            } else {
                ChimeOutcome::Unavailable
            }
        }
    }
}

fn notify(
    alerts: &mut NotificationCenter,
    prefs: &NotificationPreferences,
) -> (Option<NoticeId>, bool) {
    if !alerts.is_enabled() {
        return (None, false);
    }

    let notice = if prefs.desktop_enabled {
        alerts.notify(&Notice::completion(&prefs.message))
    } else {
        None
    };

    let vibrated = prefs.vibrate_enabled && alerts.vibrate(&COMPLETION_PATTERN);

    (notice, vibrated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::meditation::playback::fakes::{call_log, calls, FakeTrack};
    use crate::features::meditation::playback::Volume;
    use crate::platform::haptics::MockVibrator;
    use crate::platform::notifier::{MockNotifier, Permission};

    fn granted_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Granted);
        notifier
    }

    #[test]
    fn test_full_sequence_order() {
        let log = call_log();
        let mut playback = Playback::new(
            Some(Box::new(FakeTrack::new("ambient", &log))),
            Some(Box::new(FakeTrack::new("chime", &log))),
            Volume::default(),
        );
        playback.toggle_ambient().unwrap();
        log.lock().unwrap().clear();

        let mut notifier = granted_notifier();
        let notify_log = log.clone();
        notifier
            .expect_notify()
            .withf(|n: &Notice| n.body == "Rest" && n.title == "Meditation Complete")
            .times(1)
            .returning(move |_| {
                notify_log.lock().unwrap().push("notify".to_string());
                Ok(NoticeId(7))
            });

        let mut vibrator = MockVibrator::new();
        let vibrate_log = log.clone();
        vibrator
            .expect_vibrate()
            .withf(|p: &[u32]| p == [200, 100, 200])
            .times(1)
            .returning(move |_| {
                vibrate_log.lock().unwrap().push("vibrate".to_string());
                Ok(())
            });

        let mut alerts =
            NotificationCenter::new(Some(Box::new(notifier)), Some(Box::new(vibrator)));
        let prefs = NotificationPreferences {
            desktop_enabled: true,
            message: "Rest".to_string(),
            ..NotificationPreferences::default()
        };

        let report = run_completion(&mut playback, &mut alerts, &prefs);

        assert_eq!(
            report,
            CompletionReport {
                ambient_stopped: true,
                chime: ChimeOutcome::Played,
                notice: Some(NoticeId(7)),
                vibrated: true,
            }
        );
        assert_eq!(
            calls(&log),
            vec!["ambient:pause", "chime:rewind", "chime:play", "notify", "vibrate"]
        );
        assert!(!playback.ambient_playing());
    }

    #[test]
    fn test_rejected_chime_falls_back_to_pulse() {
        let log = call_log();
        let mut playback = Playback::new(
            None,
            Some(Box::new(FakeTrack::rejecting("chime", &log))),
            Volume::default(),
        );

        let mut vibrator = MockVibrator::new();
        let mut seq = mockall::Sequence::new();
        vibrator
            .expect_vibrate()
            .withf(|p: &[u32]| p == [200])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vibrator
            .expect_vibrate()
            .withf(|p: &[u32]| p == [200, 100, 200])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut alerts =
            NotificationCenter::new(Some(Box::new(granted_notifier())), Some(Box::new(vibrator)));

        let report = run_completion(&mut playback, &mut alerts, &NotificationPreferences::default());

        assert_eq!(report.chime, ChimeOutcome::FellBackToVibration);
        assert!(report.vibrated);
        assert!(!report.ambient_stopped);
    }

    #[test]
    fn test_rejected_chime_without_vibration_is_silent() {
        let log = call_log();
        let mut playback = Playback::new(
            None,
            Some(Box::new(FakeTrack::rejecting("chime", &log))),
            Volume::default(),
        );
        let mut alerts = NotificationCenter::unavailable();

        let report = run_completion(&mut playback, &mut alerts, &NotificationPreferences::default());

        assert_eq!(report.chime, ChimeOutcome::Unavailable);
        assert_eq!(report.notice, None);
        assert!(!report.vibrated);
    }

    #[test]
    fn test_muted_skips_chime() {
        let log = call_log();
        let mut playback = Playback::new(
            None,
            Some(Box::new(FakeTrack::new("chime", &log))),
            Volume::default(),
        );
        let mut alerts = NotificationCenter::unavailable();
        let prefs = NotificationPreferences {
            sound_enabled: false,
            ..NotificationPreferences::default()
        };

        let report = run_completion(&mut playback, &mut alerts, &prefs);

        assert_eq!(report.chime, ChimeOutcome::Muted);
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn test_notifications_not_granted() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(Permission::NotYetRequested);
        notifier.expect_notify().never();

        let mut vibrator = MockVibrator::new();
        // Only the chime fallback may vibrate, and the chime plays here
        vibrator.expect_vibrate().never();

        let log = call_log();
        let mut playback = Playback::new(
            None,
            Some(Box::new(FakeTrack::new("chime", &log))),
            Volume::default(),
        );
        let mut alerts =
            NotificationCenter::new(Some(Box::new(notifier)), Some(Box::new(vibrator)));
        let prefs = NotificationPreferences {
            desktop_enabled: true,
            ..NotificationPreferences::default()
        };

        let report = run_completion(&mut playback, &mut alerts, &prefs);

        assert_eq!(report.notice, None);
        assert!(!report.vibrated);
        assert_eq!(report.chime, ChimeOutcome::Played);
    }

    #[test]
    fn test_failed_notice_does_not_block_vibration() {
        let mut notifier = granted_notifier();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Err(crate::error::MindfulError::Notification("down".to_string())));

        let mut vibrator = MockVibrator::new();
        vibrator.expect_vibrate().times(1).returning(|_| Ok(()));

        let mut playback = Playback::new(None, None, Volume::default());
        let mut alerts =
            NotificationCenter::new(Some(Box::new(notifier)), Some(Box::new(vibrator)));
        let prefs = NotificationPreferences {
            desktop_enabled: true,
            sound_enabled: false,
            ..NotificationPreferences::default()
        };

        let report = run_completion(&mut playback, &mut alerts, &prefs);

        assert_eq!(report.notice, None);
        assert!(report.vibrated);
    }
}
