//! The meditation timer: session state, its tick source, and everything that
//! happens around it.
//!
//! All time flows through [`MeditationTimer::advance`]. The tick source is a
//! single repeating timer that is cancelled before it is ever re-armed, so
//! rapid start/pause/stop sequences can never leave two of them running.

use std::time::Duration;

use crate::config::{Config, Haptics, Paths};
use crate::error::MindfulError;
use crate::features::meditation::effects::{self, ChimeOutcome, CompletionReport};
use crate::features::meditation::playback::{Playback, Volume};
use crate::features::meditation::preferences::NotificationPreferences;
use crate::features::meditation::schedule::{Scheduler, TimerId};
use crate::features::meditation::session::{Minutes, Phase, Rejected, Session, Tick, PRESETS};
use crate::platform::alerts::NotificationCenter;
use crate::platform::audio::{AudioTrack, SinkTrack};
use crate::platform::haptics::{TerminalBell, Vibrator};
use crate::platform::notifier::{DesktopNotifier, NoticeId, Notifier, Permission, NOTICE_LIFETIME};

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Longest the chime may ring.
pub const CHIME_CEILING: Duration = Duration::from_secs(5);

/// How long the "break" banner stays up.
pub const BANNER_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Tick,
    ChimeCeiling,
    DismissBanner,
    DismissNotice(NoticeId),
}

/// The capabilities a timer is built from. Any of them may be missing.
#[derive(Default)]
pub struct Capabilities {
    /// Looping background track.
    pub ambient: Option<Box<dyn AudioTrack>>,
    /// One-shot completion chime.
    pub chime: Option<Box<dyn AudioTrack>>,
    /// Desktop notices.
    pub notifier: Option<Box<dyn Notifier>>,
    /// Vibration.
    pub vibrator: Option<Box<dyn Vibrator>>,
}

impl Capabilities {
    /// Sound output, desktop notices and the terminal bell, as configured.
    #[must_use]
    pub fn from_config(config: &Config, paths: &Paths) -> Self {
        let vibrator: Option<Box<dyn Vibrator>> = match config.notifications.haptics {
            Haptics::Bell => Some(Box::new(TerminalBell)),
            Haptics::None => None,
        };

        Self {
            ambient: Some(Box::new(SinkTrack::new(config.audio.ambient_path(paths)))),
            chime: Some(Box::new(SinkTrack::new(config.audio.chime_path(paths)))),
            notifier: Some(Box::new(DesktopNotifier::new(env!("CARGO_PKG_NAME")))),
            vibrator,
        }
    }
}

/// Session timer with ambient sound and completion reminders.
pub struct MeditationTimer {
    session: Session,
    schedule: Scheduler<Task>,
    tick: Option<TimerId>,
    chime_ceiling: Option<TimerId>,
    banner: Option<TimerId>,
    notices: Vec<(TimerId, NoticeId)>,
    playback: Playback,
    alerts: NotificationCenter,
    prefs: NotificationPreferences,
    last_completion: Option<CompletionReport>,
    completed: u32,
    sound_error: Option<MindfulError>,
    torn_down: bool,
}

impl MeditationTimer {
    /// An idle timer with `selected` minutes chosen.
    #[must_use]
    pub fn new(
        capabilities: Capabilities,
        prefs: NotificationPreferences,
        volume: Volume,
        selected: Minutes,
    ) -> Self {
        let Capabilities {
            ambient,
            chime,
            notifier,
            vibrator,
        } = capabilities;

        Self {
            session: Session::new(selected),
            schedule: Scheduler::new(),
            tick: None,
            chime_ceiling: None,
            banner: None,
            notices: Vec::new(),
            playback: Playback::new(ambient, chime, volume),
            alerts: NotificationCenter::new(notifier, vibrator),
            prefs,
            last_completion: None,
            completed: 0,
            sound_error: None,
            torn_down: false,
        }
    }

    // --- session controls ---

    /// Start counting down from the selected duration.
    ///
    /// # Errors
    ///
    /// Rejected (with no state change) while a session is underway.
    pub fn start(&mut self) -> Result<(), Rejected> {
        self.session.start().inspect_err(|reason| {
            tracing::debug!(%reason, "start ignored");
        })?;

        self.hide_banner();
        self.arm_tick();
        tracing::info!(minutes = self.session.selected().get(), "session started");
        Ok(())
    }

    /// Pause a running session or resume a paused one.
    ///
    /// # Errors
    ///
    /// Rejected while idle.
    pub fn toggle_pause(&mut self) -> Result<Phase, Rejected> {
        let phase = self.session.toggle_pause().inspect_err(|reason| {
            tracing::debug!(%reason, "pause ignored");
        })?;

        match phase {
            Phase::Running => self.arm_tick(),
            Phase::Paused | Phase::Idle => self.disarm_tick(),
        }
        tracing::info!(%phase, remaining = self.session.remaining_seconds(), "session toggled");
        Ok(phase)
    }

    /// Abandon the session, whatever its phase.
    pub fn stop(&mut self) {
        let was_active = self.session.is_active();
        self.session.stop();
        self.disarm_tick();
        self.silence_chime();
        self.hide_banner();
        if was_active {
            tracing::info!("session stopped");
        }
    }

    /// Choose a duration in minutes.
    ///
    /// # Errors
    ///
    /// Rejected while a session is underway or outside 1-60.
    pub fn select_minutes(&mut self, minutes: u32) -> Result<(), Rejected> {
        self.session.select(minutes).inspect_err(|reason| {
            tracing::debug!(%reason, minutes, "selection ignored");
        })
    }

    /// Choose one of the quick-select presets by position.
    ///
    /// # Errors
    ///
    /// Rejected while a session is underway or for an unknown preset.
    pub fn select_preset(&mut self, index: usize) -> Result<(), Rejected> {
        self.select_minutes(PRESETS.get(index).copied().unwrap_or(0))
    }

    /// Move the range input by `delta` minutes, stopping at its ends.
    ///
    /// # Errors
    ///
    /// Rejected while a session is underway.
    pub fn nudge_minutes(&mut self, delta: i32) -> Result<(), Rejected> {
        let current = i64::from(self.session.selected().get());
        let next = (current + i64::from(delta)).clamp(1, 60);
        self.select_minutes(u32::try_from(next).unwrap_or(1))
    }

    // --- sound ---

    /// Start or stop the ambient loop. Returns whether it is now playing.
    ///
    /// # Errors
    ///
    /// Returns the playback rejection; the loop then stays off.
    pub fn toggle_ambient(&mut self) -> Result<bool, MindfulError> {
        self.playback.toggle_ambient().inspect_err(|e| {
            tracing::error!(error = %e, "ambient playback rejected");
        })
    }

    /// Set the ambient volume (clamped to 0.0 - 1.0).
    ///
    /// # Errors
    ///
    /// Returns a playback error if the loop had stopped on its own; it is
    /// then shown as off.
    pub fn set_volume(&mut self, level: f32) -> Result<(), MindfulError> {
        self.playback.set_volume(Volume::new(level)).inspect_err(|e| {
            tracing::error!(error = %e, "ambient playback lost");
        })
    }

    /// Move the ambient volume by `delta`.
    ///
    /// # Errors
    ///
    /// As [`Self::set_volume`].
    pub fn nudge_volume(&mut self, delta: f32) -> Result<(), MindfulError> {
        let volume = self.playback.volume().nudged(delta);
        self.set_volume(volume.get())
    }

    // --- reminders ---

    /// Ask for notification permission (only prompts until granted).
    pub fn request_notifications(&mut self) -> Permission {
        self.alerts.request_permission()
    }

    /// Replace the reminder preferences.
    pub fn set_preferences(&mut self, prefs: NotificationPreferences) {
        self.prefs = prefs;
    }

    // --- time ---

    /// Move time forward to `now` (measured from the timer's creation) and
    /// fire everything that fell due, in order.
    pub fn advance(&mut self, now: Duration) {
        if self.torn_down {
            return;
        }
        while let Some((id, task)) = self.schedule.pop_due(now) {
            self.fire(id, task);
        }
        if let Err(e) = self.playback.poll() {
            tracing::error!(error = %e, "ambient playback lost");
            self.sound_error = Some(e);
        }
        self.schedule.settle(now);
    }

    /// The playback failure found by the last [`Self::advance`], if any.
    pub fn take_sound_error(&mut self) -> Option<MindfulError> {
        self.sound_error.take()
    }

    /// Cancel every pending timer and release all sound. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.schedule.cancel_all();
        self.tick = None;
        self.chime_ceiling = None;
        self.banner = None;
        for (_, notice) in std::mem::take(&mut self.notices) {
            self.alerts.dismiss(notice);
        }
        self.playback.release();
        tracing::debug!("timer torn down");
    }

    fn fire(&mut self, id: TimerId, task: Task) {
        match task {
            Task::Tick => {
                if self.tick != Some(id) {
                    return;
                }
                if self.session.tick() == Tick::Expired {
                    self.complete();
                }
            }
            Task::ChimeCeiling => {
                if self.chime_ceiling == Some(id) {
                    self.chime_ceiling = None;
                    self.playback.silence_chime();
                }
            }
            Task::DismissBanner => {
                if self.banner == Some(id) {
                    self.banner = None;
                }
            }
            Task::DismissNotice(notice) => {
                self.notices.retain(|(timer, _)| *timer != id);
                self.alerts.dismiss(notice);
            }
        }
    }

    fn complete(&mut self) {
        self.disarm_tick();
        self.completed += 1;
        tracing::info!(minutes = self.session.selected().get(), "session complete");

        let report = effects::run_completion(&mut self.playback, &mut self.alerts, &self.prefs);

        if report.chime == ChimeOutcome::Played {
            self.cancel(self.chime_ceiling);
            self.chime_ceiling = Some(self.schedule.once(CHIME_CEILING, Task::ChimeCeiling));
        }
        if let Some(notice) = report.notice {
            let timer = self
                .schedule
                .once(NOTICE_LIFETIME, Task::DismissNotice(notice));
            self.notices.push((timer, notice));
        }

        self.cancel(self.banner);
        self.banner = Some(self.schedule.once(BANNER_LIFETIME, Task::DismissBanner));

        self.last_completion = Some(report);
    }

    fn arm_tick(&mut self) {
        self.disarm_tick();
        self.tick = Some(self.schedule.every(TICK_PERIOD, Task::Tick));
    }

    fn disarm_tick(&mut self) {
        let tick = self.tick.take();
        self.cancel(tick);
    }

    fn silence_chime(&mut self) {
        if let Some(id) = self.chime_ceiling.take() {
            self.schedule.cancel(id);
            self.playback.silence_chime();
        }
    }

    fn hide_banner(&mut self) {
        let banner = self.banner.take();
        self.cancel(banner);
    }

    fn cancel(&mut self, id: Option<TimerId>) {
        if let Some(id) = id {
            self.schedule.cancel(id);
        }
    }

    // --- view ---

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Whether a session is underway.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.session.remaining_seconds()
    }

    /// Selected duration.
    #[must_use]
    pub const fn selected(&self) -> Minutes {
        self.session.selected()
    }

    /// Preset matching the selection, if any.
    #[must_use]
    pub fn preset_index(&self) -> Option<usize> {
        let minutes = self.session.selected().get();
        PRESETS.iter().position(|p| *p == minutes)
    }

    /// Position of the selection on the 1-60 range input (0.0 - 1.0).
    #[must_use]
    pub fn slider_ratio(&self) -> f64 {
        f64::from(self.session.selected().get() - 1) / 59.0
    }

    /// Fraction of the countdown still left.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.session.fraction_left()
    }

    /// Whether the "break" banner is showing.
    #[must_use]
    pub const fn banner_visible(&self) -> bool {
        self.banner.is_some()
    }

    /// Whether the ambient loop is playing.
    #[must_use]
    pub const fn ambient_playing(&self) -> bool {
        self.playback.ambient_playing()
    }

    /// Ambient volume.
    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.playback.volume()
    }

    /// Whether notification permission has been granted.
    #[must_use]
    pub const fn notifications_enabled(&self) -> bool {
        self.alerts.is_enabled()
    }

    /// Reminder preferences.
    #[must_use]
    pub const fn preferences(&self) -> &NotificationPreferences {
        &self.prefs
    }

    /// What the most recent expiry did.
    #[must_use]
    pub const fn last_completion(&self) -> Option<&CompletionReport> {
        self.last_completion.as_ref()
    }

    /// Sessions that ran to the end.
    #[must_use]
    pub const fn sessions_completed(&self) -> u32 {
        self.completed
    }

    /// Whether the tick source is armed.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.tick.is_some_and(|id| self.schedule.is_armed(id))
    }

    /// Number of armed timers (tick source, chime ceiling, banner, notices).
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.schedule.pending()
    }
}

impl Drop for MeditationTimer {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::meditation::playback::fakes::{call_log, calls, CallLog, FakeTrack};
    use crate::platform::haptics::MockVibrator;
    use crate::platform::notifier::{MockNotifier, Notice};

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn minutes(m: u32) -> Minutes {
        Minutes::new(m).unwrap()
    }

    fn timer_with(log: &CallLog, capabilities: Capabilities, prefs: NotificationPreferences) -> MeditationTimer {
        let capabilities = Capabilities {
            ambient: Some(Box::new(FakeTrack::new("ambient", log))),
            chime: Some(Box::new(FakeTrack::new("chime", log))),
            ..capabilities
        };
        MeditationTimer::new(capabilities, prefs, Volume::default(), minutes(1))
    }

    fn plain_timer(log: &CallLog) -> MeditationTimer {
        timer_with(log, Capabilities::default(), NotificationPreferences::default())
    }

    #[test]
    fn test_start_arms_one_tick_source() {
        let log = call_log();
        let mut timer = plain_timer(&log);

        timer.start().unwrap();
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.remaining_seconds(), 60);
        assert!(timer.is_ticking());
        assert_eq!(timer.pending_timers(), 1);
    }

    #[test]
    fn test_ticks_once_per_second() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();

        timer.advance(Duration::from_millis(999));
        assert_eq!(timer.remaining_seconds(), 60);
        timer.advance(secs(1));
        assert_eq!(timer.remaining_seconds(), 59);
        timer.advance(secs(10));
        assert_eq!(timer.remaining_seconds(), 50);
    }

    #[test]
    fn test_rapid_toggles_never_double_tick() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();

        for _ in 0..10 {
            timer.toggle_pause().unwrap();
            timer.toggle_pause().unwrap();
        }
        assert_eq!(timer.pending_timers(), 1);

        timer.advance(secs(5));
        assert_eq!(timer.remaining_seconds(), 55);
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(3));

        assert_eq!(timer.toggle_pause(), Ok(Phase::Paused));
        assert!(!timer.is_ticking());
        timer.advance(secs(30));
        assert_eq!(timer.remaining_seconds(), 57);

        assert_eq!(timer.toggle_pause(), Ok(Phase::Running));
        timer.advance(secs(31));
        assert_eq!(timer.remaining_seconds(), 56);
    }

    #[test]
    fn test_pause_twice_without_tick_keeps_remaining() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(2));
        let before = timer.remaining_seconds();

        timer.toggle_pause().unwrap();
        timer.toggle_pause().unwrap();
        assert_eq!(timer.remaining_seconds(), before);
    }

    #[test]
    fn test_stop_from_any_phase() {
        let log = call_log();
        let mut timer = plain_timer(&log);

        timer.stop();
        assert_eq!((timer.phase(), timer.remaining_seconds()), (Phase::Idle, 0));

        timer.start().unwrap();
        timer.advance(secs(2));
        timer.stop();
        assert_eq!((timer.phase(), timer.remaining_seconds()), (Phase::Idle, 0));
        assert!(!timer.banner_visible());
        assert_eq!(timer.pending_timers(), 0);

        timer.start().unwrap();
        timer.toggle_pause().unwrap();
        timer.stop();
        assert_eq!((timer.phase(), timer.remaining_seconds()), (Phase::Idle, 0));

        // Nothing left ticking
        timer.advance(secs(120));
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_selection_rejected_while_running() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();

        assert_eq!(timer.select_minutes(20), Err(Rejected::SessionActive));
        assert_eq!(timer.select_preset(3), Err(Rejected::SessionActive));
        assert_eq!(timer.selected().get(), 1);
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_presets_and_range_agree() {
        let log = call_log();
        let mut timer = plain_timer(&log);

        timer.select_preset(1).unwrap();
        assert_eq!(timer.selected().get(), 10);
        assert_eq!(timer.preset_index(), Some(1));
        assert!((timer.slider_ratio() - 9.0 / 59.0).abs() < f64::EPSILON);

        timer.nudge_minutes(1).unwrap();
        assert_eq!(timer.selected().get(), 11);
        assert_eq!(timer.preset_index(), None);

        timer.select_minutes(15).unwrap();
        assert_eq!(timer.preset_index(), Some(2));

        timer.nudge_minutes(100).unwrap();
        assert_eq!(timer.selected().get(), 60);
        assert!((timer.slider_ratio() - 1.0).abs() < f64::EPSILON);

        assert_eq!(timer.select_preset(9), Err(Rejected::InvalidDuration(0)));
    }

    #[test]
    fn test_expiry_runs_effects_and_clears_banner() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.toggle_ambient().unwrap();
        timer.start().unwrap();

        timer.advance(secs(59));
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.remaining_seconds(), 1);

        timer.advance(secs(60));
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.ambient_playing());
        assert!(timer.banner_visible());
        assert!(!timer.is_ticking());
        assert_eq!(timer.sessions_completed(), 1);

        let report = timer.last_completion().unwrap();
        assert!(report.ambient_stopped);
        assert_eq!(report.chime, ChimeOutcome::Played);

        timer.advance(secs(64));
        assert!(timer.banner_visible());
        timer.advance(secs(65));
        assert!(!timer.banner_visible());
        assert_eq!(timer.pending_timers(), 0);
    }

    #[test]
    fn test_chime_cut_after_ceiling() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(60));

        let before = calls(&log);
        assert!(before.ends_with(&["chime:rewind".to_string(), "chime:play".to_string()]));

        timer.advance(secs(64));
        assert_eq!(calls(&log).len(), before.len());

        timer.advance(secs(65));
        let after = calls(&log);
        assert_eq!(&after[before.len()..], ["chime:pause", "chime:rewind"]);
    }

    #[test]
    fn test_stop_cancels_chime_ceiling() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(60));
        assert_eq!(timer.pending_timers(), 2);

        timer.stop();
        assert_eq!(timer.pending_timers(), 0);
        assert!(calls(&log).ends_with(&["chime:pause".to_string(), "chime:rewind".to_string()]));

        let len = calls(&log).len();
        timer.advance(secs(70));
        assert_eq!(calls(&log).len(), len);
    }

    #[test]
    fn test_start_hides_previous_banner() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(60));
        assert!(timer.banner_visible());

        timer.start().unwrap();
        assert!(!timer.banner_visible());
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_expiry_does_not_double_fire() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(600));

        assert_eq!(timer.sessions_completed(), 1);
        let plays = calls(&log).iter().filter(|c| *c == "chime:play").count();
        assert_eq!(plays, 1);
    }

    #[test]
    fn test_notification_scenario() {
        let log = call_log();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(Permission::NotYetRequested);
        notifier
            .expect_request_permission()
            .times(1)
            .return_const(Permission::Granted);
        notifier
            .expect_notify()
            .withf(|n: &Notice| n.body == "Namaste")
            .times(1)
            .returning(|_| Ok(NoticeId(3)));
        notifier
            .expect_dismiss()
            .withf(|id: &NoticeId| *id == NoticeId(3))
            .times(1)
            .return_const(());

        let mut vibrator = MockVibrator::new();
        vibrator
            .expect_vibrate()
            .withf(|p: &[u32]| p == [200, 100, 200])
            .times(1)
            .returning(|_| Ok(()));

        let prefs = NotificationPreferences {
            desktop_enabled: true,
            vibrate_enabled: true,
            message: "Namaste".to_string(),
            ..NotificationPreferences::default()
        };
        let capabilities = Capabilities {
            notifier: Some(Box::new(notifier)),
            vibrator: Some(Box::new(vibrator)),
            ..Capabilities::default()
        };
        let mut timer = timer_with(&log, capabilities, prefs);

        assert!(!timer.notifications_enabled());
        assert_eq!(timer.request_notifications(), Permission::Granted);
        assert_eq!(timer.request_notifications(), Permission::Granted);
        assert!(timer.notifications_enabled());

        timer.start().unwrap();
        timer.advance(secs(60));
        assert_eq!(timer.last_completion().unwrap().notice, Some(NoticeId(3)));

        // Auto-dismissed five seconds later
        timer.advance(secs(65));
        assert_eq!(timer.pending_timers(), 0);
    }

    #[test]
    fn test_teardown_dismisses_pending_notice() {
        let log = call_log();

        let mut notifier = MockNotifier::new();
        notifier.expect_permission().return_const(Permission::Granted);
        notifier.expect_notify().returning(|_| Ok(NoticeId(9)));
        notifier.expect_dismiss().times(1).return_const(());

        let prefs = NotificationPreferences {
            desktop_enabled: true,
            vibrate_enabled: false,
            ..NotificationPreferences::default()
        };
        let capabilities = Capabilities {
            notifier: Some(Box::new(notifier)),
            ..Capabilities::default()
        };
        let mut timer = timer_with(&log, capabilities, prefs);
        timer.start().unwrap();
        timer.advance(secs(60));
        assert_eq!(timer.pending_timers(), 3);

        timer.teardown();
        timer.teardown();
        assert_eq!(timer.pending_timers(), 0);
        assert!(!timer.banner_visible());
    }

    #[test]
    fn test_teardown_during_session_stops_everything() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.toggle_ambient().unwrap();
        timer.start().unwrap();
        timer.advance(secs(10));

        timer.teardown();
        let len = calls(&log).len();
        assert!(calls(&log).contains(&"ambient:pause".to_string()));

        // No callback touches the released tracks
        timer.advance(secs(120));
        assert_eq!(calls(&log).len(), len);
        assert_eq!(timer.remaining_seconds(), 50);
    }

    #[test]
    fn test_rejected_ambient_surfaces_error() {
        let log = call_log();
        let capabilities = Capabilities {
            ambient: Some(Box::new(FakeTrack::rejecting("ambient", &log))),
            chime: None,
            ..Capabilities::default()
        };
        let mut timer = MeditationTimer::new(
            capabilities,
            NotificationPreferences::default(),
            Volume::default(),
            minutes(5),
        );

        assert!(timer.toggle_ambient().is_err());
        assert!(!timer.ambient_playing());
    }

    #[test]
    fn test_missing_chime_does_not_block_banner() {
        let mut timer = MeditationTimer::new(
            Capabilities::default(),
            NotificationPreferences::default(),
            Volume::default(),
            minutes(1),
        );
        timer.start().unwrap();
        timer.advance(secs(60));

        assert_eq!(timer.last_completion().unwrap().chime, ChimeOutcome::Unavailable);
        assert!(timer.banner_visible());
    }

    #[test]
    fn test_volume_applies_immediately() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.toggle_ambient().unwrap();

        timer.set_volume(0.2).unwrap();
        assert_eq!(calls(&log).last().map(String::as_str), Some("ambient:volume=0.20"));

        timer.nudge_volume(-0.5).unwrap();
        assert!(timer.volume().is_muted());
    }

    #[test]
    fn test_lost_ambient_reported_once() {
        let log = call_log();
        let capabilities = Capabilities {
            ambient: Some(Box::new(FakeTrack::restart_failing("ambient", &log))),
            ..Capabilities::default()
        };
        let mut timer = MeditationTimer::new(
            capabilities,
            NotificationPreferences::default(),
            Volume::default(),
            minutes(5),
        );
        timer.toggle_ambient().unwrap();
        timer.start().unwrap();

        timer.advance(secs(1));
        assert!(!timer.ambient_playing());
        assert!(matches!(timer.take_sound_error(), Some(MindfulError::Playback(_))));
        assert!(timer.take_sound_error().is_none());

        // The session itself carries on
        assert_eq!(timer.remaining_seconds(), 5 * 60 - 1);
        timer.advance(secs(2));
        assert!(timer.take_sound_error().is_none());
    }

    #[test]
    fn test_preferences_read_at_completion() {
        let log = call_log();
        let mut timer = plain_timer(&log);
        timer.start().unwrap();
        timer.advance(secs(30));

        timer.set_preferences(timer.preferences().toggled(
            crate::features::meditation::PreferenceField::Sound,
        ));
        timer.advance(secs(60));

        assert_eq!(timer.last_completion().unwrap().chime, ChimeOutcome::Muted);
    }
}
