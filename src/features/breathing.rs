//! Breathing guide shown while a session is underway.

use std::time::Duration;

/// One full inhale and exhale.
pub const BREATH_CYCLE: Duration = Duration::from_secs(8);

/// Text under the circle.
pub const CAPTION: &str = "Breathe with the circle";

/// Which half of the cycle we are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breath {
    In,
    Out,
}

impl Breath {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "breathe in",
            Self::Out => "breathe out",
        }
    }
}

/// What to draw at a given moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathFrame {
    /// Circle size, 0.0 (empty lungs) to 1.0 (full).
    pub scale: f64,
    pub breath: Breath,
    pub caption: &'static str,
}

/// The frame `elapsed` into the animation, or `None` when no session is active.
#[must_use]
pub fn breathing_frame(active: bool, elapsed: Duration) -> Option<BreathFrame> {
    if !active {
        return None;
    }

    let cycle = BREATH_CYCLE.as_secs_f64();
    let half = cycle / 2.0;
    let t = elapsed.as_secs_f64() % cycle;

    let (breath, scale) = if t < half {
        (Breath::In, t / half)
    } else {
        (Breath::Out, 1.0 - (t - half) / half)
    };

    Some(BreathFrame {
        scale,
        breath,
        caption: CAPTION,
    })
}
