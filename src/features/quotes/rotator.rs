//! Timed quote rotation with a fade between quotes.

use std::time::Duration;

use rand::Rng;

use crate::features::meditation::Scheduler;
use crate::features::quotes::{next_index, QUOTES};

/// Time between rotations.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(8);

/// How long the outgoing quote stays faded before the swap.
pub const FADE_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fade,
    Swap,
}

/// Cycles through [`QUOTES`] on its own clock, independent of any session.
pub struct QuoteRotator<R> {
    rng: R,
    schedule: Scheduler<Step>,
    current: usize,
    fading: bool,
    changes: u64,
}

impl<R: Rng> QuoteRotator<R> {
    /// Start on the first quote with the rotation armed.
    pub fn new(rng: R) -> Self {
        let mut schedule = Scheduler::new();
        schedule.every(ROTATION_PERIOD, Step::Fade);
        Self {
            rng,
            schedule,
            current: 0,
            fading: false,
            changes: 0,
        }
    }

    /// Quote on display.
    #[must_use]
    pub fn current(&self) -> &'static str {
        QUOTES[self.current]
    }

    /// Whether the quote is in its fade-out.
    #[must_use]
    pub const fn is_fading(&self) -> bool {
        self.fading
    }

    /// Quote swaps so far.
    #[must_use]
    pub const fn changes(&self) -> u64 {
        self.changes
    }

    /// Move time forward to `now`, measured from creation.
    pub fn advance(&mut self, now: Duration) {
        while let Some((_, step)) = self.schedule.pop_due(now) {
            match step {
                Step::Fade => {
                    self.fading = true;
                    self.schedule.once(FADE_DURATION, Step::Swap);
                }
                Step::Swap => {
                    self.current = next_index(&mut self.rng, self.current);
                    self.fading = false;
                    self.changes += 1;
                }
            }
        }
        self.schedule.settle(now);
    }

    /// Cancel the rotation. The current quote stays.
    pub fn stop(&mut self) {
        self.schedule.cancel_all();
        self.fading = false;
    }
}
