//! Rotating inspirational quotes.

pub mod rotator;

pub use rotator::{QuoteRotator, FADE_DURATION, ROTATION_PERIOD};

use rand::Rng;

/// The fixed quote set.
pub const QUOTES: [&str; 10] = [
    "Breathe in peace, breathe out tension",
    "Each breath is a fresh beginning",
    "Find peace in the present moment",
    "Your mind is your sanctuary",
    "Silence is the language of the soul",
    "Let go of what you cannot control",
    "Peace comes from within",
    "In stillness, find your strength",
    "Every moment is a new opportunity",
    "Mindfulness is the path to peace",
];

/// Pick a quote index different from `current`.
///
/// A draw that lands on `current` moves to the following entry instead of
/// drawing again.
pub fn next_index<R: Rng + ?Sized>(rng: &mut R, current: usize) -> usize {
    let drawn = rng.gen_range(0..QUOTES.len());
    if drawn == current {
        (current + 1) % QUOTES.len()
    } else {
        drawn
    }
}

/// `count` quotes where no two neighbours repeat.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(count);
    let mut current = rng.gen_range(0..QUOTES.len());
    for _ in 0..count {
        out.push(QUOTES[current]);
        current = next_index(rng, current);
    }
    out
}
