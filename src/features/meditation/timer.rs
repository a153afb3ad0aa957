//! Clock formatting and duration parsing.

use std::time::Duration;

use crate::error::MindfulError;
use crate::features::meditation::session::Minutes;

/// Format seconds as `M:SS` (minutes unpadded).
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let total_minutes = total_seconds / 60;

    if total_minutes < 1 {
        return format!(
            "{} second{}",
            total_seconds,
            if total_seconds == 1 { "" } else { "s" }
        );
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a duration string like "10", "10m", "1h" or "90s".
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    // Try parsing as just a number (assume minutes)
    if let Ok(minutes) = s.parse::<u64>() {
        return minutes.checked_mul(60).map(Duration::from_secs);
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: u64 = current_num.parse().ok()?;
            current_num.clear();

            let seconds = match c {
                'h' => num.checked_mul(3600)?,
                'm' => num.checked_mul(60)?,
                's' => num,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(seconds)?;
        } else {
            return None;
        }
    }

    // Handle trailing number without unit (assume minutes)
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Some(Duration::from_secs(total_seconds))
    } else {
        None
    }
}

/// Parse a session length; it must come to whole minutes in 1-60.
///
/// # Errors
///
/// Returns `MindfulError::InvalidDuration` for unparseable input, partial
/// minutes, or a length outside 1-60 minutes.
pub fn parse_minutes(s: &str) -> Result<Minutes, MindfulError> {
    let invalid = || MindfulError::InvalidDuration(s.trim().to_string());
    let duration = parse_duration(s).ok_or_else(invalid)?;

    let seconds = duration.as_secs();
    if seconds % 60 != 0 {
        return Err(invalid());
    }
    let minutes = u32::try_from(seconds / 60).map_err(|_| invalid())?;
    Minutes::new(minutes).map_err(|_| invalid())
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
