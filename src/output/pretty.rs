use std::path::Path;

use colored::Colorize;

use crate::config::Config;
use crate::error::MindfulError;
use crate::features::meditation::{format_duration, ChimeOutcome};
use crate::tui::SessionSummary;

/// Format quotes, one per line.
pub fn format_quotes_pretty(quotes: &[&str]) -> String {
    quotes
        .iter()
        .map(|q| format!("{} {}", "❝".dimmed(), q.italic()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the configuration as annotated YAML.
///
/// # Errors
///
/// Returns `MindfulError::Yaml` if YAML serialization fails.
pub fn format_config_pretty(config: &Config, path: &Path) -> Result<String, MindfulError> {
    let state = if path.exists() {
        "".normal()
    } else {
        " (not found, using defaults)".yellow()
    };

    let mut output = format!("{} {}{}\n", "Config:".bold(), path.display(), state);
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(serde_yaml::to_string(config)?.trim_end());
    Ok(output)
}

/// Format the summary printed when the session screen closes.
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let sat = format_duration(summary.duration());
    let mut output = format!(
        "{} {} {}",
        "🧘".normal(),
        "Sat for".bold(),
        sat.bold().cyan()
    );

    match summary.sessions_completed {
        0 => output.push_str(&format!("  {}", "no session completed".dimmed())),
        1 => output.push_str(&format!("  {}", "1 session completed".green())),
        n => output.push_str(&format!("  {}", format!("{n} sessions completed").green())),
    }

    if let Some(report) = &summary.last_completion {
        let chime = match report.chime {
            ChimeOutcome::Played => "chime played",
            ChimeOutcome::FellBackToVibration => "chime unavailable, bell instead",
            ChimeOutcome::Unavailable => "chime unavailable",
            ChimeOutcome::Muted => "chime muted",
        };
        output.push_str(&format!("\n  {}", chime.dimmed()));
    }

    output
}
