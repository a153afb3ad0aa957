use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::meditation::{parse_minutes, Minutes};

#[derive(Parser)]
#[command(name = "mindful")]
#[command(about = "A terminal meditation timer with ambient sound and gentle reminders")]
#[command(long_about = "mindful - Mindful Moments in your terminal

Pick a duration, start the countdown, and breathe. Optional ambient music
loops while you sit, and a chime, desktop notice and bell mark the end.

QUICK START:
  mindful                   Open the session screen
  mindful sit -m 10         Open it with 10 minutes selected
  mindful sit --music       Start the ambient loop right away
  mindful quote -n 3        Print three quotes

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  mindful <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Read configuration from PATH instead of ~/.mindful/config.yaml
    #[arg(long, global = true, value_name = "PATH", env = "MINDFUL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the session screen (default)
    ///
    /// Choose a duration with the presets or the slider, then start,
    /// pause and stop the countdown. Press ? inside for the key list.
    ///
    /// # Examples
    ///
    ///   mindful sit               Use the configured default duration
    ///   mindful sit -m 20         Twenty minutes
    ///   mindful sit -m 1h         The longest session
    ///   mindful sit --music --volume 0.3
    #[command(alias = "s")]
    Sit(SitArgs),

    /// Print inspirational quotes
    ///
    /// Consecutive quotes never repeat.
    ///
    /// # Examples
    ///
    ///   mindful quote
    ///   mindful quote -n 5 -o json
    #[command(alias = "q")]
    Quote {
        /// How many quotes to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs the completion script for the given shell.
    ///
    /// Example: mindful completions zsh > ~/.zsh/completions/_mindful
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions instead
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the session screen.
#[derive(Args, Debug, Default, Clone)]
pub struct SitArgs {
    /// Session length (e.g. 10, 10m, 1h); whole minutes from 1 to 60
    #[arg(long, short = 'm', value_parser = minutes_arg)]
    pub minutes: Option<Minutes>,

    /// Start the ambient loop immediately
    #[arg(long)]
    pub music: bool,

    /// Ambient volume from 0.0 to 1.0
    #[arg(long, value_parser = volume_arg)]
    pub volume: Option<f32>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

fn minutes_arg(s: &str) -> Result<Minutes, String> {
    parse_minutes(s).map_err(|e| e.to_string())
}

fn volume_arg(s: &str) -> Result<f32, String> {
    let level: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid volume: {s}"))?;
    if (0.0..=1.0).contains(&level) {
        Ok(level)
    } else {
        Err(format!("volume must be between 0.0 and 1.0, got {level}"))
    }
}
