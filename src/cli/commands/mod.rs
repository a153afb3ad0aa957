//! Command implementations for mindful.

mod config;
mod sit;

pub use config::config;
pub use sit::sit;

use clap_complete::Shell;

use crate::cli::args::OutputFormat;
use crate::error::MindfulError;
use crate::features::completions::{generate_completions, install_instructions};
use crate::features::quotes;
use crate::output::format_quotes;

/// Execute quote command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn quote(count: usize, format: OutputFormat) -> Result<String, MindfulError> {
    let quotes = quotes::sample(&mut rand::thread_rng(), count);
    format_quotes(&quotes, format)
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell, install: bool) -> Result<String, MindfulError> {
    if install {
        Ok(install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}
