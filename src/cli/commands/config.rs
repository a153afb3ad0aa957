//! Configuration commands.

use std::path::Path;

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::MindfulError;
use crate::output::{format_config, format_path, to_json};

/// Execute config subcommands against the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or written.
pub fn config(cmd: ConfigCommands, path: &Path, format: OutputFormat) -> Result<String, MindfulError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(path)?;
            format_config(&config, path, format)
        }
        ConfigCommands::Path => format_path(path, format),
        ConfigCommands::Init { force } => init(path, force, format),
    }
}

fn init(path: &Path, force: bool, format: OutputFormat) -> Result<String, MindfulError> {
    if path.exists() && !force {
        return Err(MindfulError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Config::default().save_to_path(path)?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} {}", "Wrote".green(), path.display())),
        OutputFormat::Json => to_json(&serde_json::json!({ "written": path })),
    }
}
