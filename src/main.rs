use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use mindful::cli::args::{Cli, Commands, SitArgs};
use mindful::cli::commands;
use mindful::config::{Config, Paths};
use mindful::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;
    let paths = Paths::new()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());

    let command = cli.command.unwrap_or_else(|| Commands::Sit(SitArgs::default()));

    if matches!(command, Commands::Sit(_)) {
        paths.ensure_dirs()?;
        logging::init_file(&paths.log_file)?;
    } else {
        logging::init_stderr();
    }

    let output = match command {
        Commands::Sit(args) => {
            let config = Config::load_from_path(&config_path)?;
            commands::sit(&args, &config, &paths, format)?
        }
        Commands::Quote { count } => commands::quote(count, format)?,
        Commands::Config(args) => commands::config(args.command, &config_path, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
