//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::MindfulError;

const BIN: &str = env!("CARGO_PKG_NAME");

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, MindfulError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN, &mut buf);
    String::from_utf8(buf).map_err(|e| MindfulError::Config(format!("UTF-8 error: {e}")))
}

/// How to install the script for `shell`.
#[must_use]
pub fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!(
            "# Add to ~/.bashrc:\nsource <({BIN} completions bash)\n"
        ),
        Shell::Zsh => format!(
            "# Save to your fpath:\n{BIN} completions zsh > ~/.zsh/completions/_{BIN}\n\
             # Then in ~/.zshrc (before compinit):\nfpath=(~/.zsh/completions $fpath)\n"
        ),
        Shell::Fish => format!(
            "# Save to the fish completions directory:\n\
             {BIN} completions fish > ~/.config/fish/completions/{BIN}.fish\n"
        ),
        Shell::PowerShell => format!(
            "# Add to your PowerShell profile ($PROFILE):\n\
             {BIN} completions powershell | Out-String | Invoke-Expression\n"
        ),
        Shell::Elvish => format!(
            "# Save to the elvish lib directory:\n{BIN} completions elvish > ~/.elvish/lib/{BIN}.elv\n"
        ),
        _ => "Unknown shell".to_string(),
    }
}
