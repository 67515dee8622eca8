//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary (the package is `iopath-cli`).
const BIN_NAME: &str = "iopath";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    ///
    /// The script goes to stdout; install hints go to stderr unless
    /// `--quiet` is given.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_install_hint(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    eprintln!("# Run the following command to enable completions:");

    match shell {
        Shell::Bash => {
            eprintln!(
                "#   iopath completions bash > ~/.local/share/bash-completion/completions/iopath"
            );
            eprintln!("# Or source it directly in ~/.bashrc:");
            eprintln!("#   eval \"$(iopath completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   iopath completions zsh > ~/.zsh/completions/_iopath");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
            eprintln!("# Or add to ~/.zshrc:");
            eprintln!("#   eval \"$(iopath completions zsh)\"");
        }
        Shell::Fish => {
            eprintln!("#   iopath completions fish > ~/.config/fish/completions/iopath.fish");
            eprintln!("# Or add to config.fish:");
            eprintln!("#   iopath completions fish | source");
        }
        Shell::PowerShell => {
            eprintln!("#   iopath completions powershell > $PROFILE");
            eprintln!("# Or run:");
            eprintln!("#   iopath completions powershell | Out-String | Invoke-Expression");
        }
        Shell::Elvish => {
            // Elvish included by default in clap_complete but no custom instructions needed
        }
        _ => {
            // Future shells added to clap_complete
        }
    }

    eprintln!();
}
