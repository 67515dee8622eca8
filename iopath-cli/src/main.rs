//! Main entry point for the iopath CLI.
//!
//! This is the command-line interface for the iopath path handle.
//! It provides commands for inspecting and manipulating paths:
//! - `info`, `size`, `du`, `ls`: Query metadata
//! - `touch`, `mkdir`, `rm`, `cp`, `mv`, `mktemp`: Change the filesystem
//! - `resolve`: Print the resolved form of a path

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use iopath::Error as LibError;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records through the verbosity-aware logger
    iopath::init_logger(cli.verbose, cli.quiet).install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        data_dir: cli.data_dir,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Info(cmd) => cmd.execute(&global),
        cli::Command::Size(cmd) => cmd.execute(&global),
        cli::Command::Du(cmd) => cmd.execute(&global),
        cli::Command::Touch(cmd) => cmd.execute(&global),
        cli::Command::Mkdir(cmd) => cmd.execute(&global),
        cli::Command::Rm(cmd) => cmd.execute(&global),
        cli::Command::Cp(cmd) => cmd.execute(&global),
        cli::Command::Mv(cmd) => cmd.execute(&global),
        cli::Command::Mktemp(cmd) => cmd.execute(&global),
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Ls(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            if let error::CliError::Library(LibError::PartialFailure { failures, .. }) = &e {
                if !global.quiet {
                    for failure in failures {
                        eprintln!("  {failure}");
                    }
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}
