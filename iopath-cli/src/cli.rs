//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, CpCommand, DuCommand, InfoCommand, LsCommand, MkdirCommand,
    MktempCommand, MvCommand, ResolveCommand, RmCommand, SizeCommand, TouchCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line front-end for the iopath path handle.
#[derive(Parser)]
#[command(name = "iopath")]
#[command(version, about = "Inspect and manipulate filesystem paths", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read an extra configuration file layered over the user configuration
    #[arg(long, value_name = "PATH", global = true, env = "IOPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the directory holding the user configuration (default: ~/.iopath)
    #[arg(long, value_name = "PATH", global = true, env = "IOPATH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show metadata for a path
    Info(InfoCommand),

    /// Print the size of a file in bytes
    Size(SizeCommand),

    /// Print the total size of everything under a path
    Du(DuCommand),

    /// Create files or update their modification time
    Touch(TouchCommand),

    /// Create directories
    Mkdir(MkdirCommand),

    /// Remove files, links and directories
    Rm(RmCommand),

    /// Copy a file or directory tree
    Cp(CpCommand),

    /// Move or rename a path
    Mv(MvCommand),

    /// Create a temporary file or directory
    Mktemp(MktempCommand),

    /// Print the resolved form of a path
    Resolve(ResolveCommand),

    /// List a directory
    Ls(LsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
