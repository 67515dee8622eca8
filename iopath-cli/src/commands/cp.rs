//! Cp command implementation.
//!
//! Copies a file, link or directory tree. Defaults for overwriting and link
//! handling come from configuration; the flags here take precedence.

use crate::error::CliError;
use crate::utils::{human_size, load_configuration, GlobalOptions};
use clap::Args;
use iopath::{PathHandle, SymlinkPolicy};
use std::path::PathBuf;

/// Copy a file or directory tree.
#[derive(Args)]
pub struct CpCommand {
    /// Path to copy
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Where the copy is created
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Replace existing files and merge into existing directories
    #[arg(long)]
    pub overwrite: bool,

    /// How symbolic links are copied: preserve or follow
    #[arg(long, value_name = "POLICY")]
    pub symlinks: Option<SymlinkPolicy>,
}

impl CpCommand {
    /// Execute the cp command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut options = config.copy_options();
        if self.overwrite {
            options = options.with_overwrite(true);
        }
        if let Some(policy) = self.symlinks {
            options = options.with_symlinks(policy);
        }

        let source = PathHandle::new(&self.source);
        let report = source.copy_with(self.destination.as_path(), &options)?;

        log::info!(
            "copied {} files, {} directories, {} links ({}) to {}",
            report.files,
            report.directories,
            report.symlinks,
            human_size(report.bytes),
            self.destination.display()
        );
        Ok(())
    }
}
