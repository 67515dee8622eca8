//! Rm command implementation.
//!
//! Recursive deletion is best-effort: entries that cannot be removed are
//! reported after everything else has been attempted.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Remove files, links and directories.
#[derive(Args)]
pub struct RmCommand {
    /// Paths to remove
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Remove directories and their contents
    #[arg(long, short = 'r', conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Refuse non-empty directories even if the configuration says otherwise
    #[arg(long)]
    pub no_recursive: bool,

    /// Ignore paths that do not exist
    #[arg(long, short = 'f')]
    pub force: bool,
}

impl RmCommand {
    /// Execute the rm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let recursive = if self.no_recursive {
            false
        } else {
            self.recursive || config.delete_recursive()
        };

        for path in &self.paths {
            let handle = PathHandle::new(path);
            if self.force {
                if !handle.delete_if_exists(recursive)? {
                    log::debug!("{handle} does not exist, skipped");
                }
            } else {
                handle.delete(recursive)?;
            }
        }

        Ok(())
    }
}
