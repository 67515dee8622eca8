//! Mv command implementation.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Move or rename a path.
///
/// Moves across filesystems fall back to copy-then-delete.
#[derive(Args)]
pub struct MvCommand {
    /// Path to move
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination path, or the new name with --name
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Treat DEST as a new name within the source's directory
    #[arg(long)]
    pub name: bool,
}

impl MvCommand {
    /// Execute the mv command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let source = PathHandle::new(&self.source);

        let moved = if self.name {
            let name = self.destination.to_str().ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "name is not valid UTF-8: {}",
                    self.destination.display()
                ))
            })?;
            source.rename(name)?
        } else {
            source.move_to(self.destination.as_path())?
        };

        log::info!("moved {source} to {moved}");
        Ok(())
    }
}
