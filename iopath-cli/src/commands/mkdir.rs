//! Mkdir command implementation.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Create directories.
#[derive(Args)]
pub struct MkdirCommand {
    /// Directories to create
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Create missing parent directories as needed
    #[arg(long, short = 'p')]
    pub parents: bool,
}

impl MkdirCommand {
    /// Execute the mkdir command.
    ///
    /// An existing directory is not an error; an existing file is.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        for path in &self.paths {
            PathHandle::new(path).create_directory(self.parents)?;
            log::debug!("created directory {}", path.display());
        }
        Ok(())
    }
}
