//! Disk-usage command implementation.
//!
//! Reports the total length of every non-directory entry under a path.
//! Symbolic links count as their own length and are never followed.

use crate::commands::size::print_size;
use crate::error::CliError;
use crate::utils::{human_size, GlobalOptions};
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Print the total size of everything under a path.
#[derive(Args)]
pub struct DuCommand {
    /// Paths to measure
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Print sizes with a binary unit suffix (K, M, G, ...)
    #[arg(long, short = 'H')]
    pub human: bool,
}

impl DuCommand {
    /// Execute the du command.
    ///
    /// A single path prints only the total; several paths print
    /// `total<TAB>path` per line.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        if let [path] = self.paths.as_slice() {
            let total = PathHandle::new(path).disk_usage()?;
            print_size(total, self.human);
            return Ok(());
        }

        for path in &self.paths {
            let total = PathHandle::new(path).disk_usage()?;
            let shown = if self.human {
                human_size(total)
            } else {
                total.to_string()
            };
            println!("{shown}\t{}", path.display());
        }
        Ok(())
    }
}
