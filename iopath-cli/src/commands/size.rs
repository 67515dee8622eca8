//! Size command implementation.
//!
//! Reports the byte length of a single regular file.

use crate::error::CliError;
use crate::utils::{human_size, GlobalOptions};
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Print the size of a file in bytes.
#[derive(Args)]
pub struct SizeCommand {
    /// File to measure
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print sizes with a binary unit suffix (K, M, G, ...)
    #[arg(long, short = 'H')]
    pub human: bool,
}

impl SizeCommand {
    /// Execute the size command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let size = PathHandle::new(&self.path).size()?;
        print_size(size, self.human);
        Ok(())
    }
}

/// Print a byte count, raw or with a unit suffix.
pub(crate) fn print_size(bytes: u64, human: bool) {
    if human {
        println!("{}", human_size(bytes));
    } else {
        println!("{bytes}");
    }
}
