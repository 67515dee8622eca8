//! Ls command implementation.
//!
//! Lists the entries of one directory, sorted by name.

use crate::error::CliError;
use crate::utils::{format_timestamp, GlobalOptions};
use clap::Args;
use iopath::PathHandle;
use std::io::Write;
use std::path::PathBuf;

/// List a directory.
#[derive(Args)]
pub struct LsCommand {
    /// Directory to list
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Only regular files
    #[arg(long, conflicts_with = "dirs")]
    pub files: bool,

    /// Only directories
    #[arg(long)]
    pub dirs: bool,

    /// Include hidden entries
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Print kind, size and modification time before each name
    #[arg(long, short = 'l')]
    pub long: bool,
}

impl LsCommand {
    /// Execute the ls command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let dir = PathHandle::new(&self.dir);
        let mut entries = if self.files {
            dir.list_files()?
        } else if self.dirs {
            dir.list_dirs()?
        } else {
            dir.list()?
        };
        if !self.all {
            entries.retain(|entry| !entry.is_hidden());
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for entry in &entries {
            if self.long {
                let info = entry.info()?;
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    info.kind,
                    info.size,
                    format_timestamp(info.modified),
                    entry.name()
                )?;
            } else {
                writeln!(out, "{}", entry.name())?;
            }
        }

        Ok(())
    }
}
