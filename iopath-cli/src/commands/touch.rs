//! Touch command implementation.
//!
//! Creates empty files, or updates the modification time of files that
//! already exist.

use crate::error::CliError;
use crate::utils::{parse_timestamp, GlobalOptions};
use chrono::Utc;
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Create files or update their modification time.
#[derive(Args)]
pub struct TouchCommand {
    /// Files to create or touch
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Truncate files that already exist to zero length
    #[arg(long)]
    pub truncate: bool,

    /// Fail if a file already exists
    #[arg(long, conflicts_with = "truncate")]
    pub exclusive: bool,

    /// Modification time to set, as RFC 3339 (default: now)
    #[arg(long, value_name = "TIMESTAMP")]
    pub date: Option<String>,
}

impl TouchCommand {
    /// Execute the touch command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let date = self
            .date
            .as_deref()
            .map(|value| parse_timestamp("--date", value))
            .transpose()?;

        for path in &self.paths {
            let handle = PathHandle::new(path);

            if self.exclusive {
                handle.create_file()?;
            } else if self.truncate {
                handle.create_file_with(true)?;
            } else if handle.exists() {
                handle.set_modified_time(date.unwrap_or_else(Utc::now))?;
                log::debug!("updated modification time of {handle}");
                continue;
            } else {
                handle.create_file()?;
            }

            if let Some(date) = date {
                handle.set_modified_time(date)?;
            }
            log::debug!("created {handle}");
        }

        Ok(())
    }
}
