//! Mktemp command implementation.
//!
//! Creates a uniquely named file or directory and prints its path.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use iopath::PathHandle;
use std::path::PathBuf;

/// Create a temporary file or directory.
#[derive(Args)]
pub struct MktempCommand {
    /// Directory to create the entry in (default: the system temp directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Create a directory instead of a file
    #[arg(long, short = 'd')]
    pub directory: bool,

    /// Text placed before the random part of the name
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Text placed after the random part of the name
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,
}

impl MktempCommand {
    /// Execute the mktemp command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut options = config.temp_options();
        if let Some(prefix) = self.prefix {
            options = options.with_prefix(prefix);
        }
        if let Some(suffix) = self.suffix {
            options = options.with_suffix(suffix);
        }

        let anchor = PathHandle::new(self.dir.unwrap_or_else(std::env::temp_dir));
        let created = if self.directory {
            anchor.temp_directory_with(&options)?
        } else {
            anchor.temp_file_with(&options)?
        };

        println!("{created}");
        Ok(())
    }
}
