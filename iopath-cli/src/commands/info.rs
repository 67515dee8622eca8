//! Info command implementation.
//!
//! Prints a metadata snapshot of one path, as aligned text or JSON.

use crate::error::CliError;
use crate::utils::{format_timestamp, GlobalOptions};
use clap::{Args, ValueEnum};
use iopath::{PathHandle, PathInfo};
use std::io::Write;
use std::path::PathBuf;

/// Show metadata for a path.
#[derive(Args)]
pub struct InfoCommand {
    /// Path to inspect
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: InfoFormat,

    /// Print nothing; exit with status 1 if the path does not exist
    #[arg(long, conflicts_with = "format")]
    pub exists: bool,
}

/// Output format for the info command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum InfoFormat {
    /// One `key: value` line per field
    Text,
    /// A single JSON object
    Json,
}

impl InfoCommand {
    /// Execute the info command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let handle = PathHandle::new(&self.path);

        if self.exists {
            return if handle.exists() {
                Ok(())
            } else {
                Err(CliError::SemanticFailure(format!(
                    "{} does not exist",
                    self.path.display()
                )))
            };
        }

        let info = handle.info()?;
        match self.format {
            InfoFormat::Text => format_as_text(&info),
            InfoFormat::Json => format_as_json(&info),
        }
    }
}

fn format_as_text(info: &PathInfo) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "path:     {}", info.path.display())?;
    writeln!(out, "kind:     {}", info.kind)?;
    writeln!(out, "size:     {}", info.size)?;
    writeln!(out, "modified: {}", format_timestamp(info.modified))?;
    writeln!(out, "accessed: {}", format_timestamp(info.accessed))?;
    writeln!(out, "created:  {}", format_timestamp(info.created))?;
    writeln!(out, "changed:  {}", format_timestamp(info.changed))?;
    writeln!(out, "readonly: {}", info.readonly)?;

    Ok(())
}

fn format_as_json(info: &PathInfo) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    serde_json::to_writer_pretty(&mut out, info)?;
    writeln!(out)?;

    Ok(())
}
