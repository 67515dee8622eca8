//! Resolve command implementation.
//!
//! Prints a path after lexical or filesystem resolution.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use iopath::PathHandle;
use std::path::PathBuf;

/// Print the resolved form of a path.
#[derive(Args)]
pub struct ResolveCommand {
    /// Path to resolve
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Resolution to apply
    #[arg(long, value_enum, default_value = "absolute", ignore_case = true)]
    pub mode: ResolveMode,

    /// Expand a leading `~` and `$VAR` references first
    #[arg(long)]
    pub expand: bool,

    /// Print the result relative to this directory
    #[arg(long, value_name = "BASE")]
    pub relative_to: Option<PathBuf>,
}

/// How the resolve command resolves its path.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ResolveMode {
    /// Anchor on the working directory and fold `.`/`..`; links untouched
    Absolute,
    /// Follow links to the real path; the path must exist
    Canonical,
    /// Fold `.`/`..` lexically, keeping relative paths relative
    Normalized,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let handle = if self.expand {
            PathHandle::expanded(&self.path)?
        } else {
            PathHandle::new(&self.path)
        };

        let resolved = match self.mode {
            ResolveMode::Absolute => handle.absolute()?,
            ResolveMode::Canonical => handle.canonical()?,
            ResolveMode::Normalized => handle.normalized(),
        };

        let shown = match self.relative_to {
            Some(base) if resolved.is_absolute() => {
                let base = PathHandle::new(base).absolute()?;
                resolved.relative_to(&base)?
            }
            Some(base) => resolved.relative_to(base)?,
            None => resolved,
        };

        println!("{shown}");
        Ok(())
    }
}
