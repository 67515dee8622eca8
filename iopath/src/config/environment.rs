//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `IOPATH_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::ops::SymlinkPolicy;
use std::env;

/// Overrides `copy.overwrite`.
pub const ENV_COPY_OVERWRITE: &str = "IOPATH_COPY_OVERWRITE";
/// Overrides `copy.symlinks`.
pub const ENV_COPY_SYMLINKS: &str = "IOPATH_COPY_SYMLINKS";
/// Overrides `delete.recursive`.
pub const ENV_DELETE_RECURSIVE: &str = "IOPATH_DELETE_RECURSIVE";
/// Overrides `temp.prefix`.
pub const ENV_TEMP_PREFIX: &str = "IOPATH_TEMP_PREFIX";
/// Overrides `temp.suffix`.
pub const ENV_TEMP_SUFFIX: &str = "IOPATH_TEMP_SUFFIX";
/// Overrides `temp.random_len`.
pub const ENV_TEMP_RANDOM_LEN: &str = "IOPATH_TEMP_RANDOM_LEN";
/// Overrides `temp.max_attempts`.
pub const ENV_TEMP_MAX_ATTEMPTS: &str = "IOPATH_TEMP_MAX_ATTEMPTS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use iopath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric length, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(ENV_COPY_OVERWRITE) {
            let copy = config.copy.get_or_insert_with(Default::default);
            copy.overwrite = Some(Self::parse_bool(ENV_COPY_OVERWRITE, &val)?);
        }

        if let Ok(val) = env::var(ENV_COPY_SYMLINKS) {
            let policy: SymlinkPolicy = val.parse().map_err(|message| Error::Validation {
                field: ENV_COPY_SYMLINKS.into(),
                message,
            })?;
            config.copy.get_or_insert_with(Default::default).symlinks = Some(policy);
        }

        if let Ok(val) = env::var(ENV_DELETE_RECURSIVE) {
            let delete = config.delete.get_or_insert_with(Default::default);
            delete.recursive = Some(Self::parse_bool(ENV_DELETE_RECURSIVE, &val)?);
        }

        Self::apply_temp_overrides(config)
    }

    fn apply_temp_overrides(config: &mut Config) -> Result<()> {
        let mut temp = config.temp.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(prefix) = env::var(ENV_TEMP_PREFIX) {
            temp.prefix = Some(prefix);
            modified = true;
        }

        if let Ok(suffix) = env::var(ENV_TEMP_SUFFIX) {
            temp.suffix = Some(suffix);
            modified = true;
        }

        if let Ok(len) = env::var(ENV_TEMP_RANDOM_LEN) {
            temp.random_len = Some(len.parse().map_err(|_| Error::Validation {
                field: ENV_TEMP_RANDOM_LEN.into(),
                message: "Must be a positive integer".into(),
            })?);
            modified = true;
        }

        if let Ok(attempts) = env::var(ENV_TEMP_MAX_ATTEMPTS) {
            temp.max_attempts = Some(attempts.parse().map_err(|_| Error::Validation {
                field: ENV_TEMP_MAX_ATTEMPTS.into(),
                message: "Must be a positive integer".into(),
            })?);
            modified = true;
        }

        if modified {
            config.temp = Some(temp);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
