//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered on top of
//! each other; the accessor methods on [`Config`] supply the defaults.

use serde::{Deserialize, Serialize};

use crate::ops::{CopyOptions, SymlinkPolicy, TempOptions};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use iopath::config::{Config, CopyConfig};
///
/// let config = Config {
///     copy: Some(CopyConfig {
///         overwrite: Some(true),
///         symlinks: None,
///     }),
///     ..Default::default()
/// };
/// assert!(config.copy_options().overwrite);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Defaults for copy and move.
    pub copy: Option<CopyConfig>,

    /// Defaults for delete.
    pub delete: Option<DeleteConfig>,

    /// Naming of temporary files and directories.
    pub temp: Option<TempConfig>,
}

/// Copy defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    /// Replace or merge into an existing destination.
    pub overwrite: Option<bool>,

    /// `preserve` or `follow`.
    pub symlinks: Option<SymlinkPolicy>,
}

/// Delete defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeleteConfig {
    /// Remove directories together with their contents.
    pub recursive: Option<bool>,
}

/// Temporary entry naming.
///
/// # Examples
///
/// ```
/// use iopath::config::TempConfig;
///
/// let yaml = "prefix: build-\nrandom_len: 12\n";
/// let temp: TempConfig = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(temp.random_len, Some(12));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TempConfig {
    /// Text placed before the random part.
    pub prefix: Option<String>,

    /// Text placed after the random part.
    pub suffix: Option<String>,

    /// Number of random characters.
    pub random_len: Option<usize>,

    /// Names tried before giving up.
    pub max_attempts: Option<u32>,
}

impl Config {
    /// Copy options with unset fields at their defaults.
    #[must_use]
    pub fn copy_options(&self) -> CopyOptions {
        let copy = self.copy.clone().unwrap_or_default();
        CopyOptions::new()
            .with_overwrite(copy.overwrite.unwrap_or(false))
            .with_symlinks(copy.symlinks.unwrap_or_default())
    }

    /// Temp naming with unset fields at their defaults.
    #[must_use]
    pub fn temp_options(&self) -> TempOptions {
        let defaults = TempOptions::default();
        let temp = self.temp.clone().unwrap_or_default();
        TempOptions {
            prefix: temp.prefix.unwrap_or(defaults.prefix),
            suffix: temp.suffix.unwrap_or(defaults.suffix),
            random_len: temp.random_len.unwrap_or(defaults.random_len),
            max_attempts: temp.max_attempts.unwrap_or(defaults.max_attempts),
        }
    }

    /// Whether deletes recurse unless told otherwise.
    #[must_use]
    pub fn delete_recursive(&self) -> bool {
        self.delete
            .as_ref()
            .and_then(|d| d.recursive)
            .unwrap_or(false)
    }
}
