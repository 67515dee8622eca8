//! Operations with filesystem side effects.
//!
//! Every operation here is synchronous and leaf-level: it maps to one OS call
//! or to a short fixed sequence of them. Recursive operations (copy, delete,
//! disk usage) share one iterative walker, so deep trees never grow the call
//! stack.
//!
//! # Symbolic links
//!
//! Recursive copy preserves links as links unless [`SymlinkPolicy::Follow`]
//! is requested. Disk usage and recursive delete never follow links inside
//! the tree: a link counts as its own length and deleting a tree removes the
//! link, not its target. Disk usage does resolve a link named by the handle
//! itself.
//!
//! # Partial failure
//!
//! Recursive copy and delete are best-effort. They carry on past entries that
//! fail and finish with [`Error::PartialFailure`](crate::Error::PartialFailure),
//! which lists what was completed and what failed. Nothing is rolled back.

mod attributes;
mod copy;
mod create;
mod delete;
mod relocate;
mod temp;
mod usage;
pub(crate) mod walk;

use serde::{Deserialize, Serialize};

/// How recursive copy treats symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymlinkPolicy {
    /// Recreate each link at the destination, pointing at the same target.
    #[default]
    Preserve,
    /// Copy whatever the link points to. Directory cycles reached through
    /// links are reported as failed entries instead of being descended.
    Follow,
}

impl std::fmt::Display for SymlinkPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preserve => write!(f, "preserve"),
            Self::Follow => write!(f, "follow"),
        }
    }
}

impl std::str::FromStr for SymlinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "follow" => Ok(Self::Follow),
            _ => Err(format!(
                "invalid symlink policy: '{s}' (expected preserve or follow)"
            )),
        }
    }
}

/// Whose permission bit the `set_readable`, `set_writable` and
/// `set_executable` operations change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionScope {
    /// Only the owner's bit.
    #[default]
    Owner,
    /// The owner, group and other bits together.
    Everyone,
}

impl PermissionScope {
    /// Narrow a `0o444`-style mask (one bit per class) to this scope.
    #[cfg_attr(not(unix), allow(dead_code))]
    pub(crate) const fn mask(self, everyone: u32) -> u32 {
        match self {
            Self::Owner => everyone & 0o700,
            Self::Everyone => everyone,
        }
    }
}

/// Options for [`PathHandle::copy_with`](crate::PathHandle::copy_with).
///
/// # Examples
///
/// ```
/// use iopath::{CopyOptions, SymlinkPolicy};
///
/// let options = CopyOptions::new()
///     .with_overwrite(true)
///     .with_symlinks(SymlinkPolicy::Follow);
/// assert!(options.overwrite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyOptions {
    /// Replace existing files at the destination and merge into existing
    /// directories instead of failing with `AlreadyExists`.
    pub overwrite: bool,
    /// Link handling during the walk.
    pub symlinks: SymlinkPolicy,
}

impl CopyOptions {
    /// Defaults: no overwrite, links preserved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overwrite flag.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the link policy.
    #[must_use]
    pub fn with_symlinks(mut self, symlinks: SymlinkPolicy) -> Self {
        self.symlinks = symlinks;
        self
    }
}

/// What a successful copy wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CopyReport {
    /// Regular files copied.
    pub files: u64,
    /// Directories created or merged into.
    pub directories: u64,
    /// Links recreated.
    pub symlinks: u64,
    /// Bytes of regular-file content copied.
    pub bytes: u64,
}

/// Default number of random characters in a temporary name.
pub const DEFAULT_TEMP_RANDOM_LEN: usize = 8;

/// Default number of names tried before giving up.
pub const DEFAULT_TEMP_MAX_ATTEMPTS: u32 = 100;

/// Naming scheme for [`PathHandle::temp_file_with`](crate::PathHandle::temp_file_with)
/// and [`PathHandle::temp_directory_with`](crate::PathHandle::temp_directory_with).
///
/// Names are `prefix + random + suffix`, where `random` is drawn from
/// ASCII letters and digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempOptions {
    /// Text placed before the random part.
    pub prefix: String,
    /// Text placed after the random part.
    pub suffix: String,
    /// Number of random characters.
    pub random_len: usize,
    /// Upper bound on names tried before failing with `TempNamesExhausted`.
    pub max_attempts: u32,
}

impl Default for TempOptions {
    fn default() -> Self {
        Self {
            prefix: "tmp".to_string(),
            suffix: String::new(),
            random_len: DEFAULT_TEMP_RANDOM_LEN,
            max_attempts: DEFAULT_TEMP_MAX_ATTEMPTS,
        }
    }
}

impl TempOptions {
    /// Defaults: prefix `tmp`, no suffix, 8 random characters, 100 attempts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the random part's length.
    #[must_use]
    pub fn with_random_len(mut self, random_len: usize) -> Self {
        self.random_len = random_len;
        self
    }

    /// Set the retry bound.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symlink_policy_parse() {
        assert_eq!("preserve".parse::<SymlinkPolicy>().unwrap(), SymlinkPolicy::Preserve);
        assert_eq!("FOLLOW".parse::<SymlinkPolicy>().unwrap(), SymlinkPolicy::Follow);
        assert!("sometimes".parse::<SymlinkPolicy>().is_err());
    }

    #[test]
    fn test_permission_scope_masks() {
        assert_eq!(PermissionScope::Owner.mask(0o444), 0o400);
        assert_eq!(PermissionScope::Owner.mask(0o111), 0o100);
        assert_eq!(PermissionScope::Everyone.mask(0o222), 0o222);
        assert_eq!(PermissionScope::default(), PermissionScope::Owner);
    }

    #[test]
    fn test_copy_options_defaults() {
        let options = CopyOptions::new();
        assert!(!options.overwrite);
        assert_eq!(options.symlinks, SymlinkPolicy::Preserve);
    }

    #[test]
    fn test_temp_options_builder() {
        let options = TempOptions::new()
            .with_prefix("job-")
            .with_suffix(".lock")
            .with_random_len(4)
            .with_max_attempts(3);
        assert_eq!(options.prefix, "job-");
        assert_eq!(options.suffix, ".lock");
        assert_eq!(options.random_len, 4);
        assert_eq!(options.max_attempts, 3);
    }
}
