//! Error types for the iopath library.
//!
//! Every fallible operation in the crate returns [`Error`]. OS-level failures
//! are translated once, in [`Error::from_io`], into the typed kinds callers
//! branch on; nothing is recovered silently inside the library.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for operations that may fail with an iopath error.
///
/// # Examples
///
/// ```
/// use iopath::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(10)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the iopath library.
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not exist.
    #[error("path not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Something already occupies the path.
    #[error("path already exists: {}", path.display())]
    AlreadyExists {
        /// The occupied path.
        path: PathBuf,
    },

    /// A non-recursive delete hit a directory that still has entries.
    #[error("directory not empty: {}", path.display())]
    DirectoryNotEmpty {
        /// The non-empty directory.
        path: PathBuf,
    },

    /// A file operation was attempted on a directory.
    #[error("is a directory: {}", path.display())]
    IsADirectory {
        /// The offending directory.
        path: PathBuf,
    },

    /// A directory operation was attempted on something else.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// The platform or filesystem cannot report the requested attribute.
    #[error("{attribute} is not supported for {}", path.display())]
    Unsupported {
        /// The path that was queried.
        path: PathBuf,
        /// The attribute that is unavailable (e.g. "creation time").
        attribute: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A recursive operation finished with some entries failing.
    ///
    /// The entries listed in `completed` were processed; the filesystem is
    /// left as it is, no rollback is attempted.
    #[error(
        "{operation} of {} partially failed: {} entr{} failed, {} completed",
        root.display(),
        failures.len(),
        if failures.len() == 1 { "y" } else { "ies" },
        completed.len()
    )]
    PartialFailure {
        /// The operation that was running ("copy", "delete").
        operation: &'static str,
        /// The root path the operation was applied to.
        root: PathBuf,
        /// Entries processed successfully.
        completed: Vec<PathBuf>,
        /// Entries that failed, with the underlying cause.
        failures: Vec<FailedEntry>,
    },

    /// No unused temporary name was found within the retry budget.
    #[error("no unused temporary name in {} after {attempts} attempts", directory.display())]
    TempNamesExhausted {
        /// The directory the entry was to be created in.
        directory: PathBuf,
        /// How many names were tried.
        attempts: u32,
    },

    /// An I/O error that has no more specific kind.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path the operation was applied to.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// A single entry that failed during a recursive operation.
#[derive(Debug)]
pub struct FailedEntry {
    /// The entry that failed.
    pub path: PathBuf,
    /// Why it failed.
    pub source: io::Error,
}

impl FailedEntry {
    /// Record a failure for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for FailedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl Error {
    /// Translate an OS error raised while operating on `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::Error;
    /// use std::io;
    ///
    /// let err = Error::from_io("/missing", io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_not_found());
    /// ```
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::DirectoryNotEmpty => Self::DirectoryNotEmpty { path },
            io::ErrorKind::IsADirectory => Self::IsADirectory { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::Unsupported => Self::Unsupported {
                path,
                attribute: err.to_string(),
            },
            io::ErrorKind::InvalidInput => Self::InvalidPath {
                path,
                reason: err.to_string(),
            },
            _ => Self::Io { path, source: err },
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::NotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error indicates the path is already occupied.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if a recursive operation stopped short of full success.
    #[must_use]
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, Self::PartialFailure { .. })
    }

    /// The path the error refers to, if it carries one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::AlreadyExists { path }
            | Self::DirectoryNotEmpty { path }
            | Self::IsADirectory { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path }
            | Self::Unsupported { path, .. }
            | Self::InvalidPath { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::PartialFailure { root, .. } => Some(root),
            Self::TempNamesExhausted { directory, .. } => Some(directory),
            Self::Configuration(_) | Self::Validation { .. } => None,
        }
    }
}
