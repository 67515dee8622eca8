//! Metadata queries on a [`PathHandle`].
//!
//! Each accessor performs a fresh `stat`-family call. Timestamps are returned
//! as `DateTime<Utc>` carrying whatever precision the platform reports
//! (nanoseconds on Linux and macOS, 100ns ticks on Windows).

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::PathHandle;

/// What kind of filesystem object a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link (reported only when links are not followed).
    Symlink,
    /// Anything else: sockets, FIFOs, devices.
    Other,
}

impl EntryKind {
    pub(crate) fn of(metadata: &fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Symlink => write!(f, "symlink"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A point-in-time snapshot of a path's metadata.
///
/// Unlike the handle itself this *is* a cached value: it reflects the
/// filesystem at the moment [`PathHandle::info`] was called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    /// The path that was queried, as given.
    pub path: PathBuf,
    /// The kind of object, links not followed.
    pub kind: EntryKind,
    /// Length in bytes (the link text length for a symlink).
    pub size: u64,
    /// Last modification time, if the platform reports it.
    pub modified: Option<DateTime<Utc>>,
    /// Last access time, if the platform reports it.
    pub accessed: Option<DateTime<Utc>>,
    /// Creation time, if the platform reports it.
    pub created: Option<DateTime<Utc>>,
    /// Last status change (inode change) time, Unix only.
    pub changed: Option<DateTime<Utc>>,
    /// Whether the write permission bits are all cleared.
    pub readonly: bool,
}

impl PathHandle {
    fn stat(&self) -> Result<fs::Metadata> {
        fs::metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))
    }

    fn timestamp(
        &self,
        attribute: &str,
        read: impl FnOnce(&fs::Metadata) -> io::Result<SystemTime>,
    ) -> Result<DateTime<Utc>> {
        let metadata = self.stat()?;
        match read(&metadata) {
            Ok(time) => Ok(DateTime::<Utc>::from(time)),
            Err(e) if e.kind() == io::ErrorKind::Unsupported => Err(Error::Unsupported {
                path: self.as_path().to_path_buf(),
                attribute: attribute.to_string(),
            }),
            Err(e) => Err(Error::from_io(self.as_path(), e)),
        }
    }

    /// Byte length of a regular file.
    ///
    /// Directories are rejected; use [`disk_usage`](Self::disk_usage) for the
    /// recursive total.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist and `IsADirectory` if it
    /// names a directory.
    pub fn size(&self) -> Result<u64> {
        let metadata = self.stat()?;
        if metadata.is_dir() {
            return Err(Error::IsADirectory {
                path: self.as_path().to_path_buf(),
            });
        }
        Ok(metadata.len())
    }

    /// Last modification time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist.
    pub fn modified_time(&self) -> Result<DateTime<Utc>> {
        self.timestamp("modification time", fs::Metadata::modified)
    }

    /// Last access time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist.
    pub fn accessed_time(&self) -> Result<DateTime<Utc>> {
        self.timestamp("access time", fs::Metadata::accessed)
    }

    /// Creation (birth) time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist and `Unsupported` when
    /// the platform or filesystem does not record birth times.
    pub fn created_time(&self) -> Result<DateTime<Utc>> {
        self.timestamp("creation time", fs::Metadata::created)
    }

    /// Last status change time: the moment the entry's inode (contents,
    /// permissions, owner or link count) last changed. This is not the
    /// creation time, and it cannot be set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist and `Unsupported` on
    /// platforms without an inode change time.
    pub fn changed_time(&self) -> Result<DateTime<Utc>> {
        let metadata = self.stat()?;
        status_change(&metadata).ok_or_else(|| Error::Unsupported {
            path: self.as_path().to_path_buf(),
            attribute: "status change time".to_string(),
        })
    }

    /// Whether anything exists at this path. Links are followed, so a
    /// dangling link reports `false`.
    #[must_use]
    pub fn exists(&self) -> bool {
        fs::metadata(self.as_path()).is_ok()
    }

    /// Whether the path names a regular file (links followed).
    #[must_use]
    pub fn is_file(&self) -> bool {
        fs::metadata(self.as_path()).is_ok_and(|m| m.is_file())
    }

    /// Whether the path names a directory (links followed).
    #[must_use]
    pub fn is_directory(&self) -> bool {
        fs::metadata(self.as_path()).is_ok_and(|m| m.is_dir())
    }

    /// Whether the path itself is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        fs::symlink_metadata(self.as_path()).is_ok_and(|m| m.file_type().is_symlink())
    }

    /// Whether the entry is hidden: a dot-prefixed name on Unix, the hidden
    /// attribute on Windows.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
            fs::symlink_metadata(self.as_path())
                .is_ok_and(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        }
        #[cfg(not(windows))]
        {
            let name = self.name();
            name.starts_with('.') && name != "." && name != ".."
        }
    }

    /// Whether the current process may read this path. Missing paths
    /// report `false`.
    ///
    /// On Unix this asks the kernel with the real user and group ids, so it
    /// honours ownership, group membership and the superuser.
    #[must_use]
    pub fn can_read(&self) -> bool {
        #[cfg(unix)]
        {
            access(self.as_path(), libc::R_OK)
        }
        #[cfg(not(unix))]
        {
            self.exists()
        }
    }

    /// Whether the current process may write this path.
    #[must_use]
    pub fn can_write(&self) -> bool {
        #[cfg(unix)]
        {
            access(self.as_path(), libc::W_OK)
        }
        #[cfg(not(unix))]
        {
            self.stat().is_ok_and(|m| !m.permissions().readonly())
        }
    }

    /// Whether the current process may execute this file, or search this
    /// directory.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        #[cfg(unix)]
        {
            access(self.as_path(), libc::X_OK)
        }
        #[cfg(not(unix))]
        {
            self.is_directory()
                || self.extension().is_some_and(|ext| {
                    ["exe", "bat", "cmd", "com"].contains(&ext.to_ascii_lowercase().as_str())
                })
        }
    }

    /// Whether the path is a mount point: the root of a mounted filesystem.
    ///
    /// A directory is a mount point when it lives on a different device from
    /// its parent, or when it is its own parent. Links are never mount
    /// points. Missing paths report `false`.
    #[must_use]
    pub fn is_mount(&self) -> bool {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;

            let Ok(own) = fs::symlink_metadata(self.as_path()) else {
                return false;
            };
            if own.file_type().is_symlink() {
                return false;
            }
            let Ok(parent) = fs::symlink_metadata(self.as_path().join("..")) else {
                return false;
            };
            own.dev() != parent.dev() || own.ino() == parent.ino()
        }
        #[cfg(not(unix))]
        {
            self.canonical()
                .is_ok_and(|path| path.as_path().parent().is_none())
        }
    }

    /// Whether the entry's permissions forbid writing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist.
    pub fn is_readonly(&self) -> Result<bool> {
        Ok(self.stat()?.permissions().readonly())
    }

    /// Whether `other` names the same file on disk, after resolving links.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either path does not exist.
    pub fn same_file(&self, other: impl Into<PathHandle>) -> Result<bool> {
        Ok(self.canonical()? == other.into().canonical()?)
    }

    /// Snapshot all metadata at once, without following a final link.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing (not even a dangling link) exists here.
    pub fn info(&self) -> Result<PathInfo> {
        let metadata =
            fs::symlink_metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
        Ok(PathInfo {
            path: self.as_path().to_path_buf(),
            kind: EntryKind::of(&metadata),
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            accessed: metadata.accessed().ok().map(DateTime::<Utc>::from),
            created: metadata.created().ok().map(DateTime::<Utc>::from),
            changed: status_change(&metadata),
            readonly: metadata.permissions().readonly(),
        })
    }

    /// The entries of this directory as handles, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist and `NotADirectory` if
    /// it is not a directory.
    pub fn list(&self) -> Result<Vec<PathHandle>> {
        let read_dir =
            fs::read_dir(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
        let mut entries = read_dir
            .map(|entry| entry.map(|e| PathHandle::new(e.path())))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| Error::from_io(self.as_path(), e))?;
        entries.sort();
        Ok(entries)
    }

    /// The regular files directly inside this directory.
    ///
    /// # Errors
    ///
    /// As for [`list`](Self::list).
    pub fn list_files(&self) -> Result<Vec<PathHandle>> {
        Ok(self.list()?.into_iter().filter(Self::is_file).collect())
    }

    /// The directories directly inside this directory.
    ///
    /// # Errors
    ///
    /// As for [`list`](Self::list).
    pub fn list_dirs(&self) -> Result<Vec<PathHandle>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(Self::is_directory)
            .collect())
    }
}

#[cfg(unix)]
fn status_change(metadata: &fs::Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(metadata.ctime_nsec()).ok()?;
    DateTime::from_timestamp(metadata.ctime(), nanos)
}

#[cfg(not(unix))]
fn status_change(_metadata: &fs::Metadata) -> Option<DateTime<Utc>> {
    None
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn access(path: &std::path::Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(raw) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `raw` is NUL-terminated and outlives the call.
    unsafe { libc::access(raw.as_ptr(), mode) == 0 }
}
