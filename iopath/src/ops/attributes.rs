use std::fs;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::ops::PermissionScope;
use crate::path::PathHandle;

impl PathHandle {
    /// Clear or restore write permission.
    ///
    /// On Unix, `true` clears every write bit and `false` restores the
    /// owner's write bit only. Elsewhere the platform's read-only flag is
    /// toggled.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist and `PermissionDenied`
    /// if the caller does not own it.
    pub fn set_readonly(&self, readonly: bool) -> Result<()> {
        let mut permissions = fs::metadata(self.as_path())
            .map_err(|e| Error::from_io(self.as_path(), e))?
            .permissions();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = permissions.mode();
            permissions.set_mode(if readonly { mode & !0o222 } else { mode | 0o200 });
        }
        #[cfg(not(unix))]
        permissions.set_readonly(readonly);

        fs::set_permissions(self.as_path(), permissions)
            .map_err(|e| Error::from_io(self.as_path(), e))
    }

    /// Grant or revoke read permission for the owner or for everyone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist, `PermissionDenied` if
    /// the caller does not own it, and `Unsupported` off Unix.
    pub fn set_readable(&self, readable: bool, scope: PermissionScope) -> Result<()> {
        self.update_mode("read permission", scope, 0o444, readable)
    }

    /// Grant or revoke write permission for the owner or for everyone.
    ///
    /// Off Unix this sets or clears the read-only flag and ignores `scope`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist and `PermissionDenied`
    /// if the caller does not own it.
    pub fn set_writable(&self, writable: bool, scope: PermissionScope) -> Result<()> {
        if cfg!(unix) {
            self.update_mode("write permission", scope, 0o222, writable)
        } else {
            self.set_readonly(!writable)
        }
    }

    /// Grant or revoke execute (directory search) permission for the owner
    /// or for everyone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist, `PermissionDenied` if
    /// the caller does not own it, and `Unsupported` off Unix.
    pub fn set_executable(&self, executable: bool, scope: PermissionScope) -> Result<()> {
        self.update_mode("execute permission", scope, 0o111, executable)
    }

    #[cfg(unix)]
    fn update_mode(
        &self,
        _attribute: &str,
        scope: PermissionScope,
        bits: u32,
        enabled: bool,
    ) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(self.as_path())
            .map_err(|e| Error::from_io(self.as_path(), e))?
            .permissions();
        let mask = scope.mask(bits);
        let mode = permissions.mode();
        permissions.set_mode(if enabled { mode | mask } else { mode & !mask });
        log::debug!(
            "setting mode of {} to {:o}",
            self.as_path().display(),
            permissions.mode() & 0o7777
        );
        fs::set_permissions(self.as_path(), permissions)
            .map_err(|e| Error::from_io(self.as_path(), e))
    }

    #[cfg(not(unix))]
    fn update_mode(
        &self,
        attribute: &str,
        _scope: PermissionScope,
        _bits: u32,
        _enabled: bool,
    ) -> Result<()> {
        fs::metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
        Err(Error::Unsupported {
            path: self.as_path().to_path_buf(),
            attribute: attribute.to_string(),
        })
    }

    /// Set the modification and access times of a file or directory.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist, `IsADirectory` on
    /// platforms that cannot open directories for writing, or the OS error.
    pub fn set_modified_time(&self, time: DateTime<Utc>) -> Result<()> {
        // Unix accepts new times through a read-only descriptor, which also
        // covers directories and read-only files.
        #[cfg(unix)]
        let file = fs::File::open(self.as_path());
        #[cfg(not(unix))]
        let file = fs::OpenOptions::new().write(true).open(self.as_path());
        let file = file.map_err(|e| Error::from_io(self.as_path(), e))?;
        let times = fs::FileTimes::new()
            .set_modified(time.into())
            .set_accessed(time.into());
        file.set_times(times)
            .map_err(|e| Error::from_io(self.as_path(), e))
    }

    /// Hide or reveal the entry.
    ///
    /// On Unix visibility is part of the name, so this renames the entry with
    /// or without a leading dot and returns the handle for the new name. It
    /// returns `self` unchanged when the entry is already in the requested
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` on platforms where hiding is an attribute rather
    /// than a naming convention, and otherwise as for
    /// [`rename`](Self::rename).
    pub fn set_hidden(&self, hidden: bool) -> Result<PathHandle> {
        if !cfg!(unix) {
            return Err(Error::Unsupported {
                path: self.as_path().to_path_buf(),
                attribute: "hidden attribute".to_string(),
            });
        }

        let name = self.name();
        if name.is_empty() || name == "." || name == ".." {
            return Err(Error::InvalidPath {
                path: self.as_path().to_path_buf(),
                reason: "Only a named entry can be hidden or revealed".to_string(),
            });
        }
        if self.is_hidden() == hidden {
            fs::symlink_metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
            return Ok(self.clone());
        }
        if hidden {
            self.rename(&format!(".{name}"))
        } else {
            self.rename(name.trim_start_matches('.'))
        }
    }
}
