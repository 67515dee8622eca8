use std::fs;
use std::io;

use crate::error::{Error, Result};
use crate::ops::copy::copy_tree;
use crate::ops::CopyOptions;
use crate::path::PathHandle;

impl PathHandle {
    /// Move this file or directory tree to `destination`.
    ///
    /// Within one filesystem this is a single atomic rename. When the rename
    /// fails because the destination is on another device, the tree is
    /// copied (links preserved) and the source removed afterwards. The source
    /// is only touched once the copy has fully succeeded; a failed copy is
    /// cleaned up from the destination and the source is left intact.
    ///
    /// Returns a handle for the new location.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the source does not exist, `AlreadyExists` if
    /// the destination is occupied, or whatever the rename or fallback copy
    /// reported.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iopath::PathHandle;
    ///
    /// let report = PathHandle::new("/tmp/report.pdf");
    /// let archived = report.move_to("/srv/archive/report.pdf").unwrap();
    /// assert!(archived.exists());
    /// assert!(!report.exists());
    /// ```
    pub fn move_to(&self, destination: impl Into<PathHandle>) -> Result<PathHandle> {
        let destination = destination.into();

        fs::symlink_metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
        if fs::symlink_metadata(destination.as_path()).is_ok() {
            return Err(Error::AlreadyExists {
                path: destination.into_path_buf(),
            });
        }

        match fs::rename(self.as_path(), destination.as_path()) {
            Ok(()) => {
                log::debug!("renamed {self} to {destination}");
                Ok(destination)
            }
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                log::warn!("{self} and {destination} are on different devices, copying instead");
                copy_then_remove(self, &destination)?;
                Ok(destination)
            }
            Err(e) => Err(Error::from_io(self.as_path(), e)),
        }
    }

    /// Give this entry a new name in the same directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `new_name` is empty, `.`/`..`, or contains a
    /// separator, and otherwise as for [`move_to`](Self::move_to).
    pub fn rename(&self, new_name: &str) -> Result<PathHandle> {
        let destination = self.with_name(new_name)?;
        self.move_to(destination)
    }
}

fn copy_then_remove(source: &PathHandle, destination: &PathHandle) -> Result<()> {
    if let Err(copy_error) = copy_tree(source, destination, &CopyOptions::default()) {
        if !copy_error.is_already_exists() {
            if let Err(cleanup) = destination.delete_if_exists(true) {
                log::warn!("could not clean up partial copy at {destination}: {cleanup}");
            }
        }
        return Err(copy_error);
    }
    source.delete(true)
}
