use std::fs::{self, OpenOptions};
use std::io;

use crate::error::{Error, Result};
use crate::path::PathHandle;

impl PathHandle {
    /// Create an empty regular file.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if anything already occupies the path and
    /// `NotFound` if the parent directory is missing.
    pub fn create_file(&self) -> Result<()> {
        self.create_file_with(false)
    }

    /// Create an empty regular file, optionally truncating an existing one.
    ///
    /// With `overwrite` set, a pre-existing regular file is truncated to zero
    /// length. A directory at the path is never replaced.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the path is occupied and `overwrite` is
    /// false, `IsADirectory` if a directory occupies it, and `NotFound` if the
    /// parent directory is missing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iopath::PathHandle;
    ///
    /// let marker = PathHandle::new("/tmp/ready");
    /// marker.create_file_with(true).unwrap();
    /// assert_eq!(marker.size().unwrap(), 0);
    /// ```
    pub fn create_file_with(&self, overwrite: bool) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            if self.is_directory() {
                return Err(Error::IsADirectory {
                    path: self.as_path().to_path_buf(),
                });
            }
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        options
            .open(self.as_path())
            .map_err(|e| Error::from_io(self.as_path(), e))?;
        log::debug!("created file {self}");
        Ok(())
    }

    /// Create a directory.
    ///
    /// Without `recursive` the parent must already exist. With it, every
    /// missing ancestor is created. Either way an existing directory at the
    /// path counts as success.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the parent is missing and `recursive` is false,
    /// and `AlreadyExists` if something other than a directory occupies the
    /// path.
    pub fn create_directory(&self, recursive: bool) -> Result<()> {
        let created = if recursive {
            fs::create_dir_all(self.as_path())
        } else {
            fs::create_dir(self.as_path())
        };

        match created {
            Ok(()) => {
                log::debug!("created directory {self}");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.is_directory() => Ok(()),
            Err(e) if self.exists() && !self.is_directory() => {
                log::debug!("create_directory on occupied path {self}: {e}");
                Err(Error::AlreadyExists {
                    path: self.as_path().to_path_buf(),
                })
            }
            Err(e) => Err(Error::from_io(self.as_path(), e)),
        }
    }
}
