use std::fs;
use std::path::PathBuf;

use crate::error::{Error, FailedEntry, Result};
use crate::ops::walk::{Walk, WalkEvent};
use crate::ops::SymlinkPolicy;
use crate::path::{EntryKind, PathHandle};

impl PathHandle {
    /// Remove the file, link or directory at this path.
    ///
    /// A link is removed itself; its target is left alone. A directory is
    /// removed only if empty unless `recursive` is set, in which case the
    /// whole tree goes, links inside it included but never their targets.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NotFound` if nothing exists at the path
    /// - `DirectoryNotEmpty` for a non-empty directory without `recursive`
    /// - `PartialFailure` if a recursive delete could not remove every entry
    pub fn delete(&self, recursive: bool) -> Result<()> {
        let metadata =
            fs::symlink_metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;

        match EntryKind::of(&metadata) {
            EntryKind::Directory if recursive => delete_tree(self),
            EntryKind::Directory => {
                fs::remove_dir(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
                log::debug!("removed directory {self}");
                Ok(())
            }
            _ => {
                fs::remove_file(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
                log::debug!("removed {self}");
                Ok(())
            }
        }
    }

    /// Like [`delete`](Self::delete), but a missing path is not an error.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Any error from `delete` other than `NotFound`.
    pub fn delete_if_exists(&self, recursive: bool) -> Result<bool> {
        match self.delete(recursive) {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn delete_tree(root: &PathHandle) -> Result<()> {
    let walk = Walk::new(root.as_path(), SymlinkPolicy::Preserve)
        .map_err(|e| Error::from_io(root.as_path(), e))?;

    let mut completed: Vec<PathBuf> = Vec::new();
    let mut failures: Vec<FailedEntry> = Vec::new();

    for event in walk {
        match event {
            WalkEvent::Visit(entry) if entry.kind == EntryKind::Directory => {}
            WalkEvent::Visit(entry) => match fs::remove_file(&entry.path) {
                Ok(()) => completed.push(entry.path),
                Err(e) => failures.push(FailedEntry::new(entry.path, e)),
            },
            WalkEvent::Leave(entry) => match fs::remove_dir(&entry.path) {
                Ok(()) => completed.push(entry.path),
                Err(e) => failures.push(FailedEntry::new(entry.path, e)),
            },
            WalkEvent::Failed(failed) => failures.push(failed),
        }
    }

    if failures.is_empty() {
        log::debug!("removed tree {root} ({} entries)", completed.len());
        return Ok(());
    }

    log::warn!("delete of {root} left {} entries behind", failures.len());
    Err(Error::PartialFailure {
        operation: "delete",
        root: root.as_path().to_path_buf(),
        completed,
        failures,
    })
}
