use std::fs;

use crate::error::{Error, Result};
use crate::ops::walk::{Walk, WalkEvent};
use crate::ops::SymlinkPolicy;
use crate::path::{EntryKind, PathHandle};

impl PathHandle {
    /// Total apparent size, in bytes, of everything under this path.
    ///
    /// For a file this equals [`size`](Self::size). For a directory it sums
    /// the lengths of all non-directory entries in the tree. Links inside the
    /// tree are never followed: each contributes its own length, so cyclic
    /// links cannot loop. A link named by the handle itself is resolved first,
    /// like [`size`](Self::size) does; a dangling one counts as its own length.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist, or the first error hit
    /// while reading the tree.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iopath::PathHandle;
    ///
    /// let bytes = PathHandle::new("/var/cache").disk_usage().unwrap();
    /// println!("{bytes} bytes");
    /// ```
    pub fn disk_usage(&self) -> Result<u64> {
        let root = if self.is_symlink() && self.exists() {
            let target = self.canonical()?;
            log::debug!(
                "measuring link {} at its target {target}",
                self.as_path().display()
            );
            target
        } else {
            self.clone()
        };
        if root.is_file() {
            return fs::metadata(root.as_path())
                .map(|metadata| metadata.len())
                .map_err(|e| Error::from_io(root.as_path(), e));
        }

        let walk = Walk::new(root.as_path(), SymlinkPolicy::Preserve)
            .map_err(|e| Error::from_io(root.as_path(), e))?;

        let mut total = 0u64;
        for event in walk {
            match event {
                WalkEvent::Visit(entry) if entry.kind != EntryKind::Directory => {
                    total = total.saturating_add(entry.len);
                }
                WalkEvent::Failed(failed) => return Err(Error::from_io(failed.path, failed.source)),
                WalkEvent::Visit(_) | WalkEvent::Leave(_) => {}
            }
        }
        Ok(total)
    }
}
