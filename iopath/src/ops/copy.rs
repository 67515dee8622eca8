use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, FailedEntry, Result};
use crate::ops::walk::{Entry, Walk, WalkEvent};
use crate::ops::{CopyOptions, CopyReport};
use crate::path::canonicalize::{canonicalize, canonicalize_existing};
use crate::path::{EntryKind, PathHandle};

impl PathHandle {
    /// Copy this file or directory tree to `destination` with default
    /// options: nothing is overwritten and links are copied as links.
    ///
    /// # Errors
    ///
    /// As for [`copy_with`](Self::copy_with).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iopath::PathHandle;
    ///
    /// let report = PathHandle::new("/srv/site").copy("/srv/site.bak").unwrap();
    /// println!("{} files, {} bytes", report.files, report.bytes);
    /// ```
    pub fn copy(&self, destination: impl Into<PathHandle>) -> Result<CopyReport> {
        self.copy_with(destination, &CopyOptions::default())
    }

    /// Copy this file or directory tree to `destination`.
    ///
    /// A file is duplicated byte for byte. A directory is copied entry by
    /// entry, depth first, keeping each file's modification time and each
    /// directory's permissions. Links follow `options.symlinks`.
    ///
    /// A tree copy is best-effort: an entry that fails is recorded and the
    /// walk moves on. Whatever was copied stays in place.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NotFound` if the source does not exist
    /// - `AlreadyExists` if the destination exists and `options.overwrite` is false
    /// - `NotADirectory` / `IsADirectory` if an existing destination is of the
    ///   wrong kind to receive the source
    /// - `InvalidPath` if the destination is the source or lies inside it
    /// - `PartialFailure` if some entries of a tree could not be copied
    pub fn copy_with(
        &self,
        destination: impl Into<PathHandle>,
        options: &CopyOptions,
    ) -> Result<CopyReport> {
        copy_tree(self, &destination.into(), options)
    }
}

pub(crate) fn copy_tree(
    source: &PathHandle,
    destination: &PathHandle,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let mut walk = Walk::new(source.as_path(), options.symlinks)
        .map_err(|e| Error::from_io(source.as_path(), e))?;
    let root_kind = walk.root_kind();
    check_destination(source, destination, root_kind, options)?;

    let mut report = CopyReport::default();

    if root_kind != EntryKind::Directory {
        if let Some(WalkEvent::Visit(entry)) = walk.next() {
            copy_entry(&entry, destination.as_path(), options, &mut report)
                .map_err(|failed| Error::from_io(failed.path, failed.source))?;
        }
        log::debug!("copied {source} to {destination}");
        return Ok(report);
    }

    let mut completed: Vec<PathBuf> = Vec::new();
    let mut failures: Vec<FailedEntry> = Vec::new();

    while let Some(event) = walk.next() {
        match event {
            WalkEvent::Visit(entry) => {
                match copy_entry(&entry, destination.as_path(), options, &mut report) {
                    Ok(()) => completed.push(entry.path),
                    Err(failed) => {
                        // Nothing can be placed under a directory that was not created.
                        if entry.kind == EntryKind::Directory {
                            walk.skip_subtree();
                        }
                        failures.push(failed);
                    }
                }
            }
            WalkEvent::Leave(entry) => {
                let target = entry.target_under(destination.as_path());
                if let Err(e) = copy_permissions(&entry.path, &target) {
                    failures.push(FailedEntry::new(target, e));
                }
            }
            WalkEvent::Failed(failed) => failures.push(failed),
        }
    }

    if failures.is_empty() {
        log::debug!(
            "copied {source} to {destination}: {} files, {} directories, {} links",
            report.files,
            report.directories,
            report.symlinks
        );
        return Ok(report);
    }

    log::warn!(
        "copy of {source} to {destination} failed for {} entries",
        failures.len()
    );
    Err(Error::PartialFailure {
        operation: "copy",
        root: source.as_path().to_path_buf(),
        completed,
        failures,
    })
}

fn check_destination(
    source: &PathHandle,
    destination: &PathHandle,
    root_kind: EntryKind,
    options: &CopyOptions,
) -> Result<()> {
    let dst = destination.as_path();
    match fs::symlink_metadata(dst) {
        Ok(_) if !options.overwrite => {
            return Err(Error::AlreadyExists {
                path: dst.to_path_buf(),
            })
        }
        Ok(_) => {
            let dst_is_dir = destination.is_directory();
            if root_kind == EntryKind::Directory && !dst_is_dir {
                return Err(Error::NotADirectory {
                    path: dst.to_path_buf(),
                });
            }
            if root_kind != EntryKind::Directory && dst_is_dir {
                return Err(Error::IsADirectory {
                    path: dst.to_path_buf(),
                });
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::from_io(dst, e)),
    }

    let src_canonical = canonicalize(source.as_path())?;
    let dst_canonical = canonicalize_existing(dst)?;
    let nested = root_kind == EntryKind::Directory && dst_canonical.starts_with(&src_canonical);
    if nested || dst_canonical == src_canonical {
        return Err(Error::InvalidPath {
            path: dst.to_path_buf(),
            reason: format!("destination is the same as or inside {source}"),
        });
    }
    Ok(())
}

fn copy_entry(
    entry: &Entry,
    destination: &Path,
    options: &CopyOptions,
    report: &mut CopyReport,
) -> std::result::Result<(), FailedEntry> {
    let target = entry.target_under(destination);
    let fail = |e: io::Error| FailedEntry::new(&target, e);

    match entry.kind {
        EntryKind::Directory => {
            match fs::create_dir(&target) {
                Ok(()) => {}
                Err(e)
                    if e.kind() == io::ErrorKind::AlreadyExists
                        && options.overwrite
                        && target.is_dir() => {}
                Err(e) => return Err(fail(e)),
            }
            report.directories += 1;
        }
        EntryKind::File => {
            if options.overwrite {
                clear_link(&target).map_err(fail)?;
            }
            let bytes = fs::copy(&entry.path, &target).map_err(fail)?;
            if let Err(e) = copy_modified_time(&entry.path, &target) {
                log::warn!("kept fresh timestamp on {}: {e}", target.display());
            }
            report.files += 1;
            report.bytes += bytes;
        }
        EntryKind::Symlink => {
            if options.overwrite {
                clear_link(&target).map_err(fail)?;
                if target.is_file() {
                    fs::remove_file(&target).map_err(fail)?;
                }
            }
            let link_target =
                fs::read_link(&entry.path).map_err(|e| FailedEntry::new(&entry.path, e))?;
            create_symlink(&entry.path, &link_target, &target).map_err(fail)?;
            report.symlinks += 1;
        }
        EntryKind::Other => {
            return Err(FailedEntry::new(
                &entry.path,
                io::Error::new(
                    io::ErrorKind::Unsupported,
                    "sockets, pipes and devices are not copied",
                ),
            ));
        }
    }
    Ok(())
}

/// Remove a link sitting where a copy will be written, so the copy replaces
/// the link instead of writing through it.
fn clear_link(target: &Path) -> io::Result<()> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => fs::remove_file(target),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn copy_modified_time(source: &Path, target: &Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    // The copy carries the source's permissions and may already be read-only.
    #[cfg(unix)]
    let file = fs::File::open(target)?;
    #[cfg(not(unix))]
    let file = fs::OpenOptions::new().write(true).open(target)?;
    file.set_modified(modified)
}

fn copy_permissions(source: &Path, target: &Path) -> io::Result<()> {
    let permissions = fs::metadata(source)?.permissions();
    fs::set_permissions(target, permissions)
}

#[cfg(unix)]
fn create_symlink(_source: &Path, link_target: &Path, at: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link_target, at)
}

#[cfg(windows)]
fn create_symlink(source: &Path, link_target: &Path, at: &Path) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    if fs::metadata(source).is_ok_and(|m| m.is_dir()) {
        symlink_dir(link_target, at)
    } else {
        symlink_file(link_target, at)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_source: &Path, _link_target: &Path, _at: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
