//! Path canonicalization.
//!
//! Canonicalization consults the filesystem to follow symbolic links, so
//! unlike the lexical helpers in [`normalize`](super::normalize) it requires
//! the path to exist.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve `path` to its unique, link-free absolute form.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist (`NotFound`)
/// - Permission is denied (`PermissionDenied`)
/// - An I/O error occurs
///
/// # Examples
///
/// ```no_run
/// use iopath::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| Error::from_io(path, e))
}

/// Canonicalize the existing portion of a path.
///
/// For non-existent paths, this function finds the longest existing ancestor
/// and canonicalizes it, then appends the non-existent components. Used to
/// compare locations that are about to be created.
///
/// # Errors
///
/// Returns an error if no ancestor exists or canonicalizing it fails.
pub fn canonicalize_existing(path: &Path) -> Result<PathBuf> {
    let mut current = path.to_path_buf();
    let mut missing = Vec::new();

    loop {
        match fs::canonicalize(&current) {
            Ok(mut canonical) => {
                canonical.extend(missing.iter().rev());
                return Ok(canonical);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::from_io(&current, e)),
        }

        match current.file_name() {
            Some(name) => {
                missing.push(name.to_os_string());
                current.pop();
                if current.as_os_str().is_empty() {
                    current.push(".");
                }
            }
            None => {
                return Err(Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "Cannot find any existing portion of path".to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_nonexistent() {
        let result = canonicalize(Path::new("/nonexistent/path/xyz"));
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
    }

    #[test]
    fn test_canonicalize_resolves_dots() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let dotted = dir.path().join("sub").join("..").join(".");
        assert_eq!(
            canonicalize(&dotted).unwrap(),
            fs::canonicalize(dir.path()).unwrap()
        );
    }

    #[test]
    fn test_canonicalize_existing_partial() {
        let dir = tempdir().unwrap();
        let full = dir.path().join("nonexistent").join("path");

        let canonical = canonicalize_existing(&full).unwrap();
        assert_eq!(
            canonical,
            fs::canonicalize(dir.path())
                .unwrap()
                .join("nonexistent")
                .join("path")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");

        fs::write(&target, "test").unwrap();
        symlink(&target, &link).unwrap();

        assert_eq!(
            canonicalize(&link).unwrap(),
            fs::canonicalize(&target).unwrap()
        );
    }
}
