//! Common test utilities for integration tests.
//!
//! This module provides a fixture builder for small directory trees and a
//! few assertions shared by the integration suites.

use std::fs;
use std::path::{Path, PathBuf};

use iopath::PathHandle;
use tempfile::TempDir;

/// Builder for a directory tree inside a fresh temporary directory.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let fixture = TreeFixture::new()
///     .with_file("a.txt", 10)
///     .with_dir("empty")
///     .build();
/// assert!(fixture.root().join("a.txt").exists());
/// ```
#[allow(dead_code)]
pub struct TreeFixture {
    files: Vec<(PathBuf, usize)>,
    dirs: Vec<PathBuf>,
    links: Vec<(PathBuf, PathBuf)>,
}

/// A built tree. The temporary directory lives as long as this value.
#[allow(dead_code)]
pub struct Tree {
    temp_dir: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Start an empty tree.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            dirs: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Add a file of `len` bytes; missing parent directories are created.
    pub fn with_file(mut self, relative: &str, len: usize) -> Self {
        self.files.push((PathBuf::from(relative), len));
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, relative: &str) -> Self {
        self.dirs.push(PathBuf::from(relative));
        self
    }

    /// Add a symbolic link at `relative` pointing at `target` (taken verbatim).
    pub fn with_link(mut self, relative: &str, target: impl Into<PathBuf>) -> Self {
        self.links.push((PathBuf::from(relative), target.into()));
        self
    }

    /// Create everything under `<tempdir>/tree`.
    pub fn build(self) -> Tree {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().join("tree");
        fs::create_dir(&root).expect("Failed to create tree root");

        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir)).expect("Failed to create directory");
        }
        for (file, len) in &self.files {
            let path = root.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent");
            }
            fs::write(&path, content(*len)).expect("Failed to write file");
        }
        #[cfg(unix)]
        for (link, target) in &self.links {
            std::os::unix::fs::symlink(target, root.join(link)).expect("Failed to create link");
        }

        Tree { temp_dir, root }
    }
}

#[allow(dead_code)]
impl Tree {
    /// Root of the built tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle for the root.
    pub fn handle(&self) -> PathHandle {
        PathHandle::new(&self.root)
    }

    /// A path next to the tree root, inside the same temporary directory.
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Deterministic file content of `len` bytes.
#[allow(dead_code)]
pub fn content(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Every path under `root`, relative and sorted, links not followed.
#[allow(dead_code)]
pub fn listing(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).expect("Failed to read dir") {
            let path = entry.expect("Failed to read entry").path();
            let relative = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            out.push(relative);
            if fs::symlink_metadata(&path).unwrap().is_dir() {
                stack.push(path);
            }
        }
    }
    out.sort();
    out
}

/// Assert two trees hold the same entries with the same file contents.
#[allow(dead_code)]
pub fn assert_same_tree(left: &Path, right: &Path) {
    let entries = listing(left);
    assert_eq!(entries, listing(right), "tree shapes differ");
    for relative in entries {
        let a = left.join(&relative);
        let b = right.join(&relative);
        let meta = fs::symlink_metadata(&a).unwrap();
        if meta.file_type().is_symlink() {
            assert_eq!(fs::read_link(&a).unwrap(), fs::read_link(&b).unwrap());
        } else if meta.is_file() {
            assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap(), "{relative} differs");
        }
    }
}
