//! Iterative depth-first traversal shared by the recursive operations.
//!
//! The walker keeps an explicit stack instead of recursing. A directory's
//! entries are read in full when the directory is visited (so no directory
//! handle stays open while its children are processed) and pushed in reverse
//! name order, giving a deterministic pre-order. A `Leave` marker sits below
//! the children on the stack and fires once all of them have been yielded,
//! which is where post-order work such as `rmdir` happens.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::FailedEntry;
use crate::ops::SymlinkPolicy;
use crate::path::EntryKind;

/// One filesystem entry reached by the walk.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Path relative to the walk root; empty for the root itself.
    pub relative: PathBuf,
    /// Kind after applying the link policy.
    pub kind: EntryKind,
    /// Byte length after applying the link policy.
    pub len: u64,
    /// Canonical location, recorded for directories when following links.
    ancestor_key: Option<PathBuf>,
}

impl Entry {
    fn stat(path: PathBuf, relative: PathBuf, links: SymlinkPolicy) -> io::Result<Self> {
        let metadata = fs::symlink_metadata(&path)?;
        let mut kind = EntryKind::of(&metadata);
        let mut len = metadata.len();
        if kind == EntryKind::Symlink && links == SymlinkPolicy::Follow {
            // A dangling link stays a link.
            if let Ok(target) = fs::metadata(&path) {
                kind = EntryKind::of(&target);
                len = target.len();
            }
        }
        Ok(Self {
            path,
            relative,
            kind,
            len,
            ancestor_key: None,
        })
    }

    /// Where this entry lands under `destination`.
    pub fn target_under(&self, destination: &Path) -> PathBuf {
        if self.relative.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(&self.relative)
        }
    }
}

/// What the walk reports next.
#[derive(Debug)]
pub(crate) enum WalkEvent {
    /// An entry, in pre-order. Directories are reported before their children.
    Visit(Entry),
    /// Every child of this directory has been reported.
    Leave(Entry),
    /// The entry could not be examined or read; its subtree is skipped.
    Failed(FailedEntry),
}

enum Step {
    Visit(Entry),
    Leave(Entry),
    Failed(FailedEntry),
}

/// Depth-first walk over a tree rooted at one path.
pub(crate) struct Walk {
    stack: Vec<Step>,
    links: SymlinkPolicy,
    ancestors: HashSet<PathBuf>,
    root_kind: EntryKind,
}

impl Walk {
    /// Start a walk at `root`.
    ///
    /// The root itself is examined without following a final link; under
    /// [`SymlinkPolicy::Follow`] a link root is resolved like any other entry.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the root cannot be examined (most often
    /// `NotFound`).
    pub fn new(root: &Path, links: SymlinkPolicy) -> io::Result<Self> {
        let entry = Entry::stat(root.to_path_buf(), PathBuf::new(), links)?;
        let root_kind = entry.kind;
        Ok(Self {
            stack: vec![Step::Visit(entry)],
            links,
            ancestors: HashSet::new(),
            root_kind,
        })
    }

    /// Kind of the root entry.
    pub fn root_kind(&self) -> EntryKind {
        self.root_kind
    }

    /// Drop the children of the directory most recently visited.
    ///
    /// Must be called right after receiving its `Visit` event. The directory's
    /// `Leave` event is dropped as well.
    pub fn skip_subtree(&mut self) {
        while let Some(step) = self.stack.pop() {
            if let Step::Leave(entry) = step {
                if let Some(key) = entry.ancestor_key {
                    self.ancestors.remove(&key);
                }
                return;
            }
        }
    }

    fn descend(&mut self, mut dir: Entry) -> WalkEvent {
        if self.links == SymlinkPolicy::Follow {
            match fs::canonicalize(&dir.path) {
                Ok(key) => {
                    if !self.ancestors.insert(key.clone()) {
                        return WalkEvent::Failed(FailedEntry::new(
                            dir.path,
                            io::Error::other("symbolic link cycle back to an ancestor directory"),
                        ));
                    }
                    dir.ancestor_key = Some(key);
                }
                Err(e) => return WalkEvent::Failed(FailedEntry::new(dir.path, e)),
            }
        }

        let read_dir = match fs::read_dir(&dir.path) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                if let Some(key) = dir.ancestor_key.take() {
                    self.ancestors.remove(&key);
                }
                return WalkEvent::Failed(FailedEntry::new(dir.path, e));
            }
        };

        let mut children = Vec::new();
        for item in read_dir {
            match item {
                Ok(child) => {
                    let name = child.file_name();
                    children.push((dir.path.join(&name), dir.relative.join(&name)));
                }
                Err(e) => self.stack.push(Step::Failed(FailedEntry::new(&dir.path, e))),
            }
        }
        children.sort();

        self.stack.push(Step::Leave(dir.clone()));
        for (path, relative) in children.into_iter().rev() {
            match Entry::stat(path.clone(), relative, self.links) {
                Ok(entry) => self.stack.push(Step::Visit(entry)),
                Err(e) => self.stack.push(Step::Failed(FailedEntry::new(path, e))),
            }
        }
        log::debug!("descending into {}", dir.path.display());
        WalkEvent::Visit(dir)
    }
}

impl Iterator for Walk {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        let step = self.stack.pop()?;
        Some(match step {
            Step::Visit(entry) if entry.kind == EntryKind::Directory => self.descend(entry),
            Step::Visit(entry) => WalkEvent::Visit(entry),
            Step::Leave(mut entry) => {
                if let Some(key) = entry.ancestor_key.take() {
                    self.ancestors.remove(&key);
                }
                WalkEvent::Leave(entry)
            }
            Step::Failed(failed) => WalkEvent::Failed(failed),
        })
    }
}
