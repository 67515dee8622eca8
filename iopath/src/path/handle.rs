//! The path handle and its pure path algebra.

use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::{canonicalize, normalize};

/// A filesystem location, independent of whether anything exists there.
///
/// The handle stores the path exactly as it was given and nothing else: no
/// open descriptors and no cached metadata. Every query goes back to the
/// filesystem, and every derivation (`parent`, `join`, `absolute`, ...)
/// returns a new handle rather than changing this one.
///
/// Handles compare by their stored path, component-wise, so `a/b` and `a/b/`
/// are equal while `a/b` and `./a/b` are not. Use
/// [`same_file`](PathHandle::same_file) to ask whether two handles name the
/// same file on disk.
///
/// Operations that take a second location accept anything convertible into a
/// handle: `&str`, `String`, `&Path`, `PathBuf` or another `&PathHandle`.
///
/// # Examples
///
/// ```
/// use iopath::PathHandle;
///
/// let log = PathHandle::new("/var/log/app.log");
/// assert_eq!(log.name(), "app.log");
/// assert_eq!(log.parent(), PathHandle::new("/var/log"));
/// assert_eq!(log.parent().join(log.name()).unwrap(), log);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathHandle {
    raw: PathBuf,
}

impl PathHandle {
    /// Wrap a path. Never fails and never touches the filesystem.
    #[must_use]
    pub fn new(raw: impl Into<PathBuf>) -> Self {
        Self { raw: raw.into() }
    }

    /// Build a handle by joining `parts` in order.
    ///
    /// The first part may be absolute; any later absolute part is rejected
    /// with the same policy as [`join`](Self::join).
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `parts` is empty or a later part is absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::PathHandle;
    ///
    /// let handle = PathHandle::from_components(["srv", "data", "db.sqlite"]).unwrap();
    /// assert_eq!(handle.components(), vec!["srv", "data", "db.sqlite"]);
    /// assert!(PathHandle::from_components(["srv", "/etc"]).is_err());
    /// ```
    pub fn from_components<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut parts = parts.into_iter();
        let first = parts.next().ok_or_else(|| Error::InvalidPath {
            path: PathBuf::new(),
            reason: "No path components given".to_string(),
        })?;
        parts.try_fold(Self::new(first.as_ref()), |acc, part| acc.join(part))
    }

    /// Build a handle after expanding `$VAR`/`${VAR}` references and a
    /// leading `~`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not UTF-8, uses `~user` syntax, or the
    /// home directory cannot be determined.
    pub fn expanded(raw: impl AsRef<Path>) -> Result<Self> {
        let vars = normalize::expand_vars(raw.as_ref())?;
        Ok(Self::new(normalize::expand_tilde(&vars)?))
    }

    /// The process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined (for
    /// example because it has been deleted).
    pub fn cwd() -> Result<Self> {
        env::current_dir()
            .map(Self::new)
            .map_err(|e| Error::from_io(".", e))
    }

    /// The current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn home() -> Result<Self> {
        home::home_dir()
            .map(Self::new)
            .ok_or_else(|| Error::InvalidPath {
                path: PathBuf::from("~"),
                reason: "Cannot determine home directory".to_string(),
            })
    }

    /// The platform's primary path separator.
    #[must_use]
    pub const fn separator() -> char {
        MAIN_SEPARATOR
    }

    /// Borrow the stored path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.raw
    }

    /// Convert into the stored `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.raw
    }

    /// The last path component as text. A trailing `..` or `.` is returned
    /// as is; the root and the empty path have no name and yield `""`.
    #[must_use]
    pub fn name(&self) -> String {
        match self.raw.components().next_back() {
            Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
            Some(last @ (Component::ParentDir | Component::CurDir)) => {
                last.as_os_str().to_string_lossy().into_owned()
            }
            _ => String::new(),
        }
    }

    /// The name without its final extension.
    #[must_use]
    pub fn stem(&self) -> Option<String> {
        self.raw
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    /// The final extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.raw
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    /// The containing directory.
    ///
    /// The root is its own parent. A single relative component such as `a`
    /// has the empty path as parent, which stands for the current directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::PathHandle;
    ///
    /// # #[cfg(unix)]
    /// # {
    /// assert_eq!(PathHandle::new("/").parent(), PathHandle::new("/"));
    /// assert_eq!(PathHandle::new("/etc/hosts").parent(), PathHandle::new("/etc"));
    /// # }
    /// assert_eq!(PathHandle::new("a").parent(), PathHandle::new(""));
    /// ```
    #[must_use]
    pub fn parent(&self) -> Self {
        match self.raw.parent() {
            Some(parent) => Self::new(parent),
            None => self.clone(),
        }
    }

    /// Append `child` to this path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `child` is absolute or carries a root or
    /// drive prefix, whatever the base. `std` would silently replace the
    /// base with such a child.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::PathHandle;
    ///
    /// let base = PathHandle::new("project");
    /// assert_eq!(base.join("src/lib.rs").unwrap(), PathHandle::new("project/src/lib.rs"));
    /// assert!(base.join("/etc/passwd").is_err());
    /// ```
    pub fn join(&self, child: impl AsRef<Path>) -> Result<Self> {
        let child = child.as_ref();
        let anchored = child.has_root()
            || child.is_absolute()
            || matches!(child.components().next(), Some(Component::Prefix(_)));
        if anchored {
            return Err(Error::InvalidPath {
                path: child.to_path_buf(),
                reason: format!(
                    "Cannot join an absolute segment onto {}",
                    self.raw.display()
                ),
            });
        }
        Ok(Self::new(self.raw.join(child)))
    }

    /// A sibling with the last component replaced by `name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `name` is not a single plain component.
    pub fn with_name(&self, name: &str) -> Result<Self> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(Self::new(self.raw.with_file_name(name))),
            _ => Err(Error::InvalidPath {
                path: PathBuf::from(name),
                reason: "A name must be a single path component".to_string(),
            }),
        }
    }

    /// Whether the stored path is absolute.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.raw.is_absolute()
    }

    /// The path's components as strings, root and prefix excluded.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        self.raw
            .components()
            .filter_map(|component| match component {
                Component::Prefix(_) | Component::RootDir => None,
                other => Some(other.as_os_str().to_string_lossy().into_owned()),
            })
            .collect()
    }

    /// Lexically resolve `.` and `..` without touching the filesystem.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(normalize::resolve_components(&self.raw))
    }

    /// Anchor this path on the process working directory.
    ///
    /// The path does not need to exist. Use [`absolute_from`](Self::absolute_from)
    /// to supply the base directory explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn absolute(&self) -> Result<Self> {
        normalize::absolutize_from_cwd(&self.raw).map(Self::new)
    }

    /// Anchor this path on `cwd` instead of the process working directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `cwd` is not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::PathHandle;
    /// use std::path::Path;
    ///
    /// # #[cfg(unix)]
    /// # {
    /// let abs = PathHandle::new("logs/../data").absolute_from(Path::new("/srv")).unwrap();
    /// assert_eq!(abs, PathHandle::new("/srv/data"));
    /// # }
    /// ```
    pub fn absolute_from(&self, cwd: &Path) -> Result<Self> {
        normalize::absolutize(&self.raw, cwd).map(Self::new)
    }

    /// Resolve links and `.`/`..` to the unique real path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the path does not exist.
    pub fn canonical(&self) -> Result<Self> {
        canonicalize::canonicalize(&self.raw).map(Self::new)
    }

    /// The filesystem root this path lives under (`/` on Unix, the drive
    /// root on Windows).
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is needed and unavailable.
    pub fn root(&self) -> Result<Self> {
        let absolute = self.absolute()?;
        let root: PathBuf = absolute
            .raw
            .components()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .collect();
        Ok(Self::new(root))
    }

    /// Express this path relative to `base`, lexically.
    ///
    /// Both paths are normalized first and must be of the same kind (both
    /// absolute or both relative).
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the kinds differ, the roots differ, or `base`
    /// climbs above a point this path can be expressed from.
    ///
    /// # Examples
    ///
    /// ```
    /// use iopath::PathHandle;
    ///
    /// # #[cfg(unix)]
    /// # {
    /// let file = PathHandle::new("/srv/app/logs/out.log");
    /// assert_eq!(file.relative_to("/srv/app").unwrap(), PathHandle::new("logs/out.log"));
    /// assert_eq!(file.relative_to("/srv/web/static").unwrap(), PathHandle::new("../../app/logs/out.log"));
    /// # }
    /// ```
    pub fn relative_to(&self, base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        let invalid = |reason: &str| Error::InvalidPath {
            path: self.raw.clone(),
            reason: format!("{reason} (relative to {})", base.display()),
        };

        if self.raw.is_absolute() != base.is_absolute() {
            return Err(invalid("Cannot mix absolute and relative paths"));
        }

        let target = normalize::resolve_components(&self.raw);
        let base = normalize::resolve_components(base);
        let target: Vec<Component<'_>> = target
            .components()
            .filter(|c| *c != Component::CurDir)
            .collect();
        let base_parts: Vec<Component<'_>> = base
            .components()
            .filter(|c| *c != Component::CurDir)
            .collect();

        let common = target
            .iter()
            .zip(&base_parts)
            .take_while(|(a, b)| a == b)
            .count();

        let anchors_differ = target
            .iter()
            .chain(&base_parts)
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            && common == 0;
        if anchors_differ {
            return Err(invalid("Paths do not share a root"));
        }

        let mut relative = PathBuf::new();
        for part in &base_parts[common..] {
            if *part == Component::ParentDir {
                return Err(invalid("Base climbs above the common ancestor"));
            }
            relative.push(Component::ParentDir);
        }
        for part in &target[common..] {
            relative.push(part);
        }
        if relative.as_os_str().is_empty() {
            relative.push(Component::CurDir);
        }
        Ok(Self::new(relative))
    }
}

impl fmt::Display for PathHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.display())
    }
}

impl AsRef<Path> for PathHandle {
    fn as_ref(&self) -> &Path {
        &self.raw
    }
}

impl From<&str> for PathHandle {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PathHandle {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&Path> for PathHandle {
    fn from(raw: &Path) -> Self {
        Self::new(raw)
    }
}

impl From<&PathBuf> for PathHandle {
    fn from(raw: &PathBuf) -> Self {
        Self::new(raw)
    }
}

impl From<PathBuf> for PathHandle {
    fn from(raw: PathBuf) -> Self {
        Self::new(raw)
    }
}

impl From<&PathHandle> for PathHandle {
    fn from(handle: &PathHandle) -> Self {
        handle.clone()
    }
}

impl From<PathHandle> for PathBuf {
    fn from(handle: PathHandle) -> Self {
        handle.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_of_plain_and_root_paths() {
        assert_eq!(PathHandle::new("dir/file.txt").name(), "file.txt");
        assert_eq!(PathHandle::new("dir/sub/").name(), "sub");
        assert_eq!(PathHandle::new("").name(), "");
        #[cfg(unix)]
        assert_eq!(PathHandle::new("/").name(), "");
    }

    #[test]
    fn test_name_of_dot_components() {
        assert_eq!(PathHandle::new("a/..").name(), "..");
        assert_eq!(PathHandle::new("..").name(), "..");
        assert_eq!(PathHandle::new(".").name(), ".");
    }

    #[test]
    fn test_from_path_buf_reference() {
        let raw = PathBuf::from("dir/file.txt");
        let handle = PathHandle::from(&raw);
        assert_eq!(handle.as_path(), raw.as_path());
        assert_eq!(handle.name(), "file.txt");
    }

    #[test]
    fn test_stem_and_extension() {
        let handle = PathHandle::new("archive.tar.gz");
        assert_eq!(handle.stem().as_deref(), Some("archive.tar"));
        assert_eq!(handle.extension().as_deref(), Some("gz"));
        assert_eq!(PathHandle::new("Makefile").extension(), None);
    }

    #[test]
    fn test_parent_is_idempotent_at_root() {
        #[cfg(unix)]
        {
            let root = PathHandle::new("/");
            assert_eq!(root.parent(), root);
            assert_eq!(root.parent().parent(), root);
        }
        let empty = PathHandle::new("");
        assert_eq!(empty.parent(), empty);
    }

    #[test]
    fn test_parent_join_round_trip() {
        for raw in ["a/b", "a/b/c.txt", "single", "x/y/", "a/..", "..", "a/b/..", ".", "a/."] {
            let handle = PathHandle::new(raw);
            assert_eq!(handle.parent().join(handle.name()).unwrap(), handle, "{raw}");
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_join_rejects_absolute_child() {
        let err = PathHandle::new("base").join("/abs").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        let err = PathHandle::new("/base").join("/abs").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_join_does_not_mutate_base() {
        let base = PathHandle::new("base");
        let _child = base.join("child").unwrap();
        assert_eq!(base, PathHandle::new("base"));
    }

    #[test]
    fn test_from_components_requires_parts() {
        let empty: [&str; 0] = [];
        assert!(PathHandle::from_components(empty).is_err());
        assert_eq!(
            PathHandle::from_components(["a", "b", "c"]).unwrap(),
            PathHandle::new("a/b/c")
        );
    }

    #[test]
    fn test_with_name() {
        let handle = PathHandle::new("dir/old.txt");
        assert_eq!(handle.with_name("new.txt").unwrap(), PathHandle::new("dir/new.txt"));
        assert!(handle.with_name("a/b").is_err());
        assert!(handle.with_name("..").is_err());
        assert!(handle.with_name("").is_err());
    }

    #[test]
    fn test_components_skip_root() {
        #[cfg(unix)]
        assert_eq!(PathHandle::new("/usr/lib").components(), vec!["usr", "lib"]);
        assert_eq!(PathHandle::new("./a/../b").components(), vec![".", "a", "..", "b"]);
    }

    #[test]
    fn test_normalized_is_lexical() {
        assert_eq!(PathHandle::new("a/./b/../c").normalized(), PathHandle::new("a/c"));
    }

    #[test]
    fn test_absolute_does_not_require_existence() {
        let handle = PathHandle::new("definitely/not/here");
        let absolute = handle.absolute().unwrap();
        assert!(absolute.is_absolute());
        assert!(!absolute.as_path().exists());
        assert!(absolute.as_path().ends_with("definitely/not/here"));
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_from_injected_cwd() {
        let handle = PathHandle::new("./x/../y");
        assert_eq!(
            handle.absolute_from(Path::new("/work")).unwrap(),
            PathHandle::new("/work/y")
        );
    }

    #[test]
    fn test_canonical_requires_existence() {
        let err = PathHandle::new("no/such/entry/anywhere").canonical().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    #[cfg(unix)]
    fn test_root() {
        assert_eq!(PathHandle::new("/a/b").root().unwrap(), PathHandle::new("/"));
        assert_eq!(PathHandle::new("rel").root().unwrap(), PathHandle::new("/"));
    }

    #[test]
    #[cfg(unix)]
    fn test_relative_to() {
        let file = PathHandle::new("/a/b/c");
        assert_eq!(file.relative_to("/a").unwrap(), PathHandle::new("b/c"));
        assert_eq!(file.relative_to("/a/b/c").unwrap(), PathHandle::new("."));
        assert_eq!(file.relative_to("/a/x").unwrap(), PathHandle::new("../b/c"));
        assert_eq!(file.relative_to("/").unwrap(), PathHandle::new("a/b/c"));
        assert!(file.relative_to("a").is_err());
    }

    #[test]
    fn test_relative_to_relative_paths() {
        let file = PathHandle::new("src/path/mod.rs");
        assert_eq!(file.relative_to("src").unwrap(), PathHandle::new("path/mod.rs"));
        assert_eq!(file.relative_to("docs").unwrap(), PathHandle::new("../src/path/mod.rs"));
        assert!(file.relative_to("../elsewhere").is_err());
    }

    #[test]
    fn test_conversions() {
        let from_str: PathHandle = "a/b".into();
        let from_string: PathHandle = String::from("a/b").into();
        let from_path: PathHandle = Path::new("a/b").into();
        let from_buf: PathHandle = PathBuf::from("a/b").into();
        let from_handle: PathHandle = (&from_str).into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str, from_path);
        assert_eq!(from_str, from_buf);
        assert_eq!(from_str, from_handle);
        assert_eq!(PathBuf::from(from_str), PathBuf::from("a/b"));
    }

    #[test]
    fn test_display_shows_raw_path() {
        assert_eq!(PathHandle::new("some/dir").to_string(), "some/dir");
    }

    #[test]
    fn test_serde_transparent() {
        let handle = PathHandle::new("a/b");
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "\"a/b\"");
        let back: PathHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, handle);
    }
}
