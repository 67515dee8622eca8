//! Lexical path transformations.
//!
//! Nothing in this module touches the filesystem. The functions here:
//! - Expand tilde (~) to the home directory
//! - Expand `$VAR` and `${VAR}` references
//! - Resolve `.` and `..` components without following links
//! - Anchor relative paths on an explicitly supplied base directory

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use iopath::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Expand `$NAME` and `${NAME}` references using the process environment.
///
/// References to unset variables are left in place verbatim, as is a lone
/// `$` that does not start a name.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use iopath::path::normalize::expand_vars;
/// use std::path::Path;
///
/// let untouched = expand_vars(Path::new("/data/$IOPATH_SURELY_UNSET/x")).unwrap();
/// assert_eq!(untouched, Path::new("/data/$IOPATH_SURELY_UNSET/x"));
/// ```
pub fn expand_vars(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;
    Ok(PathBuf::from(expand_vars_with(path_str, |name| {
        env::var(name).ok()
    })))
}

/// Expand variable references in `input` with a caller-provided lookup.
///
/// # Examples
///
/// ```
/// use iopath::path::normalize::expand_vars_with;
///
/// let out = expand_vars_with("$ROOT/${SUB}/$MISSING", |name| match name {
///     "ROOT" => Some("/srv".to_string()),
///     "SUB" => Some("cache".to_string()),
///     _ => None,
/// });
/// assert_eq!(out, "/srv/cache/$MISSING");
/// ```
pub fn expand_vars_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) if is_var_name(&braced[..end]) => (&braced[..end], end + 2),
                _ => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match (consumed, lookup(name)) {
            (0, _) | (_, None) => {
                // Not a reference, or an unknown one: keep the text.
                let keep = 1 + consumed;
                out.push_str(&rest[idx..idx + keep]);
                rest = &rest[idx + keep..];
            }
            (_, Some(value)) => {
                out.push_str(&value);
                rest = &after[consumed..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve `.` and `..` components lexically.
///
/// Symbolic links are not consulted, so `a/link/..` becomes `a` even if
/// `link` points elsewhere. A `..` directly under the root is dropped (the
/// parent of `/` is `/`). Leading `..` components of a relative path are
/// kept. A relative path that resolves to nothing becomes `.`.
///
/// # Examples
///
/// ```
/// use iopath::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../..")), PathBuf::from("/"));
/// assert_eq!(resolve_components(Path::new("../x/./y/..")), PathBuf::from("../x"));
/// assert_eq!(resolve_components(Path::new("a/..")), PathBuf::from("."));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut anchor = PathBuf::new();
    let mut parts: Vec<Component<'_>> = Vec::new();
    let mut rooted = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => anchor.push(prefix.as_os_str()),
            Component::RootDir => {
                anchor.push(component);
                rooted = true;
            }
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(component),
            },
            Component::Normal(_) => parts.push(component),
        }
    }

    let mut result = anchor;
    for part in parts {
        result.push(part);
    }
    if result.as_os_str().is_empty() {
        result.push(Component::CurDir);
    }
    result
}

/// Anchor `path` on `base` and resolve `.`/`..` lexically.
///
/// `base` plays the role of the current working directory and is passed in
/// explicitly so the result does not depend on process state.
///
/// # Errors
///
/// Returns an error if `base` is not absolute.
///
/// # Examples
///
/// ```
/// use iopath::path::normalize::absolutize;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// # {
/// let abs = absolutize(Path::new("../logs/./app.log"), Path::new("/srv/app")).unwrap();
/// assert_eq!(abs, Path::new("/srv/logs/app.log"));
/// # }
/// ```
pub fn absolutize(path: &Path, base: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(resolve_components(path));
    }
    if !base.is_absolute() {
        return Err(Error::InvalidPath {
            path: base.to_path_buf(),
            reason: "Base directory must be absolute".to_string(),
        });
    }
    Ok(resolve_components(&base.join(path)))
}

/// Anchor `path` on the process working directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolutize_from_cwd(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(resolve_components(path));
    }
    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Cannot get current directory: {e}"),
    })?;
    absolutize(path, &cwd)
}
