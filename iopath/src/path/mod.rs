//! The path handle: a filesystem location as a value.
//!
//! # Key Concepts
//!
//! ## Identity
//!
//! A [`PathHandle`] is just a name. Constructing one never touches the
//! filesystem and never fails; whether anything exists there is asked with
//! [`PathHandle::exists`] at the moment it matters.
//!
//! ## Path algebra
//!
//! `name`, `parent`, `join`, `normalized`, `relative_to` and `absolute_from`
//! are pure functions of the stored path. `absolute` additionally reads the
//! process working directory, and `canonical` consults the filesystem to
//! follow links, so it requires the path to exist.
//!
//! ## Metadata
//!
//! `size`, the timestamp accessors and the predicates re-query the
//! filesystem on every call; see [`metadata`] for the snapshot type.
//!
//! # Examples
//!
//! ```
//! use iopath::PathHandle;
//!
//! let config = PathHandle::new("project").join("config/app.yaml").unwrap();
//! assert_eq!(config.name(), "app.yaml");
//! assert_eq!(config.extension().as_deref(), Some("yaml"));
//! assert_eq!(config.parent(), PathHandle::new("project/config"));
//! ```

pub mod canonicalize;
mod handle;
pub mod metadata;
pub mod normalize;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use handle::PathHandle;
pub use metadata::{EntryKind, PathInfo};
