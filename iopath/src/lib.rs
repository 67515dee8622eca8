#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # iopath
//!
//! One value type for a filesystem location, with the queries and
//! operations that usually take several `std::fs` calls to compose.
//!
//! A [`PathHandle`] stores a path and nothing else. Metadata accessors
//! (`size`, `modified_time`, `exists`, ...) ask the filesystem every time
//! they are called; path algebra (`parent`, `join`, `absolute`, ...) is pure
//! and returns new handles; mutators (`create_file`, `copy`, `move_to`,
//! `delete`, `disk_usage`, `temp_file`, ...) perform the side effect and
//! report failures as typed [`Error`] kinds.
//!
//! ## Core Types
//!
//! - [`PathHandle`]: the path value and every operation on it
//! - [`PathInfo`] and [`EntryKind`]: metadata snapshots
//! - [`CopyOptions`], [`TempOptions`], [`SymlinkPolicy`], [`PermissionScope`]:
//!   operation options
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//! - [`Config`] and [`ConfigBuilder`]: defaults for the option types
//!
//! ## Examples
//!
//! ```no_run
//! use iopath::PathHandle;
//!
//! let work = PathHandle::new("/tmp/testA");
//! work.create_directory(true).unwrap();
//! std::fs::write(work.join("f.txt").unwrap().as_path(), [0u8; 10]).unwrap();
//! assert_eq!(work.disk_usage().unwrap(), 10);
//!
//! work.copy("/tmp/testB").unwrap();
//! work.delete(true).unwrap();
//! assert!(!work.exists());
//! assert_eq!(PathHandle::new("/tmp/testB").disk_usage().unwrap(), 10);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod ops;
pub mod path;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, FailedEntry, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use ops::{CopyOptions, CopyReport, PermissionScope, SymlinkPolicy, TempOptions};
pub use path::{EntryKind, PathHandle, PathInfo};
