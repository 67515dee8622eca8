//! Configuration system for iopath.
//!
//! Configuration only supplies defaults for the option types the library
//! already takes as arguments ([`CopyOptions`](crate::CopyOptions),
//! [`TempOptions`](crate::TempOptions), the `recursive` flag of delete).
//! The library itself never reads configuration implicitly.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`IOPATH_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. User config (`~/.iopath/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use iopath::config::ConfigBuilder;
//! use iopath::PathHandle;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let scratch = PathHandle::new("/tmp")
//!     .temp_directory_with(&config.temp_options())
//!     .unwrap();
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, CopyConfig, DeleteConfig, TempConfig};
pub use validator::ConfigValidator;
