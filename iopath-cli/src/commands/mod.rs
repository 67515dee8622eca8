//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `info`: Show a metadata snapshot of a path
//! - `size`: Print the byte length of a file
//! - `du`: Print the total size of a tree
//! - `touch`: Create files or update their modification time
//! - `mkdir`: Create directories
//! - `rm`: Remove files and directory trees
//! - `cp`: Copy files and directory trees
//! - `mv`: Move or rename a path
//! - `mktemp`: Create a uniquely named file or directory
//! - `resolve`: Print the absolute, canonical or normalized form of a path
//! - `ls`: List a directory
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod cp;
pub mod du;
pub mod info;
pub mod ls;
pub mod mkdir;
pub mod mktemp;
pub mod mv;
pub mod resolve;
pub mod rm;
pub mod size;
pub mod touch;

pub use completions::CompletionsCommand;
pub use cp::CpCommand;
pub use du::DuCommand;
pub use info::InfoCommand;
pub use ls::LsCommand;
pub use mkdir::MkdirCommand;
pub use mktemp::MktempCommand;
pub use mv::MvCommand;
pub use resolve::ResolveCommand;
pub use rm::RmCommand;
pub use size::SizeCommand;
pub use touch::TouchCommand;
