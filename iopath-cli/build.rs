//! Build script for iopath-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("iopath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and manipulate filesystem paths")
        .long_about(
            "Command-line front-end for the iopath path handle: metadata queries, \
             path resolution, and file and directory operations",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read an extra configuration file layered over the user configuration")
                .value_name("PATH")
                .global(true)
                .env("IOPATH_CONFIG"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the directory holding the user configuration (default: ~/.iopath)")
                .value_name("PATH")
                .global(true)
                .env("IOPATH_DATA_DIR"),
        )
        .subcommands(vec![
            Command::new("info")
                .about("Show metadata for a path")
                .long_about("Print kind, size, timestamps and read-only state as text or JSON"),
            Command::new("size")
                .about("Print the size of a file in bytes")
                .long_about("Print the byte length of a regular file; directories are rejected"),
            Command::new("du")
                .about("Print the total size of everything under a path")
                .long_about(
                    "Sum the length of every non-directory entry under a path, \
                     without following symbolic links below it",
                ),
            Command::new("touch")
                .about("Create files or update their modification time")
                .long_about("Create empty files, truncate them, or set their modification time"),
            Command::new("mkdir")
                .about("Create directories")
                .long_about("Create directories, optionally with missing parents"),
            Command::new("rm")
                .about("Remove files, links and directories")
                .long_about(
                    "Remove paths; recursive removal continues past failures and \
                     reports them at the end",
                ),
            Command::new("cp")
                .about("Copy a file or directory tree")
                .long_about("Copy a file, link or directory tree, preserving or following links"),
            Command::new("mv")
                .about("Move or rename a path")
                .long_about(
                    "Rename a path, falling back to copy-then-delete across filesystems",
                ),
            Command::new("mktemp")
                .about("Create a temporary file or directory")
                .long_about("Create a uniquely named file or directory and print its path"),
            Command::new("resolve")
                .about("Print the resolved form of a path")
                .long_about("Print the absolute, canonical or normalized form of a path"),
            Command::new("ls")
                .about("List a directory")
                .long_about("List the entries of a directory sorted by name"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main iopath.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("iopath.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
