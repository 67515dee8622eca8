use std::fs::{self, DirBuilder, OpenOptions};
use std::io;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config::validator::MAX_RANDOM_LEN;
use crate::error::{Error, Result};
use crate::ops::TempOptions;
use crate::path::PathHandle;

#[derive(Clone, Copy)]
enum TempKind {
    File,
    Directory,
}

impl PathHandle {
    /// Create a uniquely named empty file inside this directory.
    ///
    /// The name is `prefix`, eight random letters and digits, then `suffix`.
    /// The file is readable and writable by its owner only.
    ///
    /// # Errors
    ///
    /// As for [`temp_file_with`](Self::temp_file_with).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iopath::PathHandle;
    ///
    /// let scratch = PathHandle::new("/tmp").temp_file("upload-", ".part").unwrap();
    /// assert!(scratch.name().starts_with("upload-"));
    /// ```
    pub fn temp_file(&self, prefix: &str, suffix: &str) -> Result<PathHandle> {
        self.temp_file_with(&TempOptions::new().with_prefix(prefix).with_suffix(suffix))
    }

    /// Create a uniquely named empty directory inside this directory.
    ///
    /// # Errors
    ///
    /// As for [`temp_directory_with`](Self::temp_directory_with).
    pub fn temp_directory(&self, prefix: &str, suffix: &str) -> Result<PathHandle> {
        self.temp_directory_with(&TempOptions::new().with_prefix(prefix).with_suffix(suffix))
    }

    /// Create a uniquely named empty file inside this directory.
    ///
    /// Candidate names are tried until one is free, up to
    /// `options.max_attempts` times. Creation is exclusive, so a name taken
    /// by another process between tries is simply skipped.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NotFound` if this directory does not exist
    /// - `NotADirectory` if this path is not a directory
    /// - `InvalidPath` if the prefix or suffix contains a separator
    /// - `Validation` if `random_len` is outside `1..=64` or `max_attempts`
    ///   is zero
    /// - `TempNamesExhausted` if every attempted name was taken
    pub fn temp_file_with(&self, options: &TempOptions) -> Result<PathHandle> {
        self.create_temp(options, TempKind::File)
    }

    /// Create a uniquely named empty directory inside this directory.
    ///
    /// The directory is accessible by its owner only.
    ///
    /// # Errors
    ///
    /// As for [`temp_file_with`](Self::temp_file_with).
    pub fn temp_directory_with(&self, options: &TempOptions) -> Result<PathHandle> {
        self.create_temp(options, TempKind::Directory)
    }

    fn create_temp(&self, options: &TempOptions, kind: TempKind) -> Result<PathHandle> {
        let metadata = fs::metadata(self.as_path()).map_err(|e| Error::from_io(self.as_path(), e))?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory {
                path: self.as_path().to_path_buf(),
            });
        }
        check_affix(&options.prefix)?;
        check_affix(&options.suffix)?;
        check_limits(options)?;

        for attempt in 1..=options.max_attempts {
            let candidate = self.as_path().join(temp_name(options));
            match create_exclusive(&candidate, kind) {
                Ok(()) => {
                    log::debug!("created temporary entry {}", candidate.display());
                    return Ok(PathHandle::new(candidate));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!(
                        "temporary name {} taken (attempt {attempt})",
                        candidate.display()
                    );
                }
                Err(e) => return Err(Error::from_io(&candidate, e)),
            }
        }

        Err(Error::TempNamesExhausted {
            directory: self.as_path().to_path_buf(),
            attempts: options.max_attempts,
        })
    }
}

fn check_affix(affix: &str) -> Result<()> {
    if affix.contains('/') || affix.contains(std::path::MAIN_SEPARATOR) {
        return Err(Error::InvalidPath {
            path: affix.into(),
            reason: "Temporary name prefix and suffix cannot contain separators".to_string(),
        });
    }
    Ok(())
}

fn check_limits(options: &TempOptions) -> Result<()> {
    if options.random_len == 0 || options.random_len > MAX_RANDOM_LEN {
        return Err(Error::Validation {
            field: "random_len".into(),
            message: format!(
                "Must be between 1 and {MAX_RANDOM_LEN}, got {}",
                options.random_len
            ),
        });
    }
    if options.max_attempts == 0 {
        return Err(Error::Validation {
            field: "max_attempts".into(),
            message: "Must be at least 1".into(),
        });
    }
    Ok(())
}

fn temp_name(options: &TempOptions) -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(options.random_len)
        .map(char::from)
        .collect();
    format!("{}{random}{}", options.prefix, options.suffix)
}

fn create_exclusive(path: &std::path::Path, kind: TempKind) -> io::Result<()> {
    match kind {
        TempKind::File => {
            let mut open = OpenOptions::new();
            open.write(true).create_new(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                open.mode(0o600);
            }
            open.open(path).map(drop)
        }
        TempKind::Directory => {
            let mut builder = DirBuilder::new();
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(0o700);
            }
            builder.create(path)
        }
    }
}
