//! Configuration builder.
//!
//! Collects the configured sources, merges them in precedence order and
//! validates the result.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from files, environment and programmatic overrides.
///
/// # Examples
///
/// ```
/// use iopath::config::{Config, ConfigBuilder, TempConfig};
///
/// let overrides = Config {
///     temp: Some(TempConfig { prefix: Some("test-".into()), ..Default::default() }),
///     ..Default::default()
/// };
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(overrides)
///     .build()
///     .unwrap();
/// assert_eq!(config.temp_options().prefix, "test-");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// A builder reading the user config and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the user config from `{dir}/config.yaml` instead of `~/.iopath`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Also read `path`, above the user config. The file must exist.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Apply `config` last, above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `IOPATH_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge defaults, files, environment and overrides, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable holds an invalid value, or the merged result fails
    /// validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let sources =
                ConfigLoader::load_all(self.user_dir.as_deref(), self.config_file.as_deref())?;
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
