//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, CopyConfig, DeleteConfig, TempConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use iopath::config::{Config, ConfigMerger, DeleteConfig};
///
/// let low = Config {
///     delete: Some(DeleteConfig { recursive: Some(false) }),
///     ..Default::default()
/// };
/// let high = Config {
///     delete: Some(DeleteConfig { recursive: Some(true) }),
///     ..Default::default()
/// };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert!(result.delete_recursive());
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration sources, lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Sections merge field by field: a field set in `source` replaces the
    /// one in `target`, an unset field leaves it alone.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(copy) = &source.copy {
            Self::merge_copy(target.copy.get_or_insert_with(Default::default), copy);
        }
        if let Some(delete) = &source.delete {
            Self::merge_delete(target.delete.get_or_insert_with(Default::default), delete);
        }
        if let Some(temp) = &source.temp {
            Self::merge_temp(target.temp.get_or_insert_with(Default::default), temp);
        }
    }

    fn merge_copy(target: &mut CopyConfig, source: &CopyConfig) {
        if source.overwrite.is_some() {
            target.overwrite = source.overwrite;
        }
        if source.symlinks.is_some() {
            target.symlinks = source.symlinks;
        }
    }

    fn merge_delete(target: &mut DeleteConfig, source: &DeleteConfig) {
        if source.recursive.is_some() {
            target.recursive = source.recursive;
        }
    }

    fn merge_temp(target: &mut TempConfig, source: &TempConfig) {
        if source.prefix.is_some() {
            target.prefix.clone_from(&source.prefix);
        }
        if source.suffix.is_some() {
            target.suffix.clone_from(&source.suffix);
        }
        if source.random_len.is_some() {
            target.random_len = source.random_len;
        }
        if source.max_attempts.is_some() {
            target.max_attempts = source.max_attempts;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::SymlinkPolicy;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/cfg/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_higher_precedence_wins_per_field() {
        let low = Config {
            temp: Some(TempConfig {
                prefix: Some("low-".into()),
                suffix: Some(".low".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let high = Config {
            temp: Some(TempConfig {
                prefix: Some("high-".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        let temp = merged.temp_options();
        assert_eq!(temp.prefix, "high-");
        assert_eq!(temp.suffix, ".low");
    }

    #[test]
    fn test_unset_section_does_not_clear() {
        let mut target = Config {
            copy: Some(CopyConfig {
                overwrite: Some(true),
                symlinks: Some(SymlinkPolicy::Follow),
            }),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert!(target.copy_options().overwrite);

        let partial = Config {
            copy: Some(CopyConfig {
                overwrite: Some(false),
                symlinks: None,
            }),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &partial);
        let copy = target.copy_options();
        assert!(!copy.overwrite);
        assert_eq!(copy.symlinks, SymlinkPolicy::Follow);
    }
}
