//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, CopyConfig, DeleteConfig, TempConfig};
use super::validator::{ConfigValidator, MAX_RANDOM_LEN};
use crate::ops::SymlinkPolicy;
use proptest::prelude::*;

fn symlink_strategy() -> impl Strategy<Value = SymlinkPolicy> {
    prop_oneof![Just(SymlinkPolicy::Preserve), Just(SymlinkPolicy::Follow)]
}

fn temp_strategy() -> impl Strategy<Value = TempConfig> {
    (
        prop::option::of("[a-z.-]{0,10}"),
        prop::option::of("[a-z.-]{0,10}"),
        prop::option::of(1usize..=MAX_RANDOM_LEN),
        prop::option::of(1u32..=1000),
    )
        .prop_map(|(prefix, suffix, random_len, max_attempts)| TempConfig {
            prefix,
            suffix,
            random_len,
            max_attempts,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of((
            prop::option::of(any::<bool>()),
            prop::option::of(symlink_strategy()),
        )),
        prop::option::of(prop::option::of(any::<bool>())),
        prop::option::of(temp_strategy()),
    )
        .prop_map(|(copy, delete, temp)| Config {
            copy: copy.map(|(overwrite, symlinks)| CopyConfig {
                overwrite,
                symlinks,
            }),
            delete: delete.map(|recursive| DeleteConfig { recursive }),
            temp,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher source shows up in the result; every
    // field it leaves unset keeps the lower value.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        let pick = |h: Option<bool>, l: Option<bool>| h.or(l);
        let low_copy = low.copy.clone().unwrap_or_default();
        let high_copy = high.copy.clone().unwrap_or_default();
        let copy = result.copy.clone().unwrap_or_default();
        prop_assert_eq!(copy.overwrite, pick(high_copy.overwrite, low_copy.overwrite));
        prop_assert_eq!(copy.symlinks, high_copy.symlinks.or(low_copy.symlinks));

        let low_temp = low.temp.clone().unwrap_or_default();
        let high_temp = high.temp.clone().unwrap_or_default();
        let temp = result.temp.clone().unwrap_or_default();
        prop_assert_eq!(temp.prefix, high_temp.prefix.or(low_temp.prefix));
        prop_assert_eq!(temp.random_len, high_temp.random_len.or(low_temp.random_len));
    }

    // Merging a config into itself changes nothing.
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // Merging an empty config changes nothing.
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Generated configs stay within the validated ranges, and so does any merge of them.
    #[test]
    fn config_merge_preserves_validity(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        let mut result = low;
        ConfigMerger::merge_into(&mut result, &high);
        prop_assert!(ConfigValidator::validate(&result).is_ok());
    }

    // YAML serialization round-trips.
    #[test]
    fn config_yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
