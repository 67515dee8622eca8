//! Property-based tests for path algebra.
//!
//! The normalize module carries light in-module property tests; this suite
//! runs the algebraic laws of the handle with many more cases.

use super::normalize::resolve_components;
use super::PathHandle;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn relative_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| parts.iter().collect())
}

fn dotted_path_strategy() -> impl Strategy<Value = PathBuf> {
    let part = prop_oneof![
        3 => path_component_strategy(),
        1 => Just("..".to_string()),
        1 => Just(".".to_string()),
    ];
    prop::collection::vec(part, 1..8).prop_map(|parts| parts.iter().collect())
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
        for part in parts {
            path.push(part);
        }
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // parent().join(name()) reconstructs any non-root path
    #[test]
    fn parent_join_name_round_trip(path in prop_oneof![relative_path_strategy(), absolute_path_strategy()]) {
        let handle = PathHandle::new(&path);
        let rebuilt = handle.parent().join(handle.name()).unwrap();
        prop_assert_eq!(rebuilt, handle);
    }

    // The round trip also holds when `..` and `.` appear, including last
    #[test]
    fn parent_join_name_round_trip_with_dots(path in dotted_path_strategy()) {
        let handle = PathHandle::new(&path);
        let rebuilt = handle.parent().join(handle.name()).unwrap();
        prop_assert_eq!(rebuilt, handle);
    }

    // Joining never changes the base handle and always extends it
    #[test]
    fn join_extends_base(base in absolute_path_strategy(), child in relative_path_strategy()) {
        let handle = PathHandle::new(&base);
        let joined = handle.join(&child).unwrap();
        prop_assert_eq!(handle.as_path(), base.as_path());
        prop_assert!(joined.as_path().starts_with(&base));
        prop_assert!(joined.as_path().ends_with(&child));
    }

    // Absolute children are always rejected
    #[test]
    fn join_rejects_absolute(base in relative_path_strategy(), child in absolute_path_strategy()) {
        prop_assert!(PathHandle::new(base).join(child).is_err());
    }

    // Normalization is idempotent
    #[test]
    fn normalized_idempotent(path in absolute_path_strategy()) {
        let once = PathHandle::new(&path).normalized();
        prop_assert_eq!(once.normalized(), once);
    }

    // absolute_from with an absolute base is anchored on that base
    #[test]
    fn absolute_from_is_anchored(base in absolute_path_strategy(), rel in relative_path_strategy()) {
        let absolute = PathHandle::new(&rel).absolute_from(&base).unwrap();
        prop_assert!(absolute.is_absolute());
        prop_assert!(absolute.as_path().starts_with(resolve_components(&base)));
    }

    // relative_to inverts join
    #[test]
    fn relative_to_inverts_join(base in absolute_path_strategy(), rel in relative_path_strategy()) {
        let target = PathHandle::new(&base).join(&rel).unwrap();
        let relative = target.relative_to(&base).unwrap();
        prop_assert_eq!(relative.as_path(), rel.as_path());
        let rejoined = PathHandle::new(&base).join(relative).unwrap();
        prop_assert_eq!(rejoined, target);
    }

    // The root is its own parent, however deep we start
    #[test]
    fn repeated_parent_reaches_fixed_point(path in absolute_path_strategy()) {
        let mut handle = PathHandle::new(&path);
        for _ in 0..10 {
            handle = handle.parent();
        }
        prop_assert_eq!(handle.parent(), handle.clone());
        prop_assert_eq!(handle.as_path(), Path::new(&std::path::MAIN_SEPARATOR.to_string()));
    }
}
