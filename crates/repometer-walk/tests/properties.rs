//! Property-based tests for repometer-walk.

use proptest::prelude::*;
use repometer_walk::{Exclusions, normalize_rel_path};
use std::path::PathBuf;

fn arb_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,10}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

proptest! {
    #[test]
    fn normalized_paths_join_segments_with_slash(segments in prop::collection::vec(arb_segment(), 1..6)) {
        let path: PathBuf = segments.iter().collect();
        prop_assert_eq!(normalize_rel_path(&path), segments.join("/"));
    }

    #[test]
    fn leading_dot_is_dropped(segments in prop::collection::vec(arb_segment(), 1..4)) {
        let mut path = PathBuf::from(".");
        for s in &segments {
            path.push(s);
        }
        prop_assert!(!normalize_rel_path(&path).starts_with('.') || segments[0].starts_with('.'));
        prop_assert_eq!(normalize_rel_path(&path), segments.join("/"));
    }

    #[test]
    fn exclusions_contain_every_non_empty_name(names in prop::collection::vec("[a-z_.]{0,8}", 0..8)) {
        let ex = Exclusions::new(names.clone());
        for name in &names {
            prop_assert_eq!(ex.contains(name), !name.is_empty());
        }
    }

    #[test]
    fn extend_is_a_superset(base in prop::collection::vec("[a-z]{1,6}", 0..5), extra in prop::collection::vec("[a-z]{1,6}", 0..5)) {
        let mut ex = Exclusions::new(base.clone());
        ex.extend(extra.clone());
        for name in base.iter().chain(extra.iter()) {
            prop_assert!(ex.contains(name));
        }
    }
}
