//! Tests for the node key codec

use rstest::rstest;

use alloctree::domain::{child_key, depth_of, NodeKey};

#[rstest]
#[case("0", 1)]
#[case("3-1", 2)]
#[case("2-0-1", 3)]
#[case("0-0-0-7", 4)]
fn given_key_when_taking_depth_then_counts_segments(#[case] raw: &str, #[case] depth: usize) {
    let key: NodeKey = raw.parse().unwrap();
    assert_eq!(key.depth(), depth);
    assert_eq!(depth_of(Some(&key)), depth);
}

#[test]
fn given_absent_key_when_taking_depth_then_root_level() {
    assert_eq!(depth_of(None), 1);
}

#[rstest]
#[case("0")]
#[case("4-2")]
#[case("1-0-3")]
fn given_key_when_deriving_child_then_depth_grows_by_one(#[case] raw: &str) {
    let key: NodeKey = raw.parse().unwrap();
    for i in 0..3 {
        let child = child_key(Some(&key), i);
        assert_eq!(child.depth(), key.depth() + 1);
        assert_eq!(child.parent().as_ref(), Some(&key));
        assert_eq!(child.index(), Some(i));
    }
}

#[test]
fn given_no_parent_when_deriving_child_then_root_key() {
    assert_eq!(child_key(None, 2).to_string(), "2");
    assert_eq!(child_key(Some(&"2".parse().unwrap()), 0).to_string(), "2-0");
}

#[test]
fn given_holding_key_when_checking_level_then_is_leaf_level() {
    let holding: NodeKey = "0-0-0-0".parse().unwrap();
    let fund: NodeKey = "0-0-0".parse().unwrap();
    assert!(holding.is_leaf_level());
    assert!(!fund.is_leaf_level());
}
