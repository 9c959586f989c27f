//! Property-based tests for baseline persistence

use fileguard::tree::HashAlgorithm;
use fileguard::{BaselineState, BaselineStore, JsonBaselineStore, Snapshot};
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use tempfile::TempDir;

/// Any non-empty segment without `/`, plus spellings that are easy to fold together
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[^/]{1,8}",
        1 => prop_oneof![
            Just(".".to_string()),
            Just("..".to_string()),
            Just("a\\b".to_string()),
            Just("caf\u{e9}".to_string()),
            Just("cafe\u{0301}".to_string()),
            Just("\u{fffd}".to_string()),
        ],
    ]
}

fn snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::btree_map(
        prop::collection::vec(segment(), 1..4).prop_map(|s| s.join("/")),
        "[0-9a-f]{64}",
        0..16,
    )
    .prop_map(Snapshot::from)
}

/// Test that whatever is saved is loaded back unchanged
#[test]
fn test_saved_snapshot_loads_identically() {
    let mut runner = TestRunner::new(Config {
        cases: 64,
        ..Config::default()
    });

    runner
        .run(&snapshot(), |snapshot| {
            let temp_dir = TempDir::new().unwrap();
            let store =
                JsonBaselineStore::new(temp_dir.path().join("baseline.json"), HashAlgorithm::Sha256);
            store.save(&snapshot).unwrap();

            prop_assert_eq!(store.load_state(), BaselineState::Loaded(snapshot));
            Ok(())
        })
        .unwrap();
}

/// Test that a later save fully replaces an earlier one
#[test]
fn test_overwrite_replaces_previous_record() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        ..Config::default()
    });

    runner
        .run(&(snapshot(), snapshot()), |(first, second)| {
            let temp_dir = TempDir::new().unwrap();
            let store =
                JsonBaselineStore::new(temp_dir.path().join("baseline.json"), HashAlgorithm::Sha256);
            store.save(&first).unwrap();
            store.save(&second).unwrap();

            prop_assert_eq!(store.load(), second);
            Ok(())
        })
        .unwrap();
}
