//! Integration tests for the JSON baseline store

use fileguard::tree::{hash_bytes, HashAlgorithm, Scanner};
use fileguard::{BaselineState, BaselineStore, JsonBaselineStore, Snapshot};
use std::fs;
use tempfile::TempDir;

/// Test that a scanned snapshot survives a save/load cycle
#[test]
fn test_scanned_snapshot_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join("nested").join("b.bin"), [0u8, 1, 2, 3]).unwrap();

    let snapshot = Scanner::default().scan(&root);
    let store = JsonBaselineStore::new(temp_dir.path().join("baseline.json"), HashAlgorithm::Sha256);
    store.save(&snapshot).unwrap();

    assert_eq!(store.load(), snapshot);
}

/// Test that the record is human-readable JSON keyed by relative path
#[test]
fn test_record_is_inspectable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("baseline.json");
    let digest = hash_bytes(b"hello", HashAlgorithm::Sha256);
    let snapshot: Snapshot = [("a.txt", digest.clone())].into_iter().collect();

    JsonBaselineStore::new(&path, HashAlgorithm::Sha256)
        .save(&snapshot)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["algorithm"], "sha256");
    assert_eq!(value["files"]["a.txt"], digest.as_str());
}

/// Test that truncated records are reported as corrupted, not as errors
#[test]
fn test_truncated_record_is_corrupted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("baseline.json");
    let store = JsonBaselineStore::new(&path, HashAlgorithm::Sha256);
    let snapshot: Snapshot = [("a.txt", hash_bytes(b"a", HashAlgorithm::Sha256))]
        .into_iter()
        .collect();
    store.save(&snapshot).unwrap();

    let full = fs::read_to_string(&path).unwrap();
    fs::write(&path, &full[..full.len() / 2]).unwrap();

    assert!(matches!(store.load_state(), BaselineState::Corrupted { .. }));
    assert!(store.load().is_empty());
}

/// Test that a JSON value of the wrong shape is corrupted
#[test]
fn test_wrong_shape_is_corrupted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("baseline.json");
    let store = JsonBaselineStore::new(&path, HashAlgorithm::Sha256);

    for content in ["[]", "42", r#"{"a.txt": 5}"#, r#"{"algorithm": "md5", "files": {}}"#] {
        fs::write(&path, content).unwrap();
        assert!(
            matches!(store.load_state(), BaselineState::Corrupted { .. }),
            "{} should be corrupted",
            content
        );
    }
}

/// Test that no temporary file is left behind after saving
#[test]
fn test_save_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonBaselineStore::new(temp_dir.path().join("baseline.json"), HashAlgorithm::Sha256);
    store.save(&Snapshot::new()).unwrap();

    let names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["baseline.json".to_string()]);
}
