//! Integration tests for tree scanning

use fileguard::error::DigestFailureKind;
use fileguard::tree::{hash_bytes, HashAlgorithm, ScanOptions, Scanner};
use std::fs;
use tempfile::TempDir;

/// Test that the same filesystem state produces the same snapshot
#[test]
fn test_scan_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::create_dir_all(root.join("dir1").join("dir2")).unwrap();
    fs::write(root.join("dir1").join("file2.txt"), "content2").unwrap();
    fs::write(root.join("dir1").join("dir2").join("file3.txt"), "content3").unwrap();

    let scanner = Scanner::default();
    let first = scanner.scan(root);
    let second = scanner.scan(root);

    assert_eq!(first, second);
    let keys: Vec<&str> = first.paths().collect();
    assert_eq!(keys, vec!["dir1/dir2/file3.txt", "dir1/file2.txt", "file1.txt"]);
}

/// Test that identical content at different paths yields distinct entries
#[test]
fn test_duplicate_content_distinct_paths() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "same").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "same").unwrap();

    let snapshot = Scanner::default().scan(temp_dir.path());
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("a.txt"), snapshot.get("b.txt"));
}

/// Test that empty directories contribute no entries
#[test]
fn test_empty_directories_ignored() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("x").join("y")).unwrap();

    let report = Scanner::default().scan_with_report(temp_dir.path());
    assert!(report.root_exists);
    assert!(report.snapshot.is_empty());
    assert!(report.skipped.is_empty());
}

/// Test that scanning through a relative or dotted root gives the same keys
#[test]
fn test_root_spelling_does_not_change_keys() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();

    let plain = Scanner::default().scan(&root);
    let dotted = Scanner::default().scan(&root.join(".").join("..").join("data"));
    assert_eq!(plain, dotted);
    assert_eq!(
        plain.get("a.txt"),
        Some(hash_bytes(b"hello", HashAlgorithm::Sha256).as_str())
    );
}

/// Test that unreadable files are skipped without aborting the scan
#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("ok.txt"), "fine").unwrap();
    let locked = root.join("locked.txt");
    fs::write(&locked, "secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the file regardless of its mode.
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let report = Scanner::default().scan_with_report(root);
    assert!(report.snapshot.contains("ok.txt"));
    assert!(!report.snapshot.contains("locked.txt"));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].kind, DigestFailureKind::Unreadable);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

/// Test that special files are never hashed
#[cfg(unix)]
#[test]
fn test_sockets_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "a").unwrap();
    let _listener = std::os::unix::net::UnixListener::bind(root.join("sock")).unwrap();

    let report = Scanner::default().scan_with_report(root);
    assert_eq!(report.snapshot.len(), 1);
    assert!(report.skipped.is_empty());
}

/// Test that symlink cycles do not hang a scan that follows links
#[cfg(unix)]
#[test]
fn test_symlink_cycle_with_follow() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir").join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink(root, root.join("dir").join("loop")).unwrap();

    let report = Scanner::new(ScanOptions {
        follow_symlinks: true,
        ..ScanOptions::default()
    })
    .scan_with_report(root);

    assert!(report.snapshot.contains("dir/a.txt"));
    assert!(!report.skipped.is_empty());
}
