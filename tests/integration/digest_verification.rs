//! Digest engine verification
//!
//! Checks the engine against the reference hash crates directly and covers
//! the streaming and failure contracts.

use fileguard::error::{DigestError, DigestFailureKind};
use fileguard::tree::hasher::{self, HashAlgorithm, CHUNK_SIZE};
use sha2::{Digest, Sha256};
use std::fs;
use tempfile::TempDir;

/// Test that sha256 output matches the sha2 crate directly
#[test]
fn test_sha256_matches_sha2() {
    let content = b"test content";
    let expected = hex::encode(Sha256::digest(content));
    assert_eq!(hasher::hash_bytes(content, HashAlgorithm::Sha256), expected);
}

/// Test that blake3 output matches the blake3 crate directly
#[test]
fn test_blake3_matches_blake3() {
    let content = b"test content";
    let expected = blake3::hash(content).to_hex().to_string();
    assert_eq!(hasher::hash_bytes(content, HashAlgorithm::Blake3), expected);
}

/// Test that a file larger than several chunks hashes like the whole buffer
#[test]
fn test_large_file_streaming() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("large.bin");
    let content: Vec<u8> = (0..(CHUNK_SIZE * 5 + 1)).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(&path, &content).unwrap();

    for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Sha512, HashAlgorithm::Blake3] {
        assert_eq!(
            hasher::hash_file(&path, algorithm).unwrap(),
            hasher::hash_bytes(&content, algorithm)
        );
    }
}

/// Test that the empty file has the well-known sha256 digest
#[test]
fn test_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty");
    fs::write(&path, b"").unwrap();

    assert_eq!(
        hasher::hash_file(&path, HashAlgorithm::Sha256).unwrap(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

/// Test that a single changed byte changes the digest
#[test]
fn test_one_byte_change() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("f");
    fs::write(&path, b"hello world").unwrap();
    let before = hasher::hash_file(&path, HashAlgorithm::Sha256).unwrap();
    fs::write(&path, b"hello worle").unwrap();
    let after = hasher::hash_file(&path, HashAlgorithm::Sha256).unwrap();
    assert_ne!(before, after);
}

/// Test that a vanished file is distinguishable from a read failure
#[test]
fn test_failure_kinds_are_distinguishable() {
    let temp_dir = TempDir::new().unwrap();

    let vanished = hasher::hash_file(&temp_dir.path().join("gone"), HashAlgorithm::Sha256)
        .unwrap_err();
    assert!(matches!(vanished, DigestError::NotFound { .. }));

    let unreadable = hasher::hash_file(temp_dir.path(), HashAlgorithm::Sha256).unwrap_err();
    assert!(matches!(unreadable, DigestError::ReadError { .. }));
    assert_eq!(unreadable.kind(), DigestFailureKind::Unreadable);
}
