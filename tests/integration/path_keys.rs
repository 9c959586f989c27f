//! File names that are easy to confuse must stay separate from scan to diff

use super::test_utils::Fixture;
use fileguard::tree::{hash_bytes, HashAlgorithm};
use fileguard::{BaselineStore, IntegrityState};

fn sha256(content: &str) -> String {
    hash_bytes(content.as_bytes(), HashAlgorithm::Sha256)
}

/// A backslash inside a Unix file name survives the baseline round trip
#[cfg(unix)]
#[test]
fn test_backslash_name_is_stable_across_checks() {
    let fixture = Fixture::new();
    fixture.write("a\\b.txt", "hello");

    let baseline = fixture.monitor.establish_baseline().unwrap();
    assert_eq!(baseline.get("a\\b.txt"), Some(sha256("hello").as_str()));
    assert_eq!(fixture.monitor.store().load(), baseline);

    let outcome = fixture.monitor.check_integrity().unwrap();
    assert_eq!(outcome.state(), IntegrityState::Consistent);

    fixture.write("a\\b.txt", "world");
    let resolution = fixture.monitor.check_and_resolve(|_| Ok(true)).unwrap();
    assert!(resolution.baseline_updated);

    let outcome = fixture.monitor.check_integrity().unwrap();
    assert_eq!(outcome.state(), IntegrityState::Consistent);
}

/// `a/b` and a file literally named `a\b` do not disable comparison
#[cfg(unix)]
#[test]
fn test_tampering_detected_next_to_backslash_lookalike() {
    let fixture = Fixture::new();
    fixture.write("a/b", "nested");
    fixture.write("a\\b", "flat");
    fixture.write("secret.txt", "original");

    let baseline = fixture.monitor.establish_baseline().unwrap();
    assert_eq!(baseline.len(), 3);
    assert!(fixture.monitor.baseline_state().is_usable());

    fixture.write("secret.txt", "tampered");
    let outcome = fixture.monitor.check_integrity().unwrap();
    let diff = outcome.diff().expect("baseline should be compared, not rebuilt");

    assert_eq!(outcome.state(), IntegrityState::ChangesDetected);
    assert_eq!(diff.modified.len(), 1);
    assert_eq!(diff.modified["secret.txt"].new, sha256("tampered"));
    assert!(diff.added.is_empty() && diff.removed.is_empty());
    assert_eq!(diff.unchanged.len(), 2);
}

/// Composed and decomposed spellings are two monitored files
#[cfg(target_os = "linux")]
#[test]
fn test_unicode_spellings_monitored_separately() {
    let fixture = Fixture::new();
    fixture.write("caf\u{e9}", "composed");
    fixture.write("cafe\u{0301}", "decomposed");

    let baseline = fixture.monitor.establish_baseline().unwrap();
    assert_eq!(baseline.len(), 2);

    fixture.write("cafe\u{0301}", "changed");
    let outcome = fixture.monitor.check_integrity().unwrap();
    let diff = outcome.diff().unwrap();

    assert_eq!(
        diff.modified.keys().cloned().collect::<Vec<_>>(),
        vec!["cafe\u{0301}".to_string()]
    );
    assert!(diff.unchanged.contains("caf\u{e9}"));
}

/// A name that is not UTF-8 is reported as skipped and does not mask others
#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_skipped_without_masking() {
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::ffi::OsStrExt;

    let fixture = Fixture::new();
    fixture.write("bad\u{fffd}", "lookalike");
    fs::write(fixture.target().join(OsStr::from_bytes(b"bad\xff")), "raw").unwrap();

    let report = fixture.monitor.scan_current();
    assert_eq!(report.snapshot.len(), 1);
    assert_eq!(report.skipped.len(), 1);

    fixture.monitor.establish_baseline().unwrap();
    fixture.write("bad\u{fffd}", "tampered");

    let outcome = fixture.monitor.check_integrity().unwrap();
    let diff = outcome.diff().unwrap();
    assert_eq!(diff.modified["bad\u{fffd}"].new, sha256("tampered"));
}
