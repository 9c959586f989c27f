//! Tree scanner: walks a root directory and digests every regular file

use crate::error::{DigestError, DigestFailureKind, PathKeyError};
use crate::snapshot::Snapshot;
use crate::tree::hasher::{self, HashAlgorithm};
use crate::tree::path;
use crate::tree::walker::{Walker, WalkerConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Scanner configuration
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub algorithm: HashAlgorithm,
    pub follow_symlinks: bool,
    /// Hash files on the rayon pool instead of sequentially
    pub parallel: bool,
    /// Absolute paths left out of the snapshot
    pub exclude: Vec<PathBuf>,
}

/// A path that was left out of the snapshot, and why
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub kind: DigestFailureKind,
    pub reason: String,
}

/// Snapshot plus the per-entry failures encountered while producing it
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub snapshot: Snapshot,
    pub skipped: Vec<SkippedEntry>,
    /// False when the root did not exist at scan time
    pub root_exists: bool,
}

/// Produces snapshots of a directory tree
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `root` and return the path → digest mapping
    pub fn scan(&self, root: &Path) -> Snapshot {
        self.scan_with_report(root).snapshot
    }

    /// Scan `root`, also returning the entries that had to be skipped
    ///
    /// A missing root yields an empty snapshot. The scan never creates or
    /// modifies anything on disk.
    pub fn scan_with_report(&self, root: &Path) -> ScanReport {
        if !root.is_dir() {
            warn!(root = %root.display(), "Scan root does not exist or is not a directory");
            return ScanReport::default();
        }

        let root = path::resolve_root(root);
        info!(root = %root.display(), algorithm = %self.options.algorithm, "Scanning files");

        let walked = Walker::with_config(
            root.clone(),
            WalkerConfig {
                follow_symlinks: self.options.follow_symlinks,
                exclude: self.options.exclude.clone(),
                max_depth: None,
            },
        )
        .walk();

        let mut report = ScanReport {
            root_exists: true,
            ..ScanReport::default()
        };
        for failure in walked.failures {
            report.skipped.push(SkippedEntry {
                path: failure.path.unwrap_or_else(|| root.clone()),
                kind: DigestFailureKind::Unreadable,
                reason: failure.reason,
            });
        }

        let algorithm = self.options.algorithm;
        let digest = |file: &PathBuf| (file.clone(), hasher::hash_file(file, algorithm));
        let results: Vec<(PathBuf, Result<String, DigestError>)> = if self.options.parallel {
            walked.files.par_iter().map(digest).collect()
        } else {
            walked.files.iter().map(digest).collect()
        };

        for (file, result) in results {
            let key = match path::relative_key(&root, &file) {
                Ok(key) => key,
                Err(PathKeyError::NotBelowRoot) => continue,
                Err(err) => {
                    warn!(path = %file.display(), error = %err, "File has no snapshot key");
                    report.skipped.push(SkippedEntry {
                        path: file,
                        kind: DigestFailureKind::InvalidName,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            match result {
                Ok(digest) => {
                    debug!(path = %key, digest = %digest, "Hashed file");
                    if report.snapshot.contains(&key) {
                        warn!(path = %key, file = %file.display(), "Snapshot key already taken");
                        report.skipped.push(SkippedEntry {
                            path: file,
                            kind: DigestFailureKind::InvalidName,
                            reason: format!("key {:?} is already used by another file", key),
                        });
                    } else {
                        report.snapshot.insert(key, digest);
                    }
                }
                Err(err) => {
                    match err.kind() {
                        DigestFailureKind::Vanished => {
                            debug!(path = %key, "File vanished during scan")
                        }
                        _ => warn!(path = %key, error = %err, "Failed to hash file"),
                    }
                    report.skipped.push(SkippedEntry {
                        path: file,
                        kind: err.kind(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            files = report.snapshot.len(),
            skipped = report.skipped.len(),
            "Scan complete"
        );
        report
    }
}
