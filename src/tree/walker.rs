//! Filesystem walker that enumerates the regular files under a root

use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false, avoids cycles)
    pub follow_symlinks: bool,
    /// Exact paths that are never reported (e.g. the baseline record itself)
    pub exclude: Vec<PathBuf>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

/// An entry the walker could not descend into or inspect
#[derive(Debug, Clone)]
pub struct WalkFailure {
    pub path: Option<PathBuf>,
    pub reason: String,
}

/// Result of a walk: regular files, sorted, plus the entries that failed
#[derive(Debug, Clone, Default)]
pub struct Walked {
    pub files: Vec<PathBuf>,
    pub failures: Vec<WalkFailure>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect every regular file
    ///
    /// Symlinks are skipped unless `follow_symlinks` is set, in which case
    /// their targets are classified instead. Sockets, FIFOs and device nodes
    /// are always skipped. Errors on individual entries are collected and the
    /// walk continues.
    pub fn walk(&self) -> Walked {
        let mut walked = Walked::default();
        let excluded: HashSet<&PathBuf> = self.config.exclude.iter().collect();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf());
                    warn!(path = ?path, error = %e, "Skipping unreadable entry during walk");
                    walked.failures.push(WalkFailure {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            // With follow_links enabled walkdir reports the target's type.
            let file_type = entry.file_type();
            if !file_type.is_file() {
                if file_type.is_symlink() {
                    debug!(path = %entry.path().display(), "Skipping symlink");
                }
                continue;
            }

            let path = entry.into_path();
            if excluded.contains(&path) {
                debug!(path = %path.display(), "Skipping excluded path");
                continue;
            }
            walked.files.push(path);
        }

        walked.files.sort();
        walked
    }
}
