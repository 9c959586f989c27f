//! Integrity API
//!
//! Caller-facing operations: bootstrap the monitored directory, establish a
//! baseline, check the tree against it, and promote a checked snapshot to be
//! the new baseline. Whether to promote is always the caller's decision.

use crate::config::IntegrityConfig;
use crate::error::ApiError;
use crate::reconcile::{self, DiffResult};
use crate::snapshot::Snapshot;
use crate::store::persistence::temp_path_for;
use crate::store::{BaselineState, BaselineStore, JsonBaselineStore};
use crate::tree::{path, ScanOptions, ScanReport, Scanner};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Why a baseline had to be created during a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorBaseline {
    Absent,
    Corrupted { reason: String },
}

/// Result of [`IntegrityMonitor::check_integrity`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// There was no usable baseline; the current snapshot was saved as one
    BaselineJustCreated {
        snapshot: Snapshot,
        previous: PriorBaseline,
    },
    /// The current snapshot was compared against the stored baseline
    Compared { diff: DiffResult, current: Snapshot },
}

/// Where a monitored tree stands after a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityState {
    BaselineEstablished,
    Consistent,
    ChangesDetected,
}

impl CheckOutcome {
    pub fn state(&self) -> IntegrityState {
        match self {
            CheckOutcome::BaselineJustCreated { .. } => IntegrityState::BaselineEstablished,
            CheckOutcome::Compared { diff, .. } if diff.has_changes() => {
                IntegrityState::ChangesDetected
            }
            CheckOutcome::Compared { .. } => IntegrityState::Consistent,
        }
    }

    pub fn diff(&self) -> Option<&DiffResult> {
        match self {
            CheckOutcome::Compared { diff, .. } => Some(diff),
            CheckOutcome::BaselineJustCreated { .. } => None,
        }
    }
}

/// Outcome of a check followed by the caller's promotion decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: CheckOutcome,
    /// True when the current snapshot replaced the baseline
    pub baseline_updated: bool,
}

/// Entry point for integrity operations on one monitored tree
pub struct IntegrityMonitor<S: BaselineStore = JsonBaselineStore> {
    config: IntegrityConfig,
    store: S,
}

impl IntegrityMonitor<JsonBaselineStore> {
    /// Monitor backed by a JSON baseline at `config.baseline_path`
    pub fn new(config: IntegrityConfig) -> Self {
        let store = JsonBaselineStore::new(&config.baseline_path, config.algorithm);
        Self::with_store(config, store)
    }
}

impl<S: BaselineStore> IntegrityMonitor<S> {
    pub fn with_store(config: IntegrityConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &IntegrityConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the target directory if it does not exist
    ///
    /// Returns true when the directory was created.
    pub fn bootstrap(&self) -> Result<bool, ApiError> {
        let target = &self.config.target_dir;
        if target.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(target).map_err(|source| ApiError::BootstrapFailed {
            path: target.clone(),
            source,
        })?;
        info!(target = %target.display(), "Created target directory");
        Ok(true)
    }

    /// Scan the target directory without touching the baseline
    pub fn scan_current(&self) -> ScanReport {
        // Resolved per scan: the baseline's directory may not exist until the first save.
        let scanner = Scanner::new(ScanOptions {
            algorithm: self.config.algorithm,
            follow_symlinks: self.config.follow_symlinks,
            parallel: self.config.parallel,
            exclude: baseline_exclusions(&self.config.baseline_path),
        });
        scanner.scan_with_report(&self.config.target_dir)
    }

    /// Read the stored baseline
    pub fn baseline_state(&self) -> BaselineState {
        self.store.load_state()
    }

    /// Scan the target and record the result as the baseline
    pub fn establish_baseline(&self) -> Result<Snapshot, ApiError> {
        self.bootstrap()?;
        let snapshot = self.scan_current().snapshot;
        self.store.save(&snapshot)?;
        info!(files = snapshot.len(), "Baseline established");
        Ok(snapshot)
    }

    /// Compare the target against the baseline
    ///
    /// Without a usable baseline (absent or corrupted) the current snapshot is
    /// saved as the new baseline instead of being compared.
    pub fn check_integrity(&self) -> Result<CheckOutcome, ApiError> {
        let previous = match self.store.load_state() {
            BaselineState::Loaded(baseline) => {
                self.bootstrap()?;
                let current = self.scan_current().snapshot;
                let diff = reconcile::diff(&baseline, &current);
                if diff.is_total_loss() {
                    warn!(
                        removed = diff.removed.len(),
                        target = %self.config.target_dir.display(),
                        "Every baselined file is missing"
                    );
                }
                info!(
                    added = diff.added.len(),
                    removed = diff.removed.len(),
                    modified = diff.modified.len(),
                    unchanged = diff.unchanged.len(),
                    "Integrity check complete"
                );
                return Ok(CheckOutcome::Compared { diff, current });
            }
            BaselineState::Absent => {
                info!("No baseline found, creating a new one");
                PriorBaseline::Absent
            }
            BaselineState::Corrupted { reason } => {
                warn!(reason = %reason, "Baseline is corrupted, creating a new one");
                PriorBaseline::Corrupted { reason }
            }
        };

        let snapshot = self.establish_baseline()?;
        Ok(CheckOutcome::BaselineJustCreated { snapshot, previous })
    }

    /// Replace the stored baseline with `snapshot`
    pub fn promote_to_baseline(&self, snapshot: &Snapshot) -> Result<(), ApiError> {
        self.store.save(snapshot)?;
        info!(files = snapshot.len(), "Baseline updated");
        Ok(())
    }

    /// Run a check and let `decide` choose whether detected changes become
    /// the new baseline
    ///
    /// `decide` is only invoked when changes were detected.
    pub fn check_and_resolve<F>(&self, decide: F) -> Result<Resolution, ApiError>
    where
        F: FnOnce(&DiffResult) -> Result<bool, ApiError>,
    {
        let outcome = self.check_integrity()?;
        let mut baseline_updated = false;

        if let CheckOutcome::Compared { diff, current } = &outcome {
            if diff.has_changes() {
                if decide(diff)? {
                    self.promote_to_baseline(current)?;
                    baseline_updated = true;
                } else {
                    info!("Baseline not updated, previous state is kept");
                }
            }
        }

        Ok(Resolution {
            outcome,
            baseline_updated,
        })
    }
}

/// Candidate absolute forms of the baseline path and its temp sibling, so a
/// record stored inside the monitored tree never shows up in its own snapshot.
fn baseline_exclusions(baseline_path: &Path) -> Vec<PathBuf> {
    let mut paths = vec![baseline_path.to_path_buf()];
    if let (Some(parent), Some(name)) = (baseline_path.parent(), baseline_path.file_name()) {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        let resolved = path::resolve_root(parent).join(name);
        if !paths.contains(&resolved) {
            paths.push(resolved);
        }
    }
    let temps: Vec<PathBuf> = paths.iter().map(|p| temp_path_for(p)).collect();
    paths.extend(temps);
    paths
}
