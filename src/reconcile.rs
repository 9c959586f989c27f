//! Reconciliation of a baseline snapshot against a current one
//!
//! Every path in either snapshot lands in exactly one of four classes:
//! added, removed, modified or unchanged. Only the content digest is
//! compared; timestamps and permissions play no part.

use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Old and new digest of a modified path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestChange {
    pub old: String,
    pub new: String,
}

/// Classified difference between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub modified: BTreeMap<String, DigestChange>,
    pub unchanged: BTreeSet<String>,
}

/// Classify every path of `baseline` ∪ `current`.
pub fn diff(baseline: &Snapshot, current: &Snapshot) -> DiffResult {
    let mut result = DiffResult::default();

    for (path, old) in baseline {
        match current.get(path) {
            None => {
                result.removed.insert(path.clone());
            }
            Some(new) if new != old.as_str() => {
                result.modified.insert(
                    path.clone(),
                    DigestChange {
                        old: old.clone(),
                        new: new.to_string(),
                    },
                );
            }
            Some(_) => {
                result.unchanged.insert(path.clone());
            }
        }
    }

    for path in current.paths() {
        if !baseline.contains(path) {
            result.added.insert(path.to_string());
        }
    }

    result
}

impl DiffResult {
    /// True if anything was added, removed or modified.
    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// Number of distinct paths across all four classes.
    pub fn total_paths(&self) -> usize {
        self.change_count() + self.unchanged.len()
    }

    /// Every baselined path is gone and nothing replaced it
    ///
    /// Typically the monitored directory was deleted or emptied.
    pub fn is_total_loss(&self) -> bool {
        !self.removed.is_empty()
            && self.added.is_empty()
            && self.modified.is_empty()
            && self.unchanged.is_empty()
    }
}
