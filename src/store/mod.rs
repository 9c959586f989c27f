//! Baseline Store
//!
//! Persists the trusted snapshot between runs. Loading never fails: an absent
//! or unreadable record is reported through [`BaselineState`] so the caller
//! can rebuild it.

pub mod persistence;

pub use persistence::JsonBaselineStore;

use crate::error::StorageError;
use crate::snapshot::Snapshot;

/// What a load found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineState {
    /// No record exists yet
    Absent,
    /// A valid record (possibly with zero entries)
    Loaded(Snapshot),
    /// A record exists but could not be used
    Corrupted { reason: String },
}

impl BaselineState {
    /// The loaded snapshot, or an empty one when there is none.
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            BaselineState::Loaded(snapshot) => snapshot,
            BaselineState::Absent | BaselineState::Corrupted { .. } => Snapshot::new(),
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, BaselineState::Loaded(_))
    }
}

/// Baseline Store interface
pub trait BaselineStore {
    fn load_state(&self) -> BaselineState;

    /// Fully replace the stored baseline with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;

    /// Load the baseline, empty when absent or corrupted.
    fn load(&self) -> Snapshot {
        self.load_state().into_snapshot()
    }
}
