//! Fileguard: file integrity checking against a recorded baseline
//!
//! Records content digests of every file under a monitored directory and
//! later classifies each path as added, removed, modified or unchanged
//! relative to that baseline.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod snapshot;
pub mod store;
pub mod tree;

pub use api::{CheckOutcome, IntegrityMonitor, IntegrityState, PriorBaseline, Resolution};
pub use reconcile::{diff, DiffResult, DigestChange};
pub use snapshot::{FileRecord, Snapshot};
pub use store::{BaselineState, BaselineStore, JsonBaselineStore};
