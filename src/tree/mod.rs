//! Filesystem tree scanning
//!
//! Enumerates the regular files under a monitored root and digests each one
//! into a [`Snapshot`](crate::snapshot::Snapshot).

pub mod hasher;
pub mod path;
pub mod scanner;
pub mod walker;

pub use hasher::{hash_bytes, hash_file, HashAlgorithm};
pub use scanner::{ScanOptions, ScanReport, Scanner, SkippedEntry};
