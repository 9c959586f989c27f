//! JSON file persistence for the baseline

use crate::error::StorageError;
use crate::snapshot::Snapshot;
use crate::store::{BaselineState, BaselineStore};
use crate::tree::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// On-disk record layout
#[derive(Debug, Serialize, Deserialize)]
struct BaselineRecord {
    algorithm: HashAlgorithm,
    files: BTreeMap<String, String>,
}

/// Accepted layouts when reading a record back
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Tagged(BaselineRecord),
    /// Bare `{ path: digest }` object, digests of the configured algorithm
    Flat(BTreeMap<String, String>),
}

/// Baseline stored as a human-readable JSON file
#[derive(Debug, Clone)]
pub struct JsonBaselineStore {
    path: PathBuf,
    algorithm: HashAlgorithm,
}

impl JsonBaselineStore {
    pub fn new<P: AsRef<Path>>(path: P, algorithm: HashAlgorithm) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            algorithm,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn parse(&self, content: &str) -> Result<Snapshot, String> {
        let record: StoredRecord =
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

        let files = match record {
            StoredRecord::Tagged(record) => {
                if record.algorithm != self.algorithm {
                    return Err(format!(
                        "recorded with {}, configured algorithm is {}",
                        record.algorithm, self.algorithm
                    ));
                }
                record.files
            }
            StoredRecord::Flat(files) => files,
        };

        let mut snapshot = Snapshot::new();
        for (path, digest) in files {
            if !self.algorithm.is_valid_digest(&digest) {
                return Err(format!(
                    "digest for {:?} is not a {} hex digest",
                    path, self.algorithm
                ));
            }
            if path.is_empty() {
                return Err("empty path key".to_string());
            }
            snapshot.insert(path, digest);
        }
        Ok(snapshot)
    }

    fn temp_path(&self) -> PathBuf {
        temp_path_for(&self.path)
    }
}

/// Sibling file a record is written to before being renamed into place.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl BaselineStore for JsonBaselineStore {
    fn load_state(&self) -> BaselineState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return BaselineState::Absent,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Baseline is unreadable");
                return BaselineState::Corrupted {
                    reason: format!("unreadable: {}", e),
                };
            }
        };

        match self.parse(&content) {
            Ok(snapshot) => BaselineState::Loaded(snapshot),
            Err(reason) => {
                warn!(path = %self.path.display(), reason = %reason, "Baseline is corrupted");
                BaselineState::Corrupted { reason }
            }
        }
    }

    /// Save the baseline atomically
    ///
    /// Writes a sibling temporary file, syncs it, then renames it over the
    /// record so a crash leaves either the old or the new baseline.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let write_failed = |path: &Path, source: std::io::Error| StorageError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_failed(parent, e))?;
            }
        }

        let record = BaselineRecord {
            algorithm: self.algorithm,
            files: snapshot.clone().into_inner(),
        };
        let mut serialized = serde_json::to_vec_pretty(&record)?;
        serialized.push(b'\n');

        let temp_path = self.temp_path();
        let write_temp = || -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(&serialized)?;
            file.sync_all()
        };
        if let Err(e) = write_temp() {
            let _ = fs::remove_file(&temp_path);
            return Err(write_failed(&temp_path, e));
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_failed(&self.path, e)
        })?;

        info!(path = %self.path.display(), files = snapshot.len(), "Baseline saved");
        Ok(())
    }
}
