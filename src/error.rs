//! Error types for the fileguard integrity checker.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file digest failures.
///
/// Both variants are contained by the scanner: the path is left out of the
/// snapshot for this run and the scan continues.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The file disappeared between enumeration and read.
    #[error("File vanished before it could be hashed: {path:?}")]
    NotFound { path: PathBuf },

    /// Any other I/O failure while opening or reading the file.
    #[error("Failed to read {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a path was left out of a snapshot, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestFailureKind {
    Vanished,
    Unreadable,
    /// The file name cannot be represented as a distinct snapshot key
    InvalidName,
}

/// A scanned path that has no snapshot key
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathKeyError {
    #[error("Path is not below the scan root")]
    NotBelowRoot,

    #[error("File name {0:?} is not valid UTF-8")]
    NotUtf8(String),
}

impl DigestError {
    pub fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            DigestError::NotFound { path }
        } else {
            DigestError::ReadError { path, source: err }
        }
    }

    pub fn kind(&self) -> DigestFailureKind {
        match self {
            DigestError::NotFound { .. } => DigestFailureKind::Vanished,
            DigestError::ReadError { .. } => DigestFailureKind::Unreadable,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            DigestError::NotFound { path } | DigestError::ReadError { path, .. } => path,
        }
    }
}

/// Baseline storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to encode baseline record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write baseline to {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced to callers of the integrity API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to create target directory {path:?}: {source}")]
    BootstrapFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Baseline already exists at {0:?}. Use --force to overwrite it.")]
    BaselineExists(PathBuf),

    #[error("Prompt failed: {0}")]
    PromptFailed(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
