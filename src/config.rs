//! Configuration System
//!
//! Layered configuration for the integrity checker. Sources are merged in
//! order of increasing precedence: built-in defaults, the global config file,
//! workspace config files, then `FILEGUARD__*` environment variables. CLI
//! flags are applied on top by the binary.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::HashAlgorithm;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileguardConfig {
    /// Monitored tree and baseline settings
    #[serde(default)]
    pub integrity: IntegrityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings that drive scanning, hashing and baseline storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityConfig {
    /// Directory whose files are monitored
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// Location of the baseline record
    #[serde(default = "default_baseline_path")]
    pub baseline_path: PathBuf,

    /// Hash function for content digests
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Descend into symlinked directories and hash symlinked files
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Hash files on a worker pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("monitored_data")
}

fn default_baseline_path() -> PathBuf {
    PathBuf::from("integrity_baseline.json")
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            baseline_path: default_baseline_path(),
            algorithm: HashAlgorithm::default(),
            follow_symlinks: false,
            parallel: false,
        }
    }
}

impl IntegrityConfig {
    /// Validate paths
    pub fn validate(&self) -> Result<(), String> {
        if self.target_dir.as_os_str().is_empty() {
            return Err("Target directory cannot be empty".to_string());
        }
        if self.baseline_path.as_os_str().is_empty() {
            return Err("Baseline path cannot be empty".to_string());
        }
        if self.baseline_path.is_dir() {
            return Err(format!(
                "Baseline path {:?} is a directory",
                self.baseline_path
            ));
        }
        Ok(())
    }

    /// Resolve relative paths against `workspace_root`.
    pub fn resolve(mut self, workspace_root: &Path) -> Self {
        if self.target_dir.is_relative() {
            self.target_dir = workspace_root.join(&self.target_dir);
        }
        if self.baseline_path.is_relative() {
            self.baseline_path = workspace_root.join(&self.baseline_path);
        }
        self
    }
}

/// Loads [`FileguardConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    pub fn load(workspace_root: &Path) -> Result<FileguardConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<FileguardConfig>()?;
        Ok(config)
    }

    /// Load configuration from a single explicit file (plus environment)
    pub fn load_from_file(path: &Path) -> Result<FileguardConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<FileguardConfig>()?;
        Ok(config)
    }

    fn environment() -> Environment {
        Environment::with_prefix("FILEGUARD")
            .separator("__")
            .try_parsing(true)
    }
}
