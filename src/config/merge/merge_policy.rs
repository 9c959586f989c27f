//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("integrity.target_dir", "monitored_data")?
        .set_default("integrity.baseline_path", "integrity_baseline.json")?
        .set_default("integrity.algorithm", "sha256")?
        .set_default("integrity.follow_symlinks", false)?
        .set_default("integrity.parallel", false)
}
