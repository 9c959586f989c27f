//! Workspace config files: `config/config.toml`, then `config/<FILEGUARD_ENV>.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment name used when `FILEGUARD_ENV` is unset.
const DEFAULT_ENV: &str = "development";

/// Candidate workspace files, lowest precedence first.
pub fn workspace_config_files(workspace_root: &Path) -> Vec<PathBuf> {
    let env_name = std::env::var("FILEGUARD_ENV")
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string());
    let config_dir = workspace_root.join("config");
    vec![
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
}

/// Layer every workspace file that exists onto `builder`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = workspace_config_files(workspace_root)
        .into_iter()
        .filter(|path| path.is_file())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), "Loading workspace configuration");
            builder.add_source(File::from(path).required(false))
        });
    Ok(builder)
}
