//! Root resolution and snapshot keys

use crate::error::PathKeyError;
use std::path::{Component, Path, PathBuf};

/// Resolve a root directory to an absolute, canonical form when it exists
///
/// Falls back to the path as given when canonicalization fails (for example
/// because the directory does not exist yet).
pub fn resolve_root(root: &Path) -> PathBuf {
    dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())
}

/// Compute the snapshot key for `path` relative to `root`
///
/// Keys join the file name components with `/` exactly as they appear on
/// disk. Names are not case- or Unicode-folded, so two distinct files never
/// share a key; a `\` inside a Unix file name stays part of that name.
pub fn relative_key(root: &Path, path: &Path) -> Result<String, PathKeyError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PathKeyError::NotBelowRoot)?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            let name = name
                .to_str()
                .ok_or_else(|| PathKeyError::NotUtf8(name.to_string_lossy().into_owned()))?;
            parts.push(name);
        }
    }

    if parts.is_empty() {
        Err(PathKeyError::NotBelowRoot)
    } else {
        Ok(parts.join("/"))
    }
}
