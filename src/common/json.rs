use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use crate::common::ensure_parent_dir_exists;

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Serialize a value as pretty-printed JSON, creating parent directories as needed.
/// The file is written to a sibling temporary path first and renamed into place.
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    ensure_parent_dir_exists(path)?;

    let bytes = serde_json::to_vec_pretty(value).context("Failed to serialize JSON")?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, bytes).with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path).with_context(|| format!("Failed to move {} into place", path.display()))
}
