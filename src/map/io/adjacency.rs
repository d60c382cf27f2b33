use std::collections::HashMap;

use anyhow::{Context, Result};

/// Read an adjacency listing: a JSON object from district id to neighbor ids.
pub(crate) fn read_adjacency(bytes: &[u8]) -> Result<HashMap<String, Vec<String>>> {
    serde_json::from_slice(bytes).context("Failed to parse adjacency JSON (expected {id: [neighbor, ...]})")
}

/// Read alias groups: a JSON array of arrays of equivalent names.
pub(crate) fn read_alias_groups(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    serde_json::from_slice(bytes).context("Failed to parse alias JSON (expected [[name, ...], ...])")
}
