use std::path::Path;

use anyhow::{Context, Result};

use crate::{common::{read_json, write_json}, plan::Assignment};

impl Assignment {
    /// Read an assignment record from a JSON file.
    pub fn read_from_json(path: &Path) -> Result<Self> {
        read_json(path).with_context(|| format!("[Assignment.read_from_json] Failed to load assignment from {}", path.display()))
    }

    /// Write the assignment record to a JSON file, creating parent directories.
    pub fn write_to_json(&self, path: &Path) -> Result<()> {
        write_json(self, path).with_context(|| format!("[Assignment.write_to_json] Failed to save assignment to {}", path.display()))
    }
}
