use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Create the parent directory of a file path if it doesn't exist;
/// error if a non-directory exists there.
pub(crate) fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else { return Ok(()) };

    if parent.exists() {
        if !parent.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", parent.display());
        }
    } else {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/out.json");
        ensure_parent_dir_exists(&path).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn bare_file_name_needs_no_parent() {
        ensure_parent_dir_exists(Path::new("out.json")).unwrap();
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        assert!(ensure_parent_dir_exists(&blocker.join("out.json")).is_err());
    }
}
