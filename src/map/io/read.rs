use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::map::{AliasTable, DistrictMap, io::{read_adjacency, read_alias_groups, read_districts_from_geojson_bytes}};

impl DistrictMap {
    /// Load a map from an adjacency JSON file, a GeoJSON feature table, and an
    /// optional alias-group JSON file.
    pub fn read_from_files(adjacency_path: &Path, features_path: &Path, aliases_path: Option<&Path>) -> Result<Self> {
        let read = |path: &Path| std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()));

        let adjacency = read_adjacency(&read(adjacency_path)?)
            .with_context(|| format!("Invalid adjacency file {}", adjacency_path.display()))?;
        let districts = read_districts_from_geojson_bytes(&read(features_path)?)
            .with_context(|| format!("Invalid feature table {}", features_path.display()))?;
        let aliases = match aliases_path {
            Some(path) => AliasTable::new(read_alias_groups(&read(path)?)
                .with_context(|| format!("Invalid alias file {}", path.display()))?),
            None => AliasTable::default(),
        };

        let map = Self::new(districts, &adjacency, aliases)?;
        info!(districts = map.len(), electors = map.total_electors(), "read district map");

        Ok(map)
    }

    /// Load a map from in-memory JSON documents (same formats as the files).
    pub fn from_json(adjacency: &str, features: &str, aliases: Option<&str>) -> Result<Self> {
        let aliases = match aliases {
            Some(json) => AliasTable::new(read_alias_groups(json.as_bytes())?),
            None => AliasTable::default(),
        };
        Self::new(
            read_districts_from_geojson_bytes(features.as_bytes())?,
            &read_adjacency(adjacency.as_bytes())?,
            aliases,
        )
    }
}
