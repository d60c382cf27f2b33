use std::collections::HashMap;

use anyhow::{bail, Result};
use geo::MultiPolygon;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{geom::{Geometries, GeometryError}, graph::Graph, map::{AliasTable, District}};

/// A district id that is not part of the loaded map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown district '{0}'")]
pub struct UnknownDistrict(pub String);

impl From<UnknownDistrict> for GeometryError {
    fn from(err: UnknownDistrict) -> Self { GeometryError::UnknownDistrict(err.0) }
}

/// The immutable universe of polling districts for a run: ids, elector sizes,
/// nearby station names, shapes, and the symmetric adjacency graph between them.
#[derive(Debug)]
pub struct DistrictMap {
    ids: Vec<String>,                 // Sorted district ids; position is the district index.
    index: HashMap<String, u32>,      // Map between district ids and indices.
    electors: Vec<u64>,
    stations: Vec<Vec<String>>,
    graph: Graph,
    geoms: Geometries,
    aliases: AliasTable,
}

impl DistrictMap {
    /// Build a map from the feature table and an adjacency listing.
    ///
    /// Adjacency is made symmetric. Entries naming districts missing from the
    /// feature table are dropped, and districts with no adjacency entry become
    /// isolated nodes; both are reported as warnings.
    pub fn new(mut districts: Vec<District>, adjacency: &HashMap<String, Vec<String>>, aliases: AliasTable) -> Result<Self> {
        districts.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(pair) = districts.windows(2).find(|pair| pair[0].id == pair[1].id) {
            bail!("[DistrictMap.new] district '{}' appears more than once in the feature table", pair[0].id);
        }

        let index = districts.iter().enumerate()
            .map(|(i, district)| (district.id.clone(), i as u32))
            .collect::<HashMap<_, _>>();

        let unknown_keys = adjacency.keys().filter(|id| !index.contains_key(*id)).count();
        if unknown_keys > 0 {
            warn!(count = unknown_keys, "adjacency lists districts missing from the feature table; ignoring them");
        }

        let mut dropped = 0usize;
        let mut missing = 0usize;
        let edges = districts.iter()
            .map(|district| match adjacency.get(&district.id) {
                Some(neighbors) => neighbors.iter()
                    .filter_map(|id| {
                        let found = index.get(id).copied();
                        if found.is_none() { dropped += 1 }
                        found
                    })
                    .collect::<Vec<_>>(),
                None => { missing += 1; Vec::new() }
            })
            .collect::<Vec<_>>();

        if dropped > 0 { warn!(count = dropped, "dropped neighbors missing from the feature table") }
        if missing > 0 { warn!(count = missing, "districts have no adjacency entry") }

        let (graph, added) = Graph::symmetric(districts.len(), &edges);
        if added > 0 { warn!(count = added, "added reverse edges to make adjacency symmetric") }

        let isolated = (0..graph.node_count()).filter(|&u| graph.degree(u) == 0).count();
        if isolated > 0 { warn!(count = isolated, "districts have no neighbors and can only form single-district constituencies") }

        let (ids, electors, stations, shapes) = districts.into_iter()
            .fold((Vec::new(), Vec::new(), Vec::new(), Vec::new()), |mut acc, district| {
                acc.0.push(district.id);
                acc.1.push(district.elector_size);
                acc.2.push(district.nearest_stations);
                acc.3.push(district.shape);
                acc
            });

        let geoms = Geometries::new(shapes);
        debug!(
            districts = ids.len(),
            edges = graph.edge_count() / 2,
            alias_groups = aliases.len(),
            bounds = ?geoms.bounds(),
            "loaded district map"
        );

        Ok(Self { ids, index, electors, stations, graph, geoms, aliases })
    }

    /// Get the number of districts.
    #[inline] pub fn len(&self) -> usize { self.ids.len() }

    /// Check if the map has no districts.
    #[inline] pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Get the sorted list of district ids.
    #[inline] pub fn ids(&self) -> &[String] { &self.ids }

    /// Check whether a district id is part of the map.
    #[inline] pub fn contains(&self, id: &str) -> bool { self.index.contains_key(id) }

    /// Get the index of a district id.
    #[inline] pub(crate) fn index_of(&self, id: &str) -> Option<usize> { self.index.get(id).map(|&i| i as usize) }

    /// Get the district id at a given index.
    #[inline] pub(crate) fn id(&self, idx: usize) -> &str { &self.ids[idx] }

    /// Get the elector size of a district by index.
    #[inline] pub(crate) fn electors_at(&self, idx: usize) -> u64 { self.electors[idx] }

    /// Get the ranked station names of a district by index.
    #[inline] pub(crate) fn stations_at(&self, idx: usize) -> &[String] { &self.stations[idx] }

    /// Get a reference to the adjacency graph.
    #[inline] pub(crate) fn graph(&self) -> &Graph { &self.graph }

    /// Get a reference to the district shapes.
    #[inline] pub(crate) fn geoms(&self) -> &Geometries { &self.geoms }

    /// Get a reference to the alias table.
    #[inline] pub fn aliases(&self) -> &AliasTable { &self.aliases }

    /// Get the elector size of a district.
    pub fn elector_size(&self, id: &str) -> Option<u64> {
        self.index_of(id).map(|i| self.electors[i])
    }

    /// Sum of elector sizes across every district in the map.
    pub fn total_electors(&self) -> u64 { self.electors.iter().sum() }

    /// Get the neighbors of a district, sorted by id.
    pub fn neighbors(&self, id: &str) -> Option<Vec<&str>> {
        self.index_of(id).map(|i| self.graph.edges(i).map(|v| self.id(v)).collect())
    }

    /// Check whether two districts share a boundary.
    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(u), Some(v)) => self.graph.is_adjacent(u, v),
            _ => false,
        }
    }

    /// Resolve district ids to indices, failing on the first unknown id.
    pub(crate) fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<usize>, UnknownDistrict> {
        ids.iter()
            .map(|id| self.index_of(id.as_ref()).ok_or_else(|| UnknownDistrict(id.as_ref().to_string())))
            .collect()
    }

    /// Check if a set of districts is connected under the adjacency graph.
    /// Empty sets and sets naming unknown districts are not contiguous.
    pub fn is_contiguous<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.resolve(ids).is_ok_and(|nodes| self.graph.is_contiguous(&nodes))
    }

    /// Get the outline of a district.
    pub fn shape(&self, id: &str) -> Option<&MultiPolygon<f64>> {
        self.index_of(id).and_then(|i| self.geoms.shape(i))
    }

    /// Union the shapes of a set of districts into a single geometry.
    /// An empty set yields `Ok(None)`.
    pub fn unioned_geometry<S: AsRef<str>>(&self, ids: &[S]) -> Result<Option<MultiPolygon<f64>>, GeometryError> {
        let nodes = self.resolve(ids)?;
        self.geoms.union_of(&nodes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use geo::{LineString, MultiPolygon, Polygon};

    use super::*;

    /// A unit square cell at grid position (col, row).
    pub(crate) fn cell(col: u32, row: u32) -> MultiPolygon<f64> {
        let (x, y) = (col as f64, row as f64);
        MultiPolygon(vec![Polygon::new(LineString::from(vec![
            (x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0), (x, y),
        ]), vec![])])
    }

    /// Districts laid out as a `cols` x `rows` grid of unit squares with
    /// rook adjacency. Ids are "r{row}c{col}"; electors and stations come
    /// from the callbacks.
    pub(crate) fn grid_map(
        cols: u32,
        rows: u32,
        electors: impl Fn(u32, u32) -> u64,
        stations: impl Fn(u32, u32) -> Vec<String>,
        aliases: AliasTable,
    ) -> DistrictMap {
        let id = |c: u32, r: u32| format!("r{r}c{c}");
        let mut districts = Vec::new();
        let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
        for r in 0..rows {
            for c in 0..cols {
                districts.push(District::new(id(c, r), electors(c, r), stations(c, r), cell(c, r)));
                let neighbors = adjacency.entry(id(c, r)).or_default();
                if c > 0 { neighbors.push(id(c - 1, r)) }
                if c + 1 < cols { neighbors.push(id(c + 1, r)) }
                if r > 0 { neighbors.push(id(c, r - 1)) }
                if r + 1 < rows { neighbors.push(id(c, r + 1)) }
            }
        }
        DistrictMap::new(districts, &adjacency, aliases).unwrap()
    }

    fn row_map() -> DistrictMap {
        grid_map(4, 1, |c, _| 1000 * (c as u64 + 1), |_, _| vec![], AliasTable::default())
    }

    #[test]
    fn ids_are_sorted_and_indexed() {
        let map = row_map();
        assert_eq!(map.ids(), &["r0c0", "r0c1", "r0c2", "r0c3"]);
        assert_eq!(map.index_of("r0c2"), Some(2));
        assert_eq!(map.elector_size("r0c3"), Some(4000));
        assert_eq!(map.total_electors(), 10000);
        assert!(!map.contains("r9c9"));
    }

    #[test]
    fn neighbors_follow_the_grid() {
        let map = row_map();
        assert_eq!(map.neighbors("r0c1"), Some(vec!["r0c0", "r0c2"]));
        assert_eq!(map.neighbors("r0c0"), Some(vec!["r0c1"]));
        assert_eq!(map.neighbors("nope"), None);
        assert!(map.are_adjacent("r0c2", "r0c1"));
        assert!(!map.are_adjacent("r0c0", "r0c2"));
        assert!(!map.are_adjacent("r0c0", "nope"));
    }

    #[test]
    fn one_sided_adjacency_is_symmetrized() {
        let districts = vec![
            District::new("A", 1, vec![], cell(0, 0)),
            District::new("B", 1, vec![], cell(1, 0)),
            District::new("C", 1, vec![], cell(2, 0)),
        ];
        let adjacency = HashMap::from([
            ("A".to_string(), vec!["B".to_string()]),
            ("B".to_string(), vec!["C".to_string(), "Z".to_string()]),
        ]);
        let map = DistrictMap::new(districts, &adjacency, AliasTable::default()).unwrap();

        assert_eq!(map.neighbors("B"), Some(vec!["A", "C"]));
        assert_eq!(map.neighbors("C"), Some(vec!["B"]));
    }

    #[test]
    fn duplicate_feature_rows_are_rejected() {
        let districts = vec![
            District::new("A", 1, vec![], cell(0, 0)),
            District::new("A", 2, vec![], cell(1, 0)),
        ];
        assert!(DistrictMap::new(districts, &HashMap::new(), AliasTable::default()).is_err());
    }

    #[test]
    fn contiguity_by_id() {
        let map = row_map();
        assert!(map.is_contiguous(&["r0c0", "r0c1", "r0c2"]));
        assert!(!map.is_contiguous(&["r0c0", "r0c2"]));
        assert!(!map.is_contiguous(&["r0c0", "missing"]));
        assert!(!map.is_contiguous::<&str>(&[]));
    }

    #[test]
    fn unioned_geometry_by_id() {
        use geo::Area;

        let map = row_map();
        let union = map.unioned_geometry(&["r0c0", "r0c1"]).unwrap().unwrap();
        assert!((union.unsigned_area() - 2.0).abs() < 1e-9);
        assert!(map.unioned_geometry::<&str>(&[]).unwrap().is_none());
        assert!((map.shape("r0c3").unwrap().unsigned_area() - 1.0).abs() < 1e-12);
        assert!(map.shape("zz").is_none());
        assert_eq!(
            map.unioned_geometry(&["r0c0", "zz"]),
            Err(GeometryError::UnknownDistrict("zz".into()))
        );
    }
}
