use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{trace, warn};

use crate::{
    geom::{compactness, convexity, GeometryError},
    map::DistrictMap,
    objective::{cache::{set_key, MetricCache, ShapeMetrics}, geometric_score, ConstituencyScore, ScoreReport},
    plan::{Assignment, Constituency},
};

/// Scores assignments against a district map.
///
/// Scoring is a pure function of the assignment; the compactness, convexity
/// and relevance of each district set are memoized for the lifetime of the
/// scorer, keyed by the sorted set of district indices.
#[derive(Debug)]
pub struct Scorer {
    map: Arc<DistrictMap>,
    cache: MetricCache,
    parallel: bool,
}

/// Resolved membership of one constituency.
struct Members<'a> {
    constituency: &'a Constituency,
    nodes: Vec<usize>, // Sorted, deduplicated district indices.
    electors: u64,
}

impl Scorer {
    pub fn new(map: impl Into<Arc<DistrictMap>>) -> Self {
        Self { map: map.into(), cache: MetricCache::new(), parallel: true }
    }

    /// Enable or disable computing constituency metrics on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline] pub fn map(&self) -> &DistrictMap { &self.map }

    #[inline] pub(crate) fn map_handle(&self) -> Arc<DistrictMap> { Arc::clone(&self.map) }

    #[inline] pub fn is_parallel(&self) -> bool { self.parallel }

    /// Get the number of distinct district sets with memoized shape metrics.
    #[inline] pub fn cached_shapes(&self) -> usize { self.cache.shapes.len() }

    /// Score every constituency and the assignment as a whole.
    ///
    /// Fails if a constituency names a district missing from the map.
    pub fn score(&self, assignment: &Assignment) -> Result<ScoreReport> {
        let members = assignment.constituencies.iter()
            .map(|constituency| {
                let mut nodes = self.map.resolve(&constituency.polling_districts)
                    .with_context(|| format!("[Scorer.score] constituency '{}' cannot be scored", constituency.name))?;
                nodes.sort_unstable();
                nodes.dedup();
                let electors = nodes.iter().map(|&n| self.map.electors_at(n)).sum();
                Ok(Members { constituency, nodes, electors })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut owners = vec![None; self.map.len()];
        for (i, member) in members.iter().enumerate() {
            for &node in &member.nodes { owners[node] = Some(i as u32) }
        }

        let total_electors = members.iter().map(|m| m.electors).sum::<u64>() as f64;
        let total_seats = assignment.total_member_size() as f64;
        let average = if total_seats > 0.0 { total_electors / total_seats } else { 0.0 };

        let annotate = |member: &Members| self.annotate(member, &owners, average);
        let annotations: Vec<_> = if self.parallel {
            members.par_iter().map(annotate).collect()
        } else {
            members.iter().map(annotate).collect()
        };

        let report = ScoreReport::new(annotations);
        trace!(label = %assignment.label, overall = report.overall_score, "scored assignment");
        Ok(report)
    }

    /// Overall score only.
    pub fn overall_score(&self, assignment: &Assignment) -> Result<f64> {
        Ok(self.score(assignment)?.overall_score)
    }

    fn annotate(&self, member: &Members, owners: &[Option<u32>], average: f64) -> ConstituencyScore {
        let Members { constituency, nodes, electors } = member;
        let graph = self.map.graph();

        let shape = self.cache.shapes.get_or_insert_with(set_key(nodes), || self.shape_metrics(&constituency.name, nodes));
        let relevance = self.cache.relevance.get_or_insert_with(
            (constituency.name.clone(), set_key(nodes)),
            || self.map.relevance_of(&constituency.name, nodes),
        );

        let elector_balance = match constituency.member_size {
            0 => 0.0,
            seats => geometric_score(*electors as f64 / seats as f64, average),
        };

        let mut score = ConstituencyScore {
            constituency_name: constituency.name.clone(),
            member_size: constituency.member_size,
            elector_size: *electors,
            nonenclavity: graph.nonenclavity(nodes, owners),
            compactness: shape.compactness,
            convexity: shape.convexity,
            relevance,
            elector_balance,
            constituency_score: 0.0,
            is_enclave: graph.is_enclave(nodes, owners),
        };
        score.constituency_score = score.combined();
        score
    }

    /// Union the district shapes and measure them, downgrading failures to
    /// undefined metrics.
    fn shape_metrics(&self, name: &str, nodes: &[usize]) -> ShapeMetrics {
        let measure = |metric: &str, result: Result<f64, GeometryError>| match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(constituency = name, metric, %err, "geometry metric undefined");
                None
            }
        };

        match self.map.geoms().union_of(nodes) {
            Ok(Some(shape)) => ShapeMetrics {
                compactness: measure("compactness", compactness(&shape)),
                convexity: measure("convexity", convexity(&shape)),
            },
            Ok(None) => ShapeMetrics {
                compactness: measure("compactness", Err(GeometryError::Empty)),
                convexity: measure("convexity", Err(GeometryError::Empty)),
            },
            Err(err) => {
                warn!(constituency = name, %err, "failed to union constituency geometry");
                ShapeMetrics { compactness: None, convexity: None }
            }
        }
    }
}
