use std::{path::Path, sync::Arc};

use anyhow::{ensure, Result};

use crate::{
    map::DistrictMap,
    objective::{ScoreReport, Scorer},
    plan::{Assignment, SeatAllocation, ValidationReport, Validator},
    search::{LocalSearch, PlanSink, SearchConfig, SearchOutcome},
};

/// An assignment of constituencies over a shared district map.
#[derive(Clone, Debug)]
pub struct Plan {
    map: Arc<DistrictMap>,
    assignment: Assignment,
}

impl Plan {
    /// Pair an assignment with the map it is drawn on.
    pub fn new(map: impl Into<Arc<DistrictMap>>, assignment: Assignment) -> Self {
        Self { map: map.into(), assignment }
    }

    /// Load an assignment record from a JSON file.
    pub fn read_from_json(map: impl Into<Arc<DistrictMap>>, path: &Path) -> Result<Self> {
        Ok(Self::new(map, Assignment::read_from_json(path)?))
    }

    /// Write the assignment record to a JSON file.
    #[inline] pub fn write_to_json(&self, path: &Path) -> Result<()> { self.assignment.write_to_json(path) }

    /// Get a reference to the map.
    #[inline] pub fn map(&self) -> &DistrictMap { &self.map }

    /// Get a reference to the assignment.
    #[inline] pub fn assignment(&self) -> &Assignment { &self.assignment }

    /// Take the assignment out of the plan.
    #[inline] pub fn into_assignment(self) -> Assignment { self.assignment }

    /// Get the human-readable label of the assignment.
    #[inline] pub fn label(&self) -> &str { &self.assignment.label }

    /// Check the assignment against every hard constraint.
    pub fn validate(&self, seats: &SeatAllocation) -> ValidationReport {
        Validator::new(Arc::clone(&self.map), seats.clone()).validate(&self.assignment)
    }

    /// Score the assignment with a fresh scorer.
    pub fn score(&self) -> Result<ScoreReport> {
        Scorer::new(Arc::clone(&self.map)).score(&self.assignment)
    }

    /// Score the assignment with a scorer built on the same map, reusing its cache.
    pub fn score_with(&self, scorer: &Scorer) -> Result<ScoreReport> {
        ensure!(
            std::ptr::eq(scorer.map(), self.map()),
            "[Plan.score_with] scorer was built for a different district map"
        );
        scorer.score(&self.assignment)
    }

    /// Run local search on the assignment, persisting every improvement to `sink`.
    /// The plan holds the best assignment found when this returns.
    pub fn optimize(&mut self, seats: &SeatAllocation, config: &SearchConfig, sink: &mut dyn PlanSink) -> Result<SearchOutcome> {
        LocalSearch::new(Arc::clone(&self.map), seats.clone(), config.clone()).run(&mut self.assignment, sink)
    }
}
