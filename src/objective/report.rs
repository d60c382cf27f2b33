use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{common::write_json, objective::Metric};

/// Metric annotation for a single constituency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyScore {
    pub constituency_name: String,
    pub member_size: u32,
    pub elector_size: u64,
    pub nonenclavity: f64,
    pub compactness: Option<f64>,
    pub convexity: Option<f64>,
    pub relevance: f64,
    pub elector_balance: f64,
    pub constituency_score: f64,
    pub is_enclave: bool,
}

impl ConstituencyScore {
    /// Get the value of a sub-metric, `None` if it could not be computed.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Nonenclavity => Some(self.nonenclavity),
            Metric::Compactness => self.compactness,
            Metric::Convexity => self.convexity,
            Metric::Relevance => Some(self.relevance),
            Metric::ElectorBalance => Some(self.elector_balance),
        }
    }

    /// Mean of the defined sub-metrics, capped by the elector balance.
    pub(crate) fn combined(&self) -> f64 {
        let defined = Metric::ALL.iter().filter_map(|&m| self.metric(m)).collect::<Vec<_>>();
        let mean = defined.iter().sum::<f64>() / defined.len() as f64;
        mean.min(self.elector_balance)
    }
}

/// Per-constituency annotations plus the assignment-level score.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub annotations: Vec<ConstituencyScore>,
    pub overall_score: f64,
}

impl ScoreReport {
    /// Assemble a report, deriving the overall score as the member-weighted
    /// mean of constituency scores capped by the worst elector balance.
    pub(crate) fn new(annotations: Vec<ConstituencyScore>) -> Self {
        let members = annotations.iter().map(|a| a.member_size as f64).sum::<f64>();
        if annotations.is_empty() || members == 0.0 {
            return Self { annotations, overall_score: 0.0 }
        }

        let weighted = annotations.iter()
            .map(|a| a.constituency_score * a.member_size as f64)
            .sum::<f64>() / members;

        let min_balance = annotations.iter().map(|a| a.elector_balance).fold(f64::INFINITY, f64::min);
        Self { overall_score: weighted.min(min_balance), annotations }
    }

    /// Get the smallest elector balance across constituencies (0 if none).
    pub fn min_elector_balance(&self) -> f64 {
        if self.annotations.is_empty() { return 0.0 }
        self.annotations.iter().map(|a| a.elector_balance).fold(f64::INFINITY, f64::min)
    }

    /// Write the report as JSON, creating parent directories.
    pub fn write_to_json(&self, path: &Path) -> Result<()> {
        write_json(self, path).with_context(|| format!("[ScoreReport.write_to_json] Failed to save score report to {}", path.display()))
    }

    /// Get the annotation for a constituency by name.
    pub fn annotation(&self, name: &str) -> Option<&ConstituencyScore> {
        self.annotations.iter().find(|a| a.constituency_name == name)
    }
}
