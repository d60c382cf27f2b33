use std::{path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::common::read_json;

/// How an improving trial is chosen within a pass over a constituency pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    /// Evaluate every trial of the pass and commit the best one.
    #[default]
    BestImprovement,
    /// Commit the first trial that improves on the current score.
    FirstImprovement,
}

/// Local search settings, loadable from a JSON file where every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Full sweeps over all constituency pairs.
    pub max_iterations: usize,
    /// Passes over a single pair before moving on.
    pub max_passes_per_pair: usize,
    pub acceptance: Acceptance,
    /// Stop once the overall score equals the worst elector balance.
    pub stop_at_balance_ceiling: bool,
    /// Wall-clock budget, checked between trials.
    pub time_limit_secs: Option<f64>,
    /// Label stamped on every persisted assignment.
    pub label: String,
    /// Evaluate trials and constituency metrics on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_passes_per_pair: 10,
            acceptance: Acceptance::BestImprovement,
            stop_at_balance_ceiling: true,
            time_limit_secs: None,
            label: "With local optimization".into(),
            parallel: true,
        }
    }
}

impl SearchConfig {
    /// Read a config from a JSON file and check it.
    pub fn read_from_json(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)
            .with_context(|| format!("[SearchConfig.read_from_json] Failed to load search config from {}", path.display()))?;
        config.check()?;
        Ok(config)
    }

    /// Reject settings the search cannot run with.
    pub fn check(&self) -> Result<()> {
        ensure!(self.max_passes_per_pair > 0, "[SearchConfig.check] max_passes_per_pair must be positive");
        if let Some(secs) = self.time_limit_secs {
            ensure!(
                Duration::try_from_secs_f64(secs).is_ok(),
                "[SearchConfig.check] time_limit_secs must be a non-negative number of seconds a duration can hold, got {secs}"
            );
        }
        Ok(())
    }

    /// Get the time limit as a duration, if any. Values no duration can hold
    /// are treated as no limit.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.label, "With local optimization");
        assert!(config.time_limit().is_none());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config: SearchConfig = serde_json::from_str(
            r#"{"acceptance": "first_improvement", "time_limit_secs": 1.5, "parallel": false}"#
        ).unwrap();
        assert_eq!(config.acceptance, Acceptance::FirstImprovement);
        assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
        assert!(!config.parallel);
        assert_eq!(config.max_passes_per_pair, 10);
    }

    #[test]
    fn check_rejects_bad_values() {
        let config = SearchConfig { max_passes_per_pair: 0, ..Default::default() };
        assert!(config.check().is_err());

        let config = SearchConfig { time_limit_secs: Some(-1.0), ..Default::default() };
        assert!(config.check().is_err());

        let config = SearchConfig { time_limit_secs: Some(f64::NAN), ..Default::default() };
        assert!(config.check().is_err());
    }

    #[test]
    fn oversized_time_limit_is_rejected_not_panicking() {
        let config: SearchConfig = serde_json::from_str(r#"{"time_limit_secs": 1e20}"#).unwrap();
        assert!(config.check().is_err());
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");
        std::fs::write(&path, r#"{"max_iterations": 3, "label": "trial"}"#).unwrap();

        let config = SearchConfig::read_from_json(&path).unwrap();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.label, "trial");
    }
}
