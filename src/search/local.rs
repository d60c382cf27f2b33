use std::{collections::HashSet, fmt, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::{
    map::DistrictMap,
    objective::{ScoreReport, Scorer},
    plan::{Assignment, SeatAllocation, Validator},
    search::{Acceptance, PlanSink, SearchConfig, trial::Trial},
};

/// Threshold for treating score differences as improvements (handles floating point precision).
const EPSILON: f64 = 1e-10;

/// Why the search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A full sweep over every constituency pair committed nothing.
    Converged,
    /// `max_iterations` sweeps ran.
    IterationLimit,
    /// The overall score reached the worst elector balance.
    BalanceCeiling,
    /// The wall-clock budget ran out.
    TimeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::Converged => "converged",
            StopReason::IterationLimit => "iteration limit",
            StopReason::BalanceCeiling => "balance ceiling",
            StopReason::TimeLimit => "time limit",
        })
    }
}

/// Summary of a finished search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub initial_score: f64,
    pub final_score: f64,
    pub commits: usize,
    pub iterations: usize,
    pub stop_reason: StopReason,
}

/// Result of evaluating one trial.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Evaluation {
    /// The mutated assignment breaks a hard constraint.
    Rejected,
    Scored(f64),
    /// The deadline passed before the trial was looked at.
    Expired,
}

struct SearchState {
    report: ScoreReport,                   // Score of the committed assignment.
    commits: usize,
    tried: HashSet<(String, String)>,     // Unordered swap pairs evaluated since the last commit.
    deadline: Option<Instant>,
}

impl SearchState {
    #[inline] fn score(&self) -> f64 { self.report.overall_score }

    #[inline] fn expired(&self) -> bool { self.deadline.is_some_and(|deadline| Instant::now() >= deadline) }
}

/// Greedy move/swap search over pairs of neighboring constituencies.
///
/// Every trial is applied to a copy of the working assignment, validated
/// against the full set of hard constraints and scored; only strictly
/// improving valid copies replace the working assignment, and each one is
/// handed to the sink.
#[derive(Debug)]
pub struct LocalSearch {
    scorer: Scorer,
    validator: Validator,
    config: SearchConfig,
}

impl LocalSearch {
    pub fn new(map: impl Into<Arc<DistrictMap>>, seats: SeatAllocation, config: SearchConfig) -> Self {
        let map: Arc<DistrictMap> = map.into();
        let scorer = Scorer::new(Arc::clone(&map)).with_parallel(config.parallel);
        let validator = Validator::new(map, seats);
        Self { scorer, validator, config }
    }

    /// Build a search that shares an existing scorer's map.
    pub fn with_scorer(scorer: Scorer, seats: SeatAllocation, config: SearchConfig) -> Self {
        let validator = Validator::new(scorer.map_handle(), seats);
        Self { scorer: scorer.with_parallel(config.parallel), validator, config }
    }

    #[inline] pub fn scorer(&self) -> &Scorer { &self.scorer }

    #[inline] pub fn validator(&self) -> &Validator { &self.validator }

    #[inline] pub fn config(&self) -> &SearchConfig { &self.config }

    /// Improve `assignment` in place, persisting every commit to `sink`.
    ///
    /// Fails if the starting assignment violates a hard constraint, or if the
    /// sink cannot persist a commit.
    pub fn run(&self, assignment: &mut Assignment, sink: &mut dyn PlanSink) -> Result<SearchOutcome> {
        self.config.check()?;
        self.validator.validate(assignment).ensure_valid()
            .context("[LocalSearch.run] refusing to optimize an invalid baseline")?;

        let report = self.scorer.score(assignment)?;
        let initial_score = report.overall_score;
        let mut state = SearchState {
            report,
            commits: 0,
            tried: HashSet::new(),
            deadline: self.config.time_limit().and_then(|limit| Instant::now().checked_add(limit)),
        };

        info!(
            score = initial_score,
            min_balance = state.report.min_elector_balance(),
            constituencies = assignment.len(),
            acceptance = ?self.config.acceptance,
            "starting local search"
        );

        let mut iterations = 0;
        let stop_reason = 'search: {
            for iteration in 0..self.config.max_iterations {
                if self.at_ceiling(&state.report) { break 'search StopReason::BalanceCeiling }
                iterations = iteration + 1;

                let commits_before = state.commits;
                for (i, j) in pair_order(&state.report) {
                    if let Some(reason) = self.optimize_pair(assignment, i, j, &mut state, sink)? {
                        break 'search reason;
                    }
                }

                debug!(iteration, score = state.score(), commits = state.commits - commits_before, "finished sweep");
                if state.commits == commits_before { break 'search StopReason::Converged }
            }
            StopReason::IterationLimit
        };

        let outcome = SearchOutcome {
            initial_score,
            final_score: state.score(),
            commits: state.commits,
            iterations,
            stop_reason,
        };
        info!(
            initial = outcome.initial_score,
            final_score = outcome.final_score,
            commits = outcome.commits,
            iterations = outcome.iterations,
            reason = %outcome.stop_reason,
            "local search finished"
        );

        Ok(outcome)
    }

    /// Check the early-termination rule: no headroom left above the worst elector balance.
    fn at_ceiling(&self, report: &ScoreReport) -> bool {
        self.config.stop_at_balance_ceiling
            && !report.annotations.is_empty()
            && (report.min_elector_balance() - report.overall_score).abs() <= EPSILON
    }

    /// Repeated passes over one ordered pair of constituencies until a pass
    /// commits nothing or the pass budget runs out.
    fn optimize_pair(
        &self,
        assignment: &mut Assignment,
        i: usize,
        j: usize,
        state: &mut SearchState,
        sink: &mut dyn PlanSink,
    ) -> Result<Option<StopReason>> {
        for pass in 0..self.config.max_passes_per_pair {
            let trials = self.trials(assignment, i, j, &state.tried);
            if trials.is_empty() { break }
            trace!(pass, i, j, trials = trials.len(), "evaluating pair");

            let (chosen, expired) = match self.config.acceptance {
                Acceptance::BestImprovement => self.best_improvement(assignment, &trials, state),
                Acceptance::FirstImprovement => self.first_improvement(assignment, &trials, state),
            };

            // A pass cut short by the deadline commits nothing.
            if expired { return Ok(Some(StopReason::TimeLimit)) }
            let Some((trial, score)) = chosen else { break };

            self.commit(assignment, trial, score, state, sink)?;
            if self.at_ceiling(&state.report) { return Ok(Some(StopReason::BalanceCeiling)) }
        }

        Ok(None)
    }

    /// Candidate trials for a pass over (i, j): every frontier district of `i`
    /// moved to `j`, then every untried swap of frontier districts, both in
    /// lexicographic order of district ids.
    fn trials(&self, assignment: &Assignment, i: usize, j: usize, tried: &HashSet<(String, String)>) -> Vec<Trial> {
        let map = self.scorer.map();
        let nodes = |k: usize| -> Vec<usize> {
            let mut nodes = assignment.constituencies[k].polling_districts.iter()
                .filter_map(|id| map.index_of(id))
                .collect::<Vec<_>>();
            nodes.sort_unstable();
            nodes.dedup();
            nodes
        };
        let (nodes_i, nodes_j) = (nodes(i), nodes(j));

        // District indices follow id order, so sorted indices are sorted ids.
        let frontier_i = map.graph().frontier(&nodes_i, &nodes_j);
        let frontier_j = map.graph().frontier(&nodes_j, &nodes_i);

        let moves = frontier_i.iter()
            .map(|&a| Trial::Move { district: map.id(a).to_string(), from: i, to: j });

        let swaps = frontier_i.iter()
            .flat_map(|&a| frontier_j.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| !tried.contains(&swap_key(map.id(a), map.id(b))))
            .map(|(a, b)| Trial::Swap { a: map.id(a).to_string(), i, b: map.id(b).to_string(), j });

        moves.chain(swaps).collect()
    }

    /// Validate and score one trial.
    fn evaluate(&self, assignment: &Assignment, trial: &Trial, state: &SearchState) -> Evaluation {
        if state.expired() { return Evaluation::Expired }

        let candidate = trial.apply(assignment);
        if !self.validator.is_valid(&candidate) { return Evaluation::Rejected }

        match self.scorer.overall_score(&candidate) {
            Ok(score) => Evaluation::Scored(score),
            Err(err) => {
                warn!(%trial, error = %err, "failed to score trial");
                Evaluation::Rejected
            }
        }
    }

    /// Evaluate every trial and pick the highest-scoring improvement.
    fn best_improvement<'t>(&self, assignment: &Assignment, trials: &'t [Trial], state: &mut SearchState) -> (Option<(&'t Trial, f64)>, bool) {
        let current: &SearchState = state;
        let evaluations = if self.config.parallel {
            trials.par_iter().map(|trial| self.evaluate(assignment, trial, current)).collect::<Vec<_>>()
        } else {
            trials.iter().map(|trial| self.evaluate(assignment, trial, current)).collect::<Vec<_>>()
        };

        pick_best(trials, evaluations, state)
    }

    /// Evaluate trials in order and stop at the first improvement.
    fn first_improvement<'t>(&self, assignment: &Assignment, trials: &'t [Trial], state: &mut SearchState) -> (Option<(&'t Trial, f64)>, bool) {
        for trial in trials {
            match self.evaluate(assignment, trial, state) {
                Evaluation::Expired => return (None, true),
                Evaluation::Rejected => mark_tried(trial, &mut state.tried),
                Evaluation::Scored(score) => {
                    mark_tried(trial, &mut state.tried);
                    if score > state.score() + EPSILON { return (Some((trial, score)), false) }
                }
            }
        }
        (None, false)
    }

    /// Replace the working assignment with the trial's result and persist it.
    fn commit(&self, assignment: &mut Assignment, trial: &Trial, score: f64, state: &mut SearchState, sink: &mut dyn PlanSink) -> Result<()> {
        let mut next = trial.apply(assignment);
        next.label = self.config.label.clone();

        let report = self.scorer.score(&next)?;
        debug_assert!((report.overall_score - score).abs() <= EPSILON, "rescoring a committed trial must be stable");

        let (from, to) = match trial {
            Trial::Move { from, to, .. } => (*from, *to),
            Trial::Swap { i, j, .. } => (*i, *j),
        };
        info!(
            score = report.overall_score,
            previous = state.score(),
            kind = trial.kind(),
            from = %next.constituencies[from].name,
            to = %next.constituencies[to].name,
            %trial,
            "committed improvement"
        );

        sink.persist(&next).context("[LocalSearch.commit] failed to persist improved assignment")?;

        *assignment = next;
        state.report = report;
        state.commits += 1;
        state.tried.clear();
        Ok(())
    }
}

/// Pick the highest-scoring improvement among evaluated trials; ties go to
/// the earliest trial. If any trial expired, nothing is picked, so the
/// outcome never depends on how far evaluation got before the deadline.
fn pick_best<'t>(trials: &'t [Trial], evaluations: Vec<Evaluation>, state: &mut SearchState) -> (Option<(&'t Trial, f64)>, bool) {
    let mut best: Option<(&Trial, f64)> = None;
    let mut expired = false;
    for (trial, evaluation) in trials.iter().zip(evaluations) {
        match evaluation {
            Evaluation::Expired => { expired = true; continue }
            Evaluation::Rejected => {}
            Evaluation::Scored(score) => {
                let threshold = best.map_or(state.score(), |(_, best)| best);
                if score > threshold + EPSILON { best = Some((trial, score)) }
            }
        }
        mark_tried(trial, &mut state.tried);
    }

    if expired { return (None, true) }
    (best, false)
}

/// Ordered pairs of distinct constituencies, worst elector balance first.
fn pair_order(report: &ScoreReport) -> Vec<(usize, usize)> {
    let mut order = (0..report.annotations.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| report.annotations[a].elector_balance.total_cmp(&report.annotations[b].elector_balance));

    order.iter()
        .flat_map(|&i| order.iter().filter(move |&&j| j != i).map(move |&j| (i, j)))
        .collect()
}

/// Key identifying a swap regardless of direction.
fn swap_key(a: &str, b: &str) -> (String, String) {
    if a <= b { (a.to_string(), b.to_string()) } else { (b.to_string(), a.to_string()) }
}

fn mark_tried(trial: &Trial, tried: &mut HashSet<(String, String)>) {
    if let Trial::Swap { a, b, .. } = trial {
        tried.insert(swap_key(a, b));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{map::{tests::grid_map, AliasTable}, plan::Constituency, search::MemorySink};

    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> { ids.iter().map(|s| s.to_string()).collect() }

    /// Row of four unit squares with 7500, 2500, 2500, 2500 electors.
    fn row_map() -> DistrictMap {
        grid_map(4, 1, |c, _| if c == 0 { 7500 } else { 2500 }, |_, _| vec![], AliasTable::default())
    }

    fn lopsided() -> Assignment {
        Assignment::new("baseline", vec![
            Constituency::new("A", 1, ids(&["r0c0", "r0c1"])),
            Constituency::new("B", 1, ids(&["r0c2", "r0c3"])),
        ])
    }

    fn two_seats() -> SeatAllocation { SeatAllocation::new(BTreeMap::from([(1, 2)])) }

    fn config(acceptance: Acceptance) -> SearchConfig {
        SearchConfig { acceptance, stop_at_balance_ceiling: false, ..SearchConfig::default() }
    }

    #[test]
    fn moving_the_shared_district_balances_electors() {
        let search = LocalSearch::new(row_map(), two_seats(), config(Acceptance::BestImprovement));
        let mut assignment = lopsided();
        let mut sink = MemorySink::new();

        let outcome = search.run(&mut assignment, &mut sink).unwrap();

        assert_eq!(outcome.commits, 1);
        assert_eq!(outcome.stop_reason, StopReason::Converged);
        assert!(outcome.final_score > outcome.initial_score);
        assert_eq!(assignment.constituencies[0].polling_districts, vec!["r0c0"]);
        assert_eq!(assignment.constituencies[1].polling_districts, vec!["r0c2", "r0c3", "r0c1"]);
        assert_eq!(assignment.label, "With local optimization");

        let report = search.scorer().score(&assignment).unwrap();
        assert!(report.annotations.iter().all(|a| a.elector_balance == 1.0));
        assert_eq!(sink.last(), Some(&assignment));
    }

    #[test]
    fn first_improvement_reaches_the_same_plan() {
        let search = LocalSearch::new(row_map(), two_seats(), config(Acceptance::FirstImprovement));
        let mut assignment = lopsided();
        let outcome = search.run(&mut assignment, &mut MemorySink::new()).unwrap();

        assert_eq!(outcome.commits, 1);
        assert_eq!(assignment.constituencies[0].polling_districts, vec!["r0c0"]);
    }

    #[test]
    fn every_commit_is_valid_and_strictly_better() {
        let map = grid_map(3, 3, |c, r| 100 + 50 * (c as u64) + 10 * (r as u64), |_, _| vec![], AliasTable::default());
        let assignment = Assignment::new("baseline", vec![
            Constituency::new("Left", 1, ids(&["r0c0", "r1c0", "r2c0", "r0c1"])),
            Constituency::new("Middle", 1, ids(&["r1c1", "r2c1"])),
            Constituency::new("Right", 1, ids(&["r0c2", "r1c2", "r2c2"])),
        ]);
        let search = LocalSearch::new(map, SeatAllocation::new(BTreeMap::from([(1, 3)])), config(Acceptance::BestImprovement));
        let mut working = assignment.clone();
        let mut sink = MemorySink::new();

        let outcome = search.run(&mut working, &mut sink).unwrap();

        let mut previous = search.scorer().overall_score(&assignment).unwrap();
        for committed in &sink.committed {
            assert!(search.validator().validate(committed).is_valid());
            let score = search.scorer().overall_score(committed).unwrap();
            assert!(score > previous);
            previous = score;
        }
        assert_eq!(sink.committed.len(), outcome.commits);
        assert_eq!(outcome.final_score, previous);
    }

    #[test]
    fn balance_ceiling_stops_immediately() {
        // B holds 200 electors against an average of 50150, capping the overall score.
        let map = grid_map(4, 1, |c, _| if c == 0 { 100_000 } else { 100 }, |_, _| vec![], AliasTable::default());
        let config = SearchConfig { stop_at_balance_ceiling: true, ..SearchConfig::default() };
        let search = LocalSearch::new(map, two_seats(), config);
        let mut assignment = lopsided();

        let outcome = search.run(&mut assignment, &mut MemorySink::new()).unwrap();

        assert_eq!(outcome.stop_reason, StopReason::BalanceCeiling);
        assert_eq!(outcome.commits, 0);
        assert_eq!(assignment, lopsided());
    }

    #[test]
    fn expired_deadline_stops_without_commits() {
        let config = SearchConfig { time_limit_secs: Some(0.0), ..config(Acceptance::BestImprovement) };
        let search = LocalSearch::new(row_map(), two_seats(), config);
        let mut assignment = lopsided();

        let outcome = search.run(&mut assignment, &mut MemorySink::new()).unwrap();

        assert_eq!(outcome.stop_reason, StopReason::TimeLimit);
        assert_eq!(outcome.commits, 0);
    }

    #[test]
    fn zero_iterations_hits_the_iteration_limit() {
        let config = SearchConfig { max_iterations: 0, ..config(Acceptance::BestImprovement) };
        let search = LocalSearch::new(row_map(), two_seats(), config);

        let outcome = search.run(&mut lopsided(), &mut MemorySink::new()).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::IterationLimit);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn invalid_baseline_is_fatal() {
        let search = LocalSearch::new(row_map(), two_seats(), config(Acceptance::BestImprovement));
        let mut assignment = lopsided();
        assignment.constituencies[1].polling_districts.pop();

        assert!(search.run(&mut assignment, &mut MemorySink::new()).is_err());
    }

    #[test]
    fn pairs_start_from_the_worst_balance() {
        let scorer = Scorer::new(row_map());
        let report = scorer.score(&lopsided()).unwrap();
        // A holds 10000 electors against an average of 7500; B holds 5000.
        assert_eq!(pair_order(&report), vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn swap_keys_ignore_direction() {
        assert_eq!(swap_key("b", "a"), swap_key("a", "b"));
    }

    fn sorted(mut ids: Vec<String>) -> Vec<String> { ids.sort(); ids }

    #[test]
    fn swap_is_committed_when_no_move_helps() {
        // 3x2 grid, 100 electors each. Stations name the west L-shape
        // {r0c0, r1c0, r1c1}; every move unbalances the seats.
        let map = grid_map(3, 2, |_, _| 100, |c, r| {
            vec![if c == 0 || (c == 1 && r == 1) { "West".into() } else { "East".into() }]
        }, AliasTable::default());
        let mut assignment = Assignment::new("baseline", vec![
            Constituency::new("West", 1, ids(&["r0c0", "r0c1", "r1c0"])),
            Constituency::new("East", 1, ids(&["r0c2", "r1c1", "r1c2"])),
        ]);
        let search = LocalSearch::new(map, two_seats(), config(Acceptance::BestImprovement));
        let mut sink = MemorySink::new();

        let outcome = search.run(&mut assignment, &mut sink).unwrap();

        assert_eq!(outcome.commits, 1);
        assert!(outcome.final_score > outcome.initial_score);
        assert_eq!(sorted(assignment.constituencies[0].polling_districts.clone()), ids(&["r0c0", "r1c0", "r1c1"]));
        assert_eq!(sorted(assignment.constituencies[1].polling_districts.clone()), ids(&["r0c1", "r0c2", "r1c2"]));

        let report = search.scorer().score(&assignment).unwrap();
        assert!(report.annotations.iter().all(|a| a.relevance == 1.0 && a.elector_balance == 1.0));
    }

    /// Row of six 100-elector districts: A holds five, B one, so balancing
    /// takes two moves across the same pair.
    fn two_move_setup(max_passes_per_pair: usize) -> (LocalSearch, Assignment) {
        let map = grid_map(6, 1, |_, _| 100, |_, _| vec![], AliasTable::default());
        let assignment = Assignment::new("baseline", vec![
            Constituency::new("A", 1, ids(&["r0c0", "r0c1", "r0c2", "r0c3", "r0c4"])),
            Constituency::new("B", 1, ids(&["r0c5"])),
        ]);
        let config = SearchConfig { max_iterations: 1, max_passes_per_pair, ..config(Acceptance::BestImprovement) };
        (LocalSearch::new(map, two_seats(), config), assignment)
    }

    #[test]
    fn passes_per_pair_are_capped() {
        let (search, mut assignment) = two_move_setup(1);
        let outcome = search.run(&mut assignment, &mut MemorySink::new()).unwrap();

        assert_eq!(outcome.commits, 1);
        assert_eq!(outcome.stop_reason, StopReason::IterationLimit);
        assert_eq!(assignment.constituencies[0].polling_districts, ids(&["r0c0", "r0c1", "r0c2", "r0c3"]));

        let (search, mut assignment) = two_move_setup(10);
        let outcome = search.run(&mut assignment, &mut MemorySink::new()).unwrap();

        assert_eq!(outcome.commits, 2);
        assert_eq!(assignment.constituencies[0].polling_districts, ids(&["r0c0", "r0c1", "r0c2"]));
    }

    #[test]
    fn tried_swaps_are_skipped_in_both_directions_until_commit() {
        let search = LocalSearch::new(row_map(), two_seats(), config(Acceptance::BestImprovement));
        let mut working = lopsided();
        let mut tried = HashSet::new();

        let forward = search.trials(&working, 0, 1, &tried);
        assert_eq!(forward, vec![
            Trial::Move { district: "r0c1".into(), from: 0, to: 1 },
            Trial::Swap { a: "r0c1".into(), i: 0, b: "r0c2".into(), j: 1 },
        ]);

        mark_tried(&forward[1], &mut tried);
        assert_eq!(search.trials(&working, 1, 0, &tried), vec![
            Trial::Move { district: "r0c2".into(), from: 1, to: 0 },
        ]);

        let report = search.scorer().score(&working).unwrap();
        let mut state = SearchState { report, commits: 0, tried, deadline: None };
        let score = search.scorer().overall_score(&forward[0].apply(&working)).unwrap();
        let mut sink = MemorySink::new();

        search.commit(&mut working, &forward[0], score, &mut state, &mut sink).unwrap();

        assert!(state.tried.is_empty());
        assert_eq!(state.commits, 1);
        assert_eq!(state.score(), score);
        assert_eq!(sink.committed.len(), 1);
    }

    #[test]
    fn pass_cut_short_by_the_deadline_picks_nothing() {
        let trials = vec![
            Trial::Move { district: "a".into(), from: 0, to: 1 },
            Trial::Move { district: "b".into(), from: 0, to: 1 },
        ];
        let mut state = SearchState { report: ScoreReport::default(), commits: 0, tried: HashSet::new(), deadline: None };

        let (chosen, expired) = pick_best(&trials, vec![Evaluation::Scored(0.9), Evaluation::Expired], &mut state);
        assert!(expired);
        assert_eq!(chosen, None);

        let (chosen, expired) = pick_best(&trials, vec![Evaluation::Scored(0.5), Evaluation::Scored(0.5)], &mut state);
        assert!(!expired);
        assert_eq!(chosen, Some((&trials[0], 0.5)));
    }

    #[test]
    fn oversized_time_limit_is_an_error() {
        let oversized = SearchConfig { time_limit_secs: Some(1e20), ..config(Acceptance::BestImprovement) };
        let search = LocalSearch::new(row_map(), two_seats(), oversized);
        assert!(search.run(&mut lopsided(), &mut MemorySink::new()).is_err());

        let generous = SearchConfig { time_limit_secs: Some(1e9), ..config(Acceptance::BestImprovement) };
        let search = LocalSearch::new(row_map(), two_seats(), generous);
        let outcome = search.run(&mut lopsided(), &mut MemorySink::new()).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::Converged);
    }
}
