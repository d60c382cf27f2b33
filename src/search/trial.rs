use std::fmt;

use crate::plan::Assignment;

/// A tentative mutation of an assignment between two constituencies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Trial {
    /// Move `district` from constituency `from` to constituency `to`.
    Move { district: String, from: usize, to: usize },
    /// Exchange `a` (in constituency `i`) with `b` (in constituency `j`).
    Swap { a: String, i: usize, b: String, j: usize },
}

impl Trial {
    /// Build the mutated assignment, leaving the original untouched.
    pub(crate) fn apply(&self, assignment: &Assignment) -> Assignment {
        let mut candidate = assignment.clone();
        match self {
            Trial::Move { district, from, to } => candidate.move_district(district, *from, *to),
            Trial::Swap { a, i, b, j } => candidate.swap_districts(a, *i, b, *j),
        }
        candidate
    }

    /// Get a short name for the kind of mutation (for logging).
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Trial::Move { .. } => "move",
            Trial::Swap { .. } => "swap",
        }
    }
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trial::Move { district, from, to } => write!(f, "move {district} from #{from} to #{to}"),
            Trial::Swap { a, i, b, j } => write!(f, "swap {a} of #{i} with {b} of #{j}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::plan::Constituency;

    use super::*;

    fn sample() -> Assignment {
        Assignment::new("sample", vec![
            Constituency::new("A", 1, vec!["a1".into(), "a2".into()]),
            Constituency::new("B", 1, vec!["b1".into(), "b2".into()]),
        ])
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let original = sample();
        let trial = Trial::Move { district: "a2".into(), from: 0, to: 1 };
        let moved = trial.apply(&original);

        assert_eq!(original, sample());
        assert_eq!(moved.constituencies[1].polling_districts, vec!["b1", "b2", "a2"]);
    }

    #[test]
    fn swap_exchanges_across_constituencies() {
        let swapped = Trial::Swap { a: "a1".into(), i: 0, b: "b2".into(), j: 1 }.apply(&sample());
        assert_eq!(swapped.constituencies[0].polling_districts, vec!["a2", "b2"]);
        assert_eq!(swapped.constituencies[1].polling_districts, vec!["b1", "a1"]);
    }

    #[test]
    fn display_names_the_mutation() {
        let swap = Trial::Swap { a: "a1".into(), i: 0, b: "b2".into(), j: 1 };
        assert_eq!(swap.to_string(), "swap a1 of #0 with b2 of #1");
        assert_eq!(swap.kind(), "swap");
    }
}
