use std::{collections::{BTreeMap, HashMap, HashSet}, fmt, sync::Arc};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{map::DistrictMap, plan::Assignment};

/// Required multiset of constituency member sizes, as member size -> count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatAllocation(BTreeMap<u32, usize>);

impl Default for SeatAllocation {
    /// Ten 5-seat, eight 4-seat and fifteen 1-seat constituencies.
    fn default() -> Self { Self(BTreeMap::from([(5, 10), (4, 8), (1, 15)])) }
}

impl SeatAllocation {
    pub fn new(counts: BTreeMap<u32, usize>) -> Self {
        Self(counts.into_iter().filter(|&(_, count)| count > 0).collect())
    }

    /// Get the number of constituencies the allocation calls for.
    #[inline] pub fn num_constituencies(&self) -> usize { self.0.values().sum() }

    /// Get the total number of seats.
    pub fn total_seats(&self) -> u32 { self.0.iter().map(|(&size, &count)| size * count as u32).sum() }

    /// Get the allocation as a map from member size to count.
    #[inline] pub fn counts(&self) -> &BTreeMap<u32, usize> { &self.0 }

    /// Compare the allocation against the member sizes of an assignment,
    /// returning the (missing, extra) sizes, each sorted ascending with
    /// repeats.
    fn difference(&self, sizes: impl Iterator<Item = u32>) -> (Vec<u32>, Vec<u32>) {
        let mut actual: BTreeMap<u32, usize> = BTreeMap::new();
        for size in sizes { *actual.entry(size).or_default() += 1 }

        let surplus = |a: &BTreeMap<u32, usize>, b: &BTreeMap<u32, usize>| a.iter()
            .flat_map(|(&size, &count)| {
                let excess = count.saturating_sub(b.get(&size).copied().unwrap_or(0));
                std::iter::repeat_n(size, excess)
            })
            .collect::<Vec<_>>();

        (surplus(&self.0, &actual), surplus(&actual, &self.0))
    }
}

/// Every hard-constraint violation found in an assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub non_contiguous_constituencies: Vec<String>,
    pub duplicate_districts: BTreeMap<String, usize>,
    pub unassigned_districts: Vec<String>,
    pub unknown_districts: Vec<String>,
    pub missing_member_sizes: Vec<u32>,
    pub extra_member_sizes: Vec<u32>,
    pub duplicate_constituency_name_parts: BTreeMap<String, usize>,
}

impl ValidationReport {
    /// Check if no violation was recorded.
    pub fn is_valid(&self) -> bool {
        self.non_contiguous_constituencies.is_empty()
            && self.duplicate_districts.is_empty()
            && self.unassigned_districts.is_empty()
            && self.unknown_districts.is_empty()
            && self.missing_member_sizes.is_empty()
            && self.extra_member_sizes.is_empty()
            && self.duplicate_constituency_name_parts.is_empty()
    }

    /// Turn a failing report into an error listing every violation.
    pub fn ensure_valid(&self) -> Result<()> {
        if !self.is_valid() { bail!("invalid assignment:\n{self}") }
        Ok(())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() { return write!(f, "valid") }

        fn line<T: fmt::Debug>(f: &mut fmt::Formatter<'_>, label: &str, items: &[T]) -> fmt::Result {
            if items.is_empty() { return Ok(()) }
            writeln!(f, "  {label} ({}): {items:?}", items.len())
        }

        line(f, "non-contiguous constituencies", &self.non_contiguous_constituencies)?;
        line(f, "duplicate districts", &self.duplicate_districts.iter().collect::<Vec<_>>())?;
        line(f, "unassigned districts", &self.unassigned_districts)?;
        line(f, "unknown districts", &self.unknown_districts)?;
        line(f, "missing member sizes", &self.missing_member_sizes)?;
        line(f, "extra member sizes", &self.extra_member_sizes)?;
        line(f, "duplicate name parts", &self.duplicate_constituency_name_parts.iter().collect::<Vec<_>>())
    }
}

/// Checks assignments against the hard constraints of a district map and
/// seat allocation. Never mutates its input.
#[derive(Clone, Debug)]
pub struct Validator {
    map: Arc<DistrictMap>,
    seats: SeatAllocation,
}

impl Validator {
    pub fn new(map: impl Into<Arc<DistrictMap>>, seats: SeatAllocation) -> Self {
        Self { map: map.into(), seats }
    }

    #[inline] pub fn map(&self) -> &DistrictMap { &self.map }

    #[inline] pub fn seats(&self) -> &SeatAllocation { &self.seats }

    /// Collect every violation in the assignment.
    pub fn validate(&self, assignment: &Assignment) -> ValidationReport {
        let non_contiguous_constituencies = assignment.constituencies.iter()
            .filter(|c| !self.map.is_contiguous(&c.polling_districts))
            .inspect(|c| {
                if let Ok(nodes) = self.map.resolve(&c.polling_districts) {
                    debug!(constituency = %c.name, pieces = self.map.graph().components(&nodes).len(), "constituency is not contiguous");
                }
            })
            .map(|c| c.name.clone())
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for district in assignment.constituencies.iter().flat_map(|c| &c.polling_districts) {
            *counts.entry(district).or_default() += 1;
        }

        let duplicate_districts = counts.iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(&id, &count)| (id.to_string(), count))
            .collect();

        let unassigned_districts = self.map.ids().iter()
            .filter(|id| !counts.contains_key(id.as_str()))
            .cloned()
            .collect();

        let mut unknown_districts = counts.keys()
            .filter(|id| !self.map.contains(id))
            .map(|id| id.to_string())
            .collect::<Vec<_>>();
        unknown_districts.sort();

        let (missing_member_sizes, extra_member_sizes) =
            self.seats.difference(assignment.constituencies.iter().map(|c| c.member_size));

        // Raw hyphen split: a repeated part inside one name is a duplicate too.
        let mut parts: BTreeMap<String, usize> = BTreeMap::new();
        for part in assignment.constituencies.iter().flat_map(|c| c.name.split('-')) {
            *parts.entry(part.to_string()).or_default() += 1;
        }
        parts.retain(|_, count| *count > 1);

        ValidationReport {
            non_contiguous_constituencies,
            duplicate_districts,
            unassigned_districts,
            unknown_districts,
            missing_member_sizes,
            extra_member_sizes,
            duplicate_constituency_name_parts: parts,
        }
    }

    /// Short-circuiting equivalent of `validate(assignment).is_valid()`.
    pub fn is_valid(&self, assignment: &Assignment) -> bool {
        let mut seen = vec![false; self.map.len()];
        for district in assignment.constituencies.iter().flat_map(|c| &c.polling_districts) {
            match self.map.index_of(district) {
                Some(i) if !seen[i] => seen[i] = true,
                _ => return false,
            }
        }
        if seen.contains(&false) { return false }

        let (missing, extra) = self.seats.difference(assignment.constituencies.iter().map(|c| c.member_size));
        if !missing.is_empty() || !extra.is_empty() { return false }

        let mut parts = HashSet::new();
        if !assignment.constituencies.iter().flat_map(|c| c.name.split('-')).all(|part| parts.insert(part)) {
            return false
        }

        assignment.constituencies.iter().all(|c| self.map.is_contiguous(&c.polling_districts))
    }
}
