use std::collections::HashMap;

/// Partition of station and place names into groups of equivalent names.
///
/// Lookup is symmetric: two names are aliases if some group contains both.
/// A name always matches itself, grouped or not.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    groups: Vec<Vec<String>>,
    index: HashMap<String, Vec<usize>>, // Groups each name appears in.
}

impl AliasTable {
    /// Build an alias table from a list of name groups.
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (g, group) in groups.iter().enumerate() {
            for name in group {
                let entry = index.entry(name.clone()).or_default();
                if !entry.contains(&g) { entry.push(g) }
            }
        }

        Self { groups, index }
    }

    /// Number of alias groups.
    #[inline] pub fn len(&self) -> usize { self.groups.len() }

    /// Check if there are no alias groups.
    #[inline] pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    /// Check whether two names refer to the same place.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        if a == b { return true }

        match (self.index.get(a), self.index.get(b)) {
            (Some(ga), Some(gb)) => ga.iter().any(|g| gb.contains(g)),
            _ => false,
        }
    }
}
