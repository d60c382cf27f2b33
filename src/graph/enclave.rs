use ahash::AHashMap;

use crate::graph::Graph;

/// Share of boundary contact below which a constituency is fully acceptable.
const ALLOWED_ENCLAVITY: f64 = 0.5;

impl Graph {
    /// Measure how far a set of nodes avoids being dominated by a single neighbor.
    ///
    /// `owners[v]` is the constituency holding node `v` (or `None` if unassigned).
    /// Every node in the set with a neighbor outside the set spreads one unit of
    /// weight evenly across the distinct outside constituencies it touches. The
    /// largest accumulated weight, as a fraction of the number of such boundary
    /// nodes, is the enclavity; anything below one half scores 1, and the score
    /// falls linearly to 0 as a single neighbor takes over the whole boundary.
    /// A set with no boundary nodes scores 0.
    pub(crate) fn nonenclavity(&self, nodes: &[usize], owners: &[Option<u32>]) -> f64 {
        debug_assert!(owners.len() == self.node_count(), "owners must cover every node");

        let in_set = self.mask(nodes);
        let mut shares: AHashMap<u32, f64> = AHashMap::new();
        let mut boundary = 0usize;

        for &u in nodes {
            let mut outside = self.edges(u).filter(|&v| !in_set[v]).peekable();
            if outside.peek().is_none() { continue }
            boundary += 1;

            let mut touched = outside.filter_map(|v| owners[v]).collect::<Vec<_>>();
            touched.sort_unstable();
            touched.dedup();

            let weight = 1.0 / touched.len() as f64;
            for part in touched {
                *shares.entry(part).or_insert(0.0) += weight;
            }
        }

        if boundary == 0 { return 0.0 }

        let max_share = shares.values().copied().fold(0.0, f64::max);
        let enclavity = max_share / boundary as f64;
        if enclavity < ALLOWED_ENCLAVITY { return 1.0 }

        1.0 - (enclavity - ALLOWED_ENCLAVITY) / ALLOWED_ENCLAVITY
    }

    /// Check if every node outside the set that touches it belongs to one single
    /// other constituency. A set with no outside neighbors is not an enclave.
    pub(crate) fn is_enclave(&self, nodes: &[usize], owners: &[Option<u32>]) -> bool {
        let in_set = self.mask(nodes);
        let mut surrounding = nodes.iter()
            .flat_map(|&u| self.edges(u))
            .filter(|&v| !in_set[v])
            .map(|v| owners[v]);

        match surrounding.next() {
            Some(Some(first)) => surrounding.all(|owner| owner == Some(first)),
            _ => false,
        }
    }
}
