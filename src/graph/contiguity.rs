use std::collections::{HashMap, VecDeque};

use crate::graph::Graph;

/// Check if named districts are connected, following the adjacency listing as
/// given (neighbors outside the set are ignored). Empty input is not contiguous.
pub fn is_contiguous<S: AsRef<str>>(districts: &[S], adjacency: &HashMap<String, Vec<String>>) -> bool {
    let mut index: HashMap<&str, u32> = HashMap::new();
    for district in districts {
        let next = index.len() as u32;
        index.entry(district.as_ref()).or_insert(next);
    }

    let mut edges = vec![Vec::new(); index.len()];
    for (&district, &u) in &index {
        edges[u as usize] = adjacency.get(district).into_iter().flatten()
            .filter_map(|neighbor| index.get(neighbor.as_str()).copied())
            .collect();
    }

    let nodes = (0..index.len()).collect::<Vec<_>>();
    Graph::new(index.len(), &edges).is_contiguous(&nodes)
}

impl Graph {
    /// Build a membership mask over all nodes for the given subset.
    pub(crate) fn mask(&self, nodes: &[usize]) -> Vec<bool> {
        let mut mask = vec![false; self.node_count()];
        nodes.iter().for_each(|&u| {
            assert!(u < self.node_count(), "node {} out of range", u);
            mask[u] = true;
        });
        mask
    }

    /// Check if a set of nodes forms a single connected component, following only
    /// edges whose endpoints both lie in the set. The empty set is not contiguous.
    pub(crate) fn is_contiguous(&self, nodes: &[usize]) -> bool {
        let Some(&start) = nodes.first() else { return false };

        let in_set = self.mask(nodes);
        let mut visited = vec![false; self.node_count()];
        visited[start] = true;

        let mut seen = 1;
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            for v in self.edges(u) {
                if in_set[v] && !visited[v] {
                    visited[v] = true;
                    seen += 1;
                    queue.push_back(v);
                }
            }
        }

        // Repeated nodes in the input count once.
        seen == in_set.iter().filter(|&&b| b).count()
    }

    /// Find all connected components (as node lists) inside a set of nodes.
    pub(crate) fn components(&self, nodes: &[usize]) -> Vec<Vec<usize>> {
        let in_set = self.mask(nodes);
        let mut visited = vec![false; self.node_count()];
        let mut components = Vec::new();

        for &u in nodes {
            if visited[u] { continue }
            visited[u] = true;

            let mut component = Vec::new();
            let mut queue = VecDeque::from([u]);
            while let Some(v) = queue.pop_front() {
                component.push(v);
                for w in self.edges(v) {
                    if in_set[w] && !visited[w] {
                        visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Nodes of `nodes` that have at least one neighbor inside `other`.
    pub(crate) fn frontier(&self, nodes: &[usize], other: &[usize]) -> Vec<usize> {
        let in_other = self.mask(other);
        nodes.iter().copied()
            .filter(|&u| self.edges(u).any(|v| in_other[v]))
            .collect()
    }
}
