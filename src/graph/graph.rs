/// An undirected district adjacency graph in compressed sparse row format.
#[derive(Clone, Debug, Default)]
pub(crate) struct Graph {
    size: usize,
    offsets: Vec<u32>,
    edges: Vec<u32>,
}

impl Graph {
    /// Construct a graph from per-node adjacency lists.
    /// Neighbor lists are taken as given; symmetrizing is the caller's job.
    pub(crate) fn new(num_nodes: usize, edges: &[Vec<u32>]) -> Self {
        assert!(edges.len() == num_nodes, "edges.len() must equal num_nodes");
        edges.iter().enumerate().for_each(|(i, neighbors)| {
            assert!(neighbors.iter().all(|&v| (v as usize) < num_nodes), "edges[{i}] references a node out of range");
        });

        Self {
            size: num_nodes,
            offsets: std::iter::once(0u32).chain(
                edges.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: edges.iter().flatten().copied().collect(),
        }
    }

    /// Construct a symmetric graph from possibly one-sided adjacency lists.
    /// Self loops and repeated neighbors are dropped. Returns the graph and
    /// the number of reverse edges that had to be added.
    pub(crate) fn symmetric(num_nodes: usize, edges: &[Vec<u32>]) -> (Self, usize) {
        let mut lists = vec![Vec::new(); num_nodes];
        for (u, neighbors) in edges.iter().enumerate() {
            for &v in neighbors.iter().filter(|&&v| v as usize != u) {
                lists[u].push(v);
                lists[v as usize].push(u as u32);
            }
        }

        let declared = edges.iter().enumerate()
            .map(|(u, neighbors)| {
                let mut neighbors = neighbors.iter().copied().filter(|&v| v as usize != u).collect::<Vec<_>>();
                neighbors.sort_unstable();
                neighbors.dedup();
                neighbors.len()
            })
            .sum::<usize>();

        lists.iter_mut().for_each(|list| { list.sort_unstable(); list.dedup(); });
        let added = lists.iter().map(Vec::len).sum::<usize>() - declared;

        (Self::new(num_nodes, &lists), added)
    }

    /// Get the number of nodes in the graph.
    #[inline] pub(crate) fn node_count(&self) -> usize { self.size }

    /// Get the number of directed edge entries (twice the undirected count).
    #[inline] pub(crate) fn edge_count(&self) -> usize { self.edges.len() }

    /// Get the range of edges for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub(crate) fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub(crate) fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Check whether two nodes share an edge.
    #[inline]
    pub(crate) fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.edges(u).any(|w| w == v)
    }
}
