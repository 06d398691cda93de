//! Weight overlay aligned with a graph's adjacency relation.

use agony_core::Graph;

/// Weight of an edge still treated as going up the hierarchy.
pub(crate) const FORWARD: i64 = -1;
/// Weight of an edge reversed by cycle cancellation.
pub(crate) const REVERSED: i64 = 1;

/// Square `{-1, 0, +1}` matrix over nodes `1..=N`, indexed by the original
/// orientation of each edge. Scoped to a single ranking computation.
#[derive(Debug, Clone)]
pub(crate) struct Overlay {
    nodes: usize,
    weights: Vec<i64>,
}

impl Overlay {
    /// Every present edge starts as `FORWARD`; absent entries are 0.
    pub(crate) fn forward_edges(graph: &Graph) -> Self {
        let nodes = graph.node_count();
        let mut weights = vec![0; nodes * nodes];
        for (u, v) in graph.edges() {
            weights[(u - 1) * nodes + (v - 1)] = FORWARD;
        }
        Self { nodes, weights }
    }

    pub(crate) fn weight(&self, u: usize, v: usize) -> i64 {
        self.weights[(u - 1) * self.nodes + (v - 1)]
    }

    pub(crate) fn is_forward(&self, u: usize, v: usize) -> bool {
        self.weight(u, v) == FORWARD
    }

    /// Flip the sign of the entry at `(u, v)`.
    pub(crate) fn flip(&mut self, u: usize, v: usize) {
        self.weights[(u - 1) * self.nodes + (v - 1)] *= -1;
    }

    /// Iterate over `(u, v, weight)` for every nonzero entry.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        let n = self.nodes;
        self.weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0)
            .map(move |(i, &w)| (i / n + 1, i % n + 1, w))
    }

    pub(crate) fn forward_count(&self) -> usize {
        self.weights.iter().filter(|&&w| w == FORWARD).count()
    }
}
