//! Testing utilities and helpers for agony-core.
//!
//! Fixtures here are shared by the ranking and optimizer crates so that the
//! numeric expectations for well-known graphs live in one place.

use crate::graph::Graph;

/// A directed path `1 -> 2 -> ... -> n`.
pub fn chain(n: usize) -> Graph {
    let edges: Vec<_> = (1..n).map(|u| (u, u + 1)).collect();
    graph(n, &edges)
}

/// A simple directed cycle `1 -> 2 -> ... -> n -> 1`.
pub fn cycle(n: usize) -> Graph {
    let mut edges: Vec<_> = (1..n).map(|u| (u, u + 1)).collect();
    edges.push((n, 1));
    graph(n, &edges)
}

/// Build a graph from edges, panicking on invalid input. Test-only convenience.
pub fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(n, edges).unwrap_or_else(|e| panic!("invalid fixture graph: {e}"))
}

/// Test fixture builder holding an ordered collection of named graphs.
pub struct GraphFixture {
    node_count: usize,
    graphs: Vec<(String, Graph)>,
}

impl GraphFixture {
    /// Create a new empty fixture over `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            graphs: Vec::new(),
        }
    }

    /// The two-graph fixture over three nodes: `a = {1->2, 2->3}` and
    /// `b = {2->1}`. Their union holds the 2-cycle `1 <-> 2` plus `2 -> 3`.
    pub fn union_pair() -> Self {
        let mut fixture = Self::new(3);
        fixture.add_graph("a", &[(1, 2), (2, 3)]);
        fixture.add_graph("b", &[(2, 1)]);
        fixture
    }

    /// Six acyclic graphs over four nodes drawn from two opposite hierarchies.
    ///
    /// Graphs `up_*` (indices 0, 2, 4) follow `1 < 2 < 3 < 4`, graphs `down_*`
    /// (indices 1, 3, 5) follow the reverse order. Interleaving them keeps
    /// graph ids and cluster membership out of step.
    pub fn two_hierarchies() -> Self {
        let mut fixture = Self::new(4);
        fixture.add_graph("up_chain", &[(1, 2), (2, 3), (3, 4)]);
        fixture.add_graph("down_chain", &[(4, 3), (3, 2), (2, 1)]);
        fixture.add_graph("up_skip", &[(1, 3), (2, 4)]);
        fixture.add_graph("down_skip", &[(4, 2), (3, 1)]);
        fixture.add_graph("up_star", &[(1, 2), (1, 3), (1, 4)]);
        fixture.add_graph("down_star", &[(4, 1), (4, 2), (4, 3)]);
        fixture
    }

    /// Add a named graph to the fixture.
    pub fn add_graph(&mut self, name: &str, edges: &[(usize, usize)]) -> &Graph {
        self.graphs
            .push((name.to_string(), graph(self.node_count, edges)));
        &self.graphs[self.graphs.len() - 1].1
    }

    /// Get a graph by name.
    pub fn get(&self, name: &str) -> Option<&Graph> {
        self.graphs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, g)| g)
    }

    /// All graphs in insertion order.
    pub fn graphs(&self) -> Vec<Graph> {
        self.graphs.iter().map(|(_, g)| g.clone()).collect()
    }

    /// Number of nodes shared by every graph in the fixture.
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of graphs in the fixture.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Whether the fixture holds no graphs.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

/// Assertion helpers for testing graphs.
pub struct GraphAssertions<'a> {
    graph: &'a Graph,
}

impl<'a> GraphAssertions<'a> {
    /// Create new assertions for a graph.
    pub const fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Assert that the graph has the expected number of edges.
    #[must_use]
    pub fn assert_edge_count(self, expected: usize) -> Self {
        assert_eq!(
            self.graph.edge_count(),
            expected,
            "Expected {} edges, found {}",
            expected,
            self.graph.edge_count()
        );
        self
    }

    /// Assert that the edge `u -> v` is present.
    #[must_use]
    pub fn assert_has_edge(self, u: usize, v: usize) -> Self {
        assert!(self.graph.has_edge(u, v), "Expected edge {u} -> {v}");
        self
    }

    /// Assert that the graph is acyclic.
    #[must_use]
    pub fn assert_acyclic(self) -> Self {
        assert!(self.graph.is_acyclic(), "Expected an acyclic graph");
        self
    }

    /// Assert that the graph is weakly connected.
    #[must_use]
    pub fn assert_connected(self) -> Self {
        assert!(self.graph.is_connected(), "Expected a connected graph");
        self
    }
}
