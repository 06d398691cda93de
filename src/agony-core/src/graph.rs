//! Dense directed graph over 1-indexed nodes.

use std::collections::VecDeque;
use std::fmt;

use common_error::{AgonyError, AgonyResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A directed graph over nodes `1..=N` stored as a dense adjacency relation.
///
/// The node count is fixed at construction. Self-loops are representable;
/// callers that need loop-free graphs must avoid adding them.
///
/// ## Example
///
/// ```rust
/// use agony_core::Graph;
///
/// let a = Graph::from_edges(3, &[(1, 2), (2, 3)]).unwrap();
/// let b = Graph::from_edges(3, &[(2, 1)]).unwrap();
/// let u = a.union(&b).unwrap();
///
/// assert_eq!(u.edge_count(), 3);
/// assert!(u.is_connected());
/// assert!(!u.is_acyclic());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    nodes: usize,
    /// Row-major `nodes * nodes` relation; entry `(u - 1) * nodes + (v - 1)`.
    edges: Vec<bool>,
}

impl Graph {
    /// Create an edgeless graph over `node_count` nodes.
    ///
    /// Zero nodes, or more nodes than a `node_count * node_count` relation can
    /// be allocated for, is an `InvalidNodeCount`.
    pub fn new(node_count: usize) -> AgonyResult<Self> {
        let cells = relation_len(node_count)?;
        let mut edges = Vec::new();
        edges
            .try_reserve_exact(cells)
            .map_err(|_| AgonyError::InvalidNodeCount(node_count))?;
        edges.resize(cells, false);
        Ok(Self {
            nodes: node_count,
            edges,
        })
    }

    /// Create a graph from a slice of `(from, to)` pairs.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> AgonyResult<Self> {
        let mut graph = Self::new(node_count)?;
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Parse a whitespace-separated list of `i,j` pairs.
    ///
    /// Blank input produces an edgeless graph. Malformed tokens are reported
    /// as a `ParseError` on line 1; callers parsing multi-line input rewrite
    /// the line number.
    pub fn from_edge_list(node_count: usize, text: &str) -> AgonyResult<Self> {
        let mut graph = Self::new(node_count)?;
        for token in text.split_whitespace() {
            let (u, v) = parse_pair(token).ok_or_else(|| {
                AgonyError::parse(1, format!("expected an `i,j` edge, found `{token}`"))
            })?;
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Number of directed edges currently present.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|&&present| present).count()
    }

    /// Whether the edge `u -> v` is present. Out-of-range nodes have no edges.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.index(u, v).is_some_and(|i| self.edges[i])
    }

    /// Add the edge `u -> v`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> AgonyResult<()> {
        let i = self.checked_index(u, v)?;
        self.edges[i] = true;
        Ok(())
    }

    /// Remove the edge `u -> v`.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> AgonyResult<()> {
        let i = self.checked_index(u, v)?;
        self.edges[i] = false;
        Ok(())
    }

    /// Iterate over present edges as `(from, to)` pairs in row-major order.
    pub fn edges(&self) -> Edges<'_> {
        Edges {
            graph: self,
            next: 0,
        }
    }

    /// Return a new graph whose relation is the union of both relations.
    pub fn union(&self, other: &Graph) -> AgonyResult<Graph> {
        if self.nodes != other.nodes {
            return Err(AgonyError::size_mismatch(self.nodes, other.nodes));
        }
        let edges = self
            .edges
            .iter()
            .zip(&other.edges)
            .map(|(&a, &b)| a || b)
            .collect();
        Ok(Graph {
            nodes: self.nodes,
            edges,
        })
    }

    /// Whether the undirected closure reaches every node from node 1.
    pub fn is_connected(&self) -> bool {
        let mut reached = vec![false; self.nodes + 1];
        let mut queue = VecDeque::from([1]);
        reached[1] = true;
        let mut count = 1;

        while let Some(u) = queue.pop_front() {
            for v in 1..=self.nodes {
                if v == u || reached[v] {
                    continue;
                }
                if self.has_edge(u, v) || self.has_edge(v, u) {
                    reached[v] = true;
                    count += 1;
                    queue.push_back(v);
                }
            }
        }

        count == self.nodes
    }

    /// Whether the graph contains no directed cycle (self-loops count).
    pub fn is_acyclic(&self) -> bool {
        let n = self.nodes;
        let mut visited = vec![false; n + 1];
        let mut on_stack = vec![false; n + 1];

        for root in 1..=n {
            if visited[root] {
                continue;
            }
            // (node, next successor to examine)
            let mut stack = vec![(root, 1)];
            visited[root] = true;
            on_stack[root] = true;

            while let Some(frame) = stack.last_mut() {
                let (u, next) = *frame;
                let Some(v) = (next..=n).find(|&v| self.has_edge(u, v)) else {
                    on_stack[u] = false;
                    stack.pop();
                    continue;
                };
                frame.1 = v + 1;
                if on_stack[v] {
                    return false;
                }
                if !visited[v] {
                    visited[v] = true;
                    on_stack[v] = true;
                    stack.push((v, 1));
                }
            }
        }

        true
    }

    /// Render the edges as whitespace-separated `i,j` pairs.
    pub fn to_edge_list(&self) -> String {
        self.edges()
            .map(|(u, v)| format!("{u},{v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Generate a weakly connected DAG.
    ///
    /// Random non-loop edges are added one at a time and kept only if the
    /// graph stays acyclic, until there are at least `node_count - 1` edges
    /// and the graph is connected.
    pub fn random_dag<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> AgonyResult<Self> {
        let mut graph = Self::new(node_count)?;
        if node_count == 1 {
            return Ok(graph);
        }

        let mut edge_count = 0;
        while edge_count < node_count - 1 || !graph.is_connected() {
            let u = rng.random_range(1..=node_count);
            let v = rng.random_range(1..=node_count);
            if u == v || graph.has_edge(u, v) {
                continue;
            }
            graph.add_edge(u, v)?;
            if graph.is_acyclic() {
                edge_count += 1;
            } else {
                graph.remove_edge(u, v)?;
            }
        }
        Ok(graph)
    }

    /// Generate an arbitrary directed graph with `node_count - 1` distinct
    /// non-loop edges. The result may be disconnected or cyclic.
    pub fn random<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> AgonyResult<Self> {
        let mut graph = Self::new(node_count)?;
        if node_count == 1 {
            return Ok(graph);
        }

        let mut edge_count = 0;
        while edge_count < node_count - 1 {
            let u = rng.random_range(1..=node_count);
            let v = rng.random_range(1..=node_count);
            if u != v && !graph.has_edge(u, v) {
                graph.add_edge(u, v)?;
                edge_count += 1;
            }
        }
        Ok(graph)
    }

    fn index(&self, u: usize, v: usize) -> Option<usize> {
        let in_range = |x: usize| (1..=self.nodes).contains(&x);
        (in_range(u) && in_range(v)).then(|| (u - 1) * self.nodes + (v - 1))
    }

    fn checked_index(&self, u: usize, v: usize) -> AgonyResult<usize> {
        self.index(u, v).ok_or_else(|| {
            let node = if (1..=self.nodes).contains(&u) { v } else { u };
            AgonyError::node_out_of_range(node, self.nodes)
        })
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_edge_list())
    }
}

/// Iterator over the present edges of a [`Graph`].
pub struct Edges<'a> {
    graph: &'a Graph,
    next: usize,
}

impl Iterator for Edges<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.graph.nodes;
        while self.next < self.graph.edges.len() {
            let i = self.next;
            self.next += 1;
            if self.graph.edges[i] {
                return Some((i / n + 1, i % n + 1));
            }
        }
        None
    }
}

/// Cells of the adjacency relation over `node_count` nodes.
fn relation_len(node_count: usize) -> AgonyResult<usize> {
    if node_count == 0 {
        return Err(AgonyError::InvalidNodeCount(node_count));
    }
    node_count
        .checked_mul(node_count)
        .ok_or(AgonyError::InvalidNodeCount(node_count))
}

/// Wire form of a [`Graph`], checked before it becomes one.
#[derive(Deserialize)]
struct RawGraph {
    nodes: usize,
    edges: Vec<bool>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = AgonyError;

    fn try_from(raw: RawGraph) -> AgonyResult<Self> {
        let cells = relation_len(raw.nodes)?;
        if raw.edges.len() != cells {
            return Err(AgonyError::invalid_parameter(format!(
                "graph over {} nodes needs {} relation entries, found {}",
                raw.nodes,
                cells,
                raw.edges.len()
            )));
        }
        Ok(Self {
            nodes: raw.nodes,
            edges: raw.edges,
        })
    }
}

fn parse_pair(token: &str) -> Option<(usize, usize)> {
    let (u, v) = token.split_once(',')?;
    Some((u.trim().parse().ok()?, v.trim().parse().ok()?))
}
