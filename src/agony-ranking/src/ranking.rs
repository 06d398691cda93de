//! Rank assignment by cycle cancellation and label propagation.

use agony_core::Graph;
use common_config::RankingConfig;
use common_error::{AgonyError, AgonyResult};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::overlay::{FORWARD, Overlay, REVERSED};

/// An integer rank per node and the agony it induces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// `ranks[i]` is the rank of node `i + 1`.
    pub ranks: Vec<i64>,
    /// Total agony of the graph under `ranks`.
    pub agony: u64,
}

impl Ranking {
    /// Rank of a 1-indexed node.
    pub fn rank_of(&self, node: usize) -> Option<i64> {
        node.checked_sub(1).and_then(|i| self.ranks.get(i)).copied()
    }

    /// Agony of `graph` under an arbitrary ranking: the sum over every edge
    /// `u -> v` of `max(rank(u) - rank(v) + 1, 0)`.
    ///
    /// `ranks[i]` is the rank of node `i + 1`; a ranking shorter than the node
    /// count is a `SizeMismatch`.
    pub fn agony_of(graph: &Graph, ranks: &[i64]) -> AgonyResult<u64> {
        if ranks.len() != graph.node_count() {
            return Err(AgonyError::size_mismatch(graph.node_count(), ranks.len()));
        }
        Ok(graph
            .edges()
            .map(|(u, v)| violation(ranks[u - 1], ranks[v - 1]))
            .sum())
    }
}

/// Computes agony-minimizing rankings.
///
/// The input graph is never mutated; every call works on a private clone.
#[derive(Debug, Clone, Default)]
pub struct AgonyRanker {
    config: RankingConfig,
}

impl AgonyRanker {
    /// Create a ranker with the given iteration caps.
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Rank the nodes of `graph` and compute its agony.
    pub fn rank(&self, graph: &Graph) -> AgonyResult<Ranking> {
        let mut working = graph.clone();
        let mut overlay = Overlay::forward_edges(&working);

        self.cancel_cycles(&mut working, &mut overlay)?;
        let labels = self.propagate_labels(&overlay, working.node_count())?;

        let agony = overlay
            .entries()
            .filter(|&(_, _, w)| w == REVERSED)
            .map(|(u, v, _)| violation(labels[u], labels[v]))
            .sum();

        Ok(Ranking {
            ranks: labels[1..].to_vec(),
            agony,
        })
    }

    /// Reverse cycles of forward edges until the forward edges form a DAG.
    ///
    /// Each round flips at least one forward entry to reversed, so the number
    /// of rounds is bounded by the edge count.
    fn cancel_cycles(&self, graph: &mut Graph, overlay: &mut Overlay) -> AgonyResult<()> {
        let cap = self
            .config
            .max_cancellations
            .unwrap_or_else(|| overlay.forward_count() + 1);
        let mut rounds = 0;

        while let Some(cycle) = find_forward_cycle(graph, overlay) {
            rounds += 1;
            if rounds > cap {
                return Err(AgonyError::internal(format!(
                    "cycle cancellation exceeded {cap} rounds"
                )));
            }
            debug!(
                "Cancelling cycle of length {} in round {}",
                cycle.len(),
                rounds
            );

            for (i, &u) in cycle.iter().enumerate() {
                let v = cycle[(i + 1) % cycle.len()];
                overlay.flip(u, v);
                graph.remove_edge(u, v)?;
                graph.add_edge(v, u)?;
            }
        }

        debug!(
            "Cycle cancellation finished after {} rounds, {} forward edges remain",
            rounds,
            overlay.forward_count()
        );
        Ok(())
    }

    /// Raise labels along forward edges until `label(v) >= label(u) + 1` for
    /// every forward entry `(u, v)`.
    ///
    /// Returns a 1-indexed label vector (index 0 unused). Labels start at 0 and
    /// only increase; the number of changing passes is bounded by the longest
    /// forward path.
    fn propagate_labels(&self, overlay: &Overlay, nodes: usize) -> AgonyResult<Vec<i64>> {
        let cap = self.config.max_propagation_passes.unwrap_or(nodes + 1);
        let mut labels = vec![0i64; nodes + 1];
        let mut passes = 0;

        loop {
            let mut changed = false;
            for (u, v, w) in overlay.entries() {
                if w == FORWARD && labels[v] < labels[u] - w {
                    labels[v] = labels[u] - w;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            passes += 1;
            if passes > cap {
                return Err(AgonyError::internal(format!(
                    "label propagation exceeded {cap} passes"
                )));
            }
        }

        debug!("Label propagation reached a fixpoint after {passes} passes");
        Ok(labels)
    }
}

/// Rank `graph` with default iteration caps.
pub fn compute_agony(graph: &Graph) -> AgonyResult<Ranking> {
    AgonyRanker::default().rank(graph)
}

fn violation(rank_u: i64, rank_v: i64) -> u64 {
    (rank_u - rank_v + 1).max(0).unsigned_abs()
}

/// Find a directed cycle made only of forward edges.
///
/// Iterative depth-first search; the explicit stack is the current path, so a
/// forward edge into a node on the stack closes the cycle formed by the stack
/// suffix starting at that node. Returns the cycle's nodes in edge order: the
/// last node has a forward edge back to the first.
fn find_forward_cycle(graph: &Graph, overlay: &Overlay) -> Option<Vec<usize>> {
    let n = graph.node_count();
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
            let successor =
                (next..=n).find(|&v| graph.has_edge(u, v) && overlay.is_forward(u, v));
            let Some(v) = successor else {
                on_stack[u] = false;
                stack.pop();
                continue;
            };
            frame.1 = v + 1;

            if on_stack[v] {
                let start = stack.iter().position(|&(node, _)| node == v)?;
                return Some(stack[start..].iter().map(|&(node, _)| node).collect());
            }
            if !visited[v] {
                visited[v] = true;
                on_stack[v] = true;
                stack.push((v, 1));
            }
        }
    }

    None
}
