//! Property-based testing utilities for agony-core.
//!
//! Strategies for generating graphs, and the algebraic laws of union and
//! the structural predicates checked against them.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::graph::Graph;

    // =========================================================================
    // Arbitrary Strategies for Graph
    // =========================================================================

    /// Strategy for an arbitrary loop-free graph over exactly `n` nodes.
    fn arb_graph_with(n: usize) -> impl Strategy<Value = Graph> {
        prop::collection::vec((1..=n, 1..=n), 0..n * 2).prop_map(move |pairs| {
            let mut g = Graph::new(n).unwrap();
            for (u, v) in pairs.into_iter().filter(|(u, v)| u != v) {
                g.add_edge(u, v).unwrap();
            }
            g
        })
    }

    /// Strategy for a pair of graphs sharing a node count.
    fn arb_graph_pair() -> impl Strategy<Value = (Graph, Graph)> {
        (1usize..8).prop_flat_map(|n| (arb_graph_with(n), arb_graph_with(n)))
    }

    /// Strategy for acyclic graphs: every edge goes forward in a random
    /// permutation of the nodes.
    fn arb_dag() -> impl Strategy<Value = Graph> {
        (2usize..8)
            .prop_flat_map(|n| {
                (
                    Just(n),
                    Just((1..=n).collect::<Vec<_>>()).prop_shuffle(),
                    prop::collection::vec((0..n, 0..n), 0..n * 2),
                )
            })
            .prop_map(|(n, order, pairs)| {
                let mut g = Graph::new(n).unwrap();
                for (a, b) in pairs {
                    if a < b {
                        g.add_edge(order[a], order[b]).unwrap();
                    }
                }
                g
            })
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    proptest! {
        /// Union is commutative.
        #[test]
        fn union_commutative((a, b) in arb_graph_pair()) {
            prop_assert_eq!(a.union(&b).unwrap(), b.union(&a).unwrap());
        }

        /// Union is idempotent.
        #[test]
        fn union_idempotent((a, _b) in arb_graph_pair()) {
            prop_assert_eq!(a.union(&a).unwrap(), a);
        }

        /// Union contains every edge of both operands and nothing else.
        #[test]
        fn union_is_edgewise_or((a, b) in arb_graph_pair()) {
            let u = a.union(&b).unwrap();
            for (x, y) in u.edges() {
                prop_assert!(a.has_edge(x, y) || b.has_edge(x, y));
            }
            prop_assert!(u.edge_count() >= a.edge_count().max(b.edge_count()));
            prop_assert!(u.edge_count() <= a.edge_count() + b.edge_count());
        }

        /// Graphs built forward along a node order are acyclic.
        #[test]
        fn forward_edges_are_acyclic(g in arb_dag()) {
            prop_assert!(g.is_acyclic());
        }

        /// Adding the reverse of any edge creates a cycle.
        #[test]
        fn reversed_edge_creates_cycle(g in arb_dag()) {
            if let Some((u, v)) = g.edges().next() {
                let mut cyclic = g.clone();
                cyclic.add_edge(v, u).unwrap();
                prop_assert!(!cyclic.is_acyclic());
            }
        }

        /// Edge lists round-trip through their text form.
        #[test]
        fn edge_list_roundtrip((a, _b) in arb_graph_pair()) {
            let text = a.to_edge_list();
            let parsed = Graph::from_edge_list(a.node_count(), &text).unwrap();
            prop_assert_eq!(parsed, a);
        }

        /// Graphs round-trip through JSON.
        #[test]
        fn graph_serde_roundtrip((a, _b) in arb_graph_pair()) {
            let json = serde_json::to_string(&a).unwrap();
            let back: Graph = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, a);
        }
    }
}
