//! Integration tests for agony-core
//!
//! These tests exercise the public Graph API the way the ranking engine and
//! problem reader use it, without duplicating the unit tests in graph.rs.

use agony_core::testing::{GraphAssertions, GraphFixture, chain, cycle, graph};
use agony_core::Graph;
use common_error::AgonyError;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_pairwise_unions_of_fixture() {
    let fixture = GraphFixture::two_hierarchies();
    let graphs = fixture.graphs();

    for (i, a) in graphs.iter().enumerate() {
        for b in &graphs[i + 1..] {
            let u = a.union(b).unwrap();
            assert_eq!(u.node_count(), fixture.node_count());
            assert_eq!(u, b.union(a).unwrap());
        }
    }

    // Same-direction unions stay acyclic, opposite-direction unions do not.
    let up = graphs[0].union(&graphs[2]).unwrap();
    let _ = GraphAssertions::new(&up).assert_acyclic().assert_connected();
    let mixed = graphs[0].union(&graphs[1]).unwrap();
    assert!(!mixed.is_acyclic());
}

#[test]
fn test_union_is_associative() {
    let a = graph(4, &[(1, 2)]);
    let b = graph(4, &[(2, 3), (4, 1)]);
    let c = graph(4, &[(3, 4), (1, 2)]);

    let left = a.union(&b).unwrap().union(&c).unwrap();
    let right = a.union(&b.union(&c).unwrap()).unwrap();
    assert_eq!(left, right);
    assert_eq!(left.edge_count(), 4);
}

#[test]
fn test_union_leaves_operands_untouched() {
    let a = chain(3);
    let b = cycle(3);
    let before_a = a.clone();
    let before_b = b.clone();

    let _ = a.union(&b).unwrap();
    assert_eq!(a, before_a);
    assert_eq!(b, before_b);
}

#[test]
fn test_single_node_graph() {
    let g = Graph::new(1).unwrap();
    assert!(g.is_connected());
    assert!(g.is_acyclic());
    assert_eq!(g.to_edge_list(), "");

    let looped = graph(1, &[(1, 1)]);
    assert!(!looped.is_acyclic());
}

#[test]
fn test_mismatched_union_is_an_error() {
    let err = chain(3).union(&chain(5)).unwrap_err();
    assert!(matches!(err, AgonyError::SizeMismatch { left: 3, right: 5 }));
    assert_eq!(err.to_string(), "SizeMismatch: graphs have 3 and 5 nodes");
}

#[test]
fn test_generators_are_reproducible() {
    let a = Graph::random_dag(7, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = Graph::random_dag(7, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);

    let c = Graph::random(7, &mut StdRng::seed_from_u64(3)).unwrap();
    let d = Graph::random(7, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(c, d);
}

#[test]
fn test_generators_reject_zero_nodes() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(Graph::random_dag(0, &mut rng).is_err());
    assert!(Graph::random(0, &mut rng).is_err());
}
