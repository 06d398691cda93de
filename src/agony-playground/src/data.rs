//! Problem generation for playground runs.

use agony_core::Graph;
use agony_storage::{ProblemReader, ProblemSpec};
use common_error::AgonyResult;
use rand::Rng;

/// Generate a random problem.
///
/// Graphs are weakly connected DAGs unless `cyclic` is set, in which case
/// each graph is an arbitrary random relation.
pub fn generate_problem<R: Rng + ?Sized>(
    node_count: usize,
    graph_count: usize,
    partitions: usize,
    cyclic: bool,
    rng: &mut R,
) -> AgonyResult<ProblemSpec> {
    common_error::ensure!(partitions > 0, "partitions must be positive");
    let graphs = (0..graph_count)
        .map(|_| {
            if cyclic {
                Graph::random(node_count, rng)
            } else {
                Graph::random_dag(node_count, rng)
            }
        })
        .collect::<AgonyResult<Vec<_>>>()?;

    Ok(ProblemSpec {
        node_count,
        partitions,
        graphs,
    })
}

/// A small problem with a known answer.
///
/// Six graphs over five nodes: three follow the order `1 < 2 < 3 < 4 < 5`,
/// three follow the reverse. Partitioning into two clusters by direction has
/// fitness 0.
pub fn sample_problem() -> AgonyResult<ProblemSpec> {
    ProblemReader::read_str(
        "5 6 2
1,2 2,3 3,4 4,5
5,4 4,3 3,2 2,1
1,3 2,4 3,5 1,5
5,3 4,2 3,1 5,1
1,2 1,3 1,4 1,5
5,1 5,2 5,3 5,4
",
    )
}
