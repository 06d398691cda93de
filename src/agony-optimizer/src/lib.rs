//! Genetic partition optimizer for agonizer.
//!
//! Searches for an assignment of graphs to `K` clusters that minimizes the sum,
//! over clusters, of the largest pairwise agony between cluster members.

mod candidate;
mod genetic;
mod selection;

pub use candidate::{Candidate, FitnessContext};
pub use genetic::{BestSink, NullSink, OptimizationResult, PartitionOptimizer, Population};
pub use selection::{CumulativeWeights, select_best_pair};

use agony_ranking::AgonyMatrix;
use common_config::OptimizerConfig;
use common_error::AgonyResult;

/// Optimize a partition of the matrix's graphs into `partitions` clusters.
///
/// Seeds from `config.seed` when set, otherwise from the operating system.
pub fn optimize(
    matrix: &AgonyMatrix,
    partitions: usize,
    config: OptimizerConfig,
) -> AgonyResult<OptimizationResult> {
    let optimizer = PartitionOptimizer::new(matrix, partitions, config)?;
    optimizer.run_with_config_seed(&mut NullSink)
}
