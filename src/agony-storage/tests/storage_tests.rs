//! End-to-end tests from problem text to a persisted partition.

use agony_core::Graph;
use agony_optimizer::PartitionOptimizer;
use agony_ranking::{AgonyMatrix, AgonyRanker};
use agony_storage::{PartitionWriter, ProblemReader, ProblemSpec, read_partition};
use common_config::OptimizerConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

const HIERARCHIES: &str = "4 4 2
1,2 2,3 3,4
4,3 3,2 2,1
1,3 2,4
4,2 3,1
";

#[test]
fn test_problem_to_partition_file() {
    let spec = ProblemReader::read_str(HIERARCHIES).unwrap();
    let matrix = AgonyMatrix::build(&spec.graphs, &AgonyRanker::default()).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("best.txt");
    let mut writer = PartitionWriter::new(&path);

    let config = OptimizerConfig::default()
        .with_population_size(20)
        .with_generations(10)
        .with_restarts(1);
    let optimizer = PartitionOptimizer::new(&matrix, spec.partitions, config).unwrap();
    let result = optimizer.run_seeded(6, &mut writer).unwrap();

    assert_eq!(result.best_fitness, 0);
    assert!(writer.writes() >= 1);

    let written = read_partition(&path).unwrap();
    assert_eq!(written, result.best.genes());
    assert_eq!(written[0], written[2]);
    assert_eq!(written[1], written[3]);
    assert_ne!(written[0], written[1]);
}

#[test]
fn test_generated_problem_reads_back() {
    let mut rng = StdRng::seed_from_u64(42);
    let graphs = (0..5)
        .map(|_| Graph::random_dag(6, &mut rng).unwrap())
        .collect::<Vec<_>>();
    let spec = ProblemSpec {
        node_count: 6,
        partitions: 3,
        graphs,
    };

    let parsed = ProblemReader::read_str(&spec.to_text()).unwrap();
    assert_eq!(parsed, spec);
}
