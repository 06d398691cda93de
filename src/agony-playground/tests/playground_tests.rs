//! Tests for the playground helpers driving a full run.

use std::fs::{self, File};
use std::io::BufReader;

use agony_optimizer::PartitionOptimizer;
use agony_playground::{generate_problem, sample_problem, utils::partition_summary};
use agony_ranking::{AgonyMatrix, AgonyRanker};
use agony_storage::{PartitionWriter, ProblemReader, read_partition};
use common_config::OptimizerConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

#[test]
fn test_sample_problem_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let problem_path = dir.path().join("problem.txt");
    let output_path = dir.path().join("best.txt");

    fs::write(&problem_path, sample_problem().unwrap().to_text()).unwrap();
    let problem =
        ProblemReader::read(BufReader::new(File::open(&problem_path).unwrap())).unwrap();

    let matrix = AgonyMatrix::build(&problem.graphs, &AgonyRanker::default()).unwrap();
    let config = OptimizerConfig::default()
        .with_population_size(30)
        .with_generations(20)
        .with_restarts(1)
        .with_seed(17);
    let optimizer = PartitionOptimizer::new(&matrix, problem.partitions, config).unwrap();
    let mut writer = PartitionWriter::new(&output_path);
    let result = optimizer.run_with_config_seed(&mut writer).unwrap();

    assert_eq!(result.best_fitness, 0);
    assert_eq!(read_partition(&output_path).unwrap(), result.best.genes());

    let summary = partition_summary(&result, problem.partitions);
    assert!(summary.contains("cluster 1 (3 graphs)"));
    assert!(summary.contains("cluster 2 (3 graphs)"));
}

#[test]
fn test_generated_cyclic_problem_builds_a_matrix() {
    let mut rng = StdRng::seed_from_u64(3);
    let problem = generate_problem(5, 4, 2, true, &mut rng).unwrap();
    let matrix = AgonyMatrix::build(&problem.graphs, &AgonyRanker::default()).unwrap();

    assert_eq!(matrix.len(), 4);
    for i in 0..4 {
        assert_eq!(matrix.get(i, i), 0);
        for j in 0..4 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
}
