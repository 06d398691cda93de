//! Agonize - partition graphs into low-agony clusters
//!
//! Reads a problem, computes the pairwise agony matrix and runs the genetic
//! optimizer. Every improvement is written atomically to the output file, so
//! the run can be interrupted at any point.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package agony-playground --bin agonize -- --output best.txt < problem.txt
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use agony_optimizer::PartitionOptimizer;
use agony_ranking::{AgonyMatrix, AgonyRanker};
use agony_storage::{PartitionWriter, ProblemReader, ProblemSpec};
use common_config::AgonizerConfig;
use common_error::AgonyResult;

use agony_playground::{init_logging, print_header, print_matrix, print_partition};

/// Agonize CLI.
#[derive(Parser, Debug)]
#[command(name = "agonize")]
#[command(about = "Partition graphs into clusters of minimal agony")]
#[command(version)]
struct Args {
    /// File the best partition is written to
    #[arg(short, long)]
    output: PathBuf,

    /// Problem file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generations per restart cycle
    #[arg(short, long)]
    generations: Option<usize>,

    /// Number of restart cycles
    #[arg(short, long)]
    restarts: Option<usize>,

    /// Candidates per generation
    #[arg(short, long)]
    population: Option<usize>,

    /// Print the agony matrix before optimizing
    #[arg(long)]
    print_matrix: bool,
}

impl Args {
    /// Load the configuration file, then apply command-line overrides.
    fn config(&self) -> AgonyResult<AgonizerConfig> {
        let mut config = match &self.config {
            Some(path) => AgonizerConfig::from_json_file(path)?,
            None => AgonizerConfig::default(),
        };

        let optimizer = &mut config.optimizer;
        if let Some(seed) = self.seed {
            optimizer.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            optimizer.generations = generations;
        }
        if let Some(restarts) = self.restarts {
            optimizer.restarts = restarts;
        }
        if let Some(population) = self.population {
            optimizer.population_size = population;
        }

        config.optimizer.validate()?;
        Ok(config)
    }

    fn read_problem(&self) -> AgonyResult<ProblemSpec> {
        match &self.input {
            Some(path) => ProblemReader::read(BufReader::new(File::open(path)?)),
            None => ProblemReader::read(io::stdin().lock()),
        }
    }
}

fn main() -> AgonyResult<()> {
    init_logging();
    let args = Args::parse();
    let config = args.config()?;

    let problem = args.read_problem()?;
    info!(
        "Read {} graphs over {} nodes, partitioning into {}",
        problem.graphs.len(),
        problem.node_count,
        problem.partitions
    );

    let ranker = AgonyRanker::new(config.ranking.clone());
    let matrix = AgonyMatrix::build(&problem.graphs, &ranker)?;
    if args.print_matrix {
        print_matrix(&matrix);
    }

    print_header(&format!("Optimizing into {}", args.output.display()));
    let optimizer = PartitionOptimizer::new(&matrix, problem.partitions, config.optimizer)?;
    let mut writer = PartitionWriter::new(&args.output);
    let result = optimizer.run_with_config_seed(&mut writer)?;

    print_partition(&result, problem.partitions);
    info!("Wrote {} improvements to {}", writer.writes(), args.output.display());
    Ok(())
}
