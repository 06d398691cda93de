//! Graph Gen - random problem generator
//!
//! Writes a problem in the agonize input format to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package agony-playground --bin graph-gen -- --nodes 10 --graphs 20 --partitions 4
//! ```

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use common_error::AgonyResult;

use agony_playground::{generate_problem, init_logging};

/// Graph Gen CLI.
#[derive(Parser, Debug)]
#[command(name = "graph-gen")]
#[command(about = "Generate a random agony partitioning problem")]
#[command(version)]
struct Args {
    /// Nodes per graph
    #[arg(short, long)]
    nodes: usize,

    /// Number of graphs
    #[arg(short, long)]
    graphs: usize,

    /// Number of partitions
    #[arg(short, long)]
    partitions: usize,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generate arbitrary relations instead of DAGs
    #[arg(long)]
    cyclic: bool,
}

fn main() -> AgonyResult<()> {
    init_logging();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let problem = generate_problem(args.nodes, args.graphs, args.partitions, args.cyclic, &mut rng)?;
    info!(
        "Generated {} {} graphs over {} nodes",
        args.graphs,
        if args.cyclic { "random" } else { "acyclic" },
        args.nodes
    );

    print!("{}", problem.to_text());
    Ok(())
}
