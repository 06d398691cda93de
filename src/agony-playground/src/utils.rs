//! Display and setup helpers shared by the playground binaries.

use agony_optimizer::OptimizationResult;
use agony_ranking::AgonyMatrix;
use common_display::{PartitionTree, format_matrix};

/// Install the `tracing` subscriber on stderr, honoring `RUST_LOG` and
/// defaulting to `info`. Records emitted through `log` are captured as well.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "-".repeat(60));
}

/// Print a section header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}", "=".repeat(60));
}

/// Print the agony matrix as tab-separated rows.
pub fn print_matrix(matrix: &AgonyMatrix) {
    print_header(&format!("Agony matrix ({} graphs)", matrix.len()));
    print!("{}", format_matrix(&matrix.rows()));
}

/// Render the best partition of a run as a tree.
pub fn partition_summary(result: &OptimizationResult, partitions: usize) -> String {
    let clusters = result.best.clusters(partitions);
    let title = format!(
        "Best partition: fitness {} after {} generations",
        result.best_fitness, result.generations_run
    );
    PartitionTree::new(title, &clusters).to_string()
}

/// Print the best partition of a run.
pub fn print_partition(result: &OptimizationResult, partitions: usize) {
    print_header("Result");
    print!("{}", partition_summary(result, partitions));
    print_divider();
}
