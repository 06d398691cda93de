//! Display utilities for agonizer.
//!
//! Renders agony matrices and partitions as plain text for terminal output.

mod matrix;
mod tree;

pub use matrix::format_matrix;
pub use tree::PartitionTree;
