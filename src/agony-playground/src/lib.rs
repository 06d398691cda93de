//! Agonizer Playground - command-line drivers
//!
//! This crate provides executable apps for running the agony partitioner on
//! problem files and for generating random problems to feed it.
//!
//! # Available Binaries
//!
//! - **`agonize`**: Read a problem, build the agony matrix and search for the best partition
//! - **`graph-gen`**: Write a random problem in the input format
//!
//! # Usage
//!
//! ```bash
//! # Generate a problem and partition it
//! cargo run --package agony-playground --bin graph-gen -- --nodes 8 --graphs 12 --partitions 3 > problem.txt
//! cargo run --package agony-playground --bin agonize -- --output best.txt --input problem.txt
//! ```

pub mod data;
pub mod utils;

pub use data::{generate_problem, sample_problem};
pub use utils::{init_logging, print_divider, print_header, print_matrix, print_partition};
