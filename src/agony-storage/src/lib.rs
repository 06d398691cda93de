//! Storage layer for agonizer.
//!
//! - [`ProblemReader`]: parses the line-oriented problem format
//! - [`PartitionWriter`]: atomically persists the best partition found so far
//!
//! # Problem format
//!
//! ```text
//! N G K
//! 1,2 2,3
//! 2,1
//! ```
//!
//! The first line holds the node count, graph count and partition count.
//! Each of the next `G` lines lists the edges of one graph as
//! whitespace-separated `i,j` pairs with 1-indexed nodes. A blank line is a
//! graph without edges.

mod reader;
mod writer;

pub use reader::{ProblemReader, ProblemSpec};
pub use writer::{PartitionWriter, read_partition};
