//! Error types and result aliases for agonizer.
//!
//! Every crate in the workspace reports failures through [`AgonyError`] so that
//! errors raised while building graphs, ranking them, or evolving partitions
//! propagate to the caller unchanged.

mod error;

pub use error::{AgonyError, AgonyResult};
