//! Agonizer - hierarchy agony and graph partitioning
//!
//! Agonizer measures how far a directed graph is from a clean hierarchy
//! (its agony) and searches for a partition of a graph collection into
//! clusters whose members agree on a common hierarchy.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export core crates
pub use agony_core as core;
pub use agony_optimizer as optimizer;
pub use agony_ranking as ranking;
pub use agony_storage as storage;
pub use common_config as config;
pub use common_display as display;
pub use common_error as error;

/// Agonizer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
