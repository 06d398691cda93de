//! Core data model for agonizer.
//!
//! This crate provides the dense directed [`Graph`] over nodes `1..=N` that
//! the ranking engine consumes, together with test fixtures and random graph
//! generators.

pub mod graph;
pub mod testing;

mod proptest_utils;

pub use graph::{Edges, Graph};
