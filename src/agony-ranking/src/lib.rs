//! Agony ranking engine for agonizer.
//!
//! This crate assigns every node of a directed graph an integer rank and
//! reports the resulting agony, the total hierarchy violation
//! `sum max(rank(u) - rank(v) + 1, 0)` over the edges `u -> v`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌────────────────────┐     ┌───────────────────┐
//! │  Graph   │ ──▶ │ cycle cancellation │ ──▶ │ label propagation │ ──▶ Ranking
//! └──────────┘     └────────────────────┘     └───────────────────┘
//! ```
//!
//! [`AgonyMatrix::build`] runs the engine on the union of every pair of graphs
//! in a collection to produce the optimizer's cost matrix.

mod matrix;
mod overlay;
mod ranking;

pub use matrix::AgonyMatrix;
pub use ranking::{AgonyRanker, Ranking, compute_agony};
