//! Pairwise agony matrix over a collection of graphs.

use agony_core::Graph;
use common_error::{AgonyError, AgonyResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::ranking::AgonyRanker;

/// Symmetric `G x G` matrix where entry `(i, j)` is the agony of the union of
/// graph `i` and graph `j`. The diagonal is zero and never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgonyMatrix {
    size: usize,
    values: Vec<u64>,
}

impl AgonyMatrix {
    /// Compute the agony of every pairwise union.
    ///
    /// Any error (mismatched node counts, an iteration cap) aborts the whole
    /// build; a partial matrix is never returned.
    pub fn build(graphs: &[Graph], ranker: &AgonyRanker) -> AgonyResult<Self> {
        for (i, graph) in graphs.iter().enumerate() {
            if !graph.is_acyclic() {
                warn!("Input graph {} is not acyclic", i + 1);
            }
        }

        let size = graphs.len();
        let mut values = vec![0; size * size];
        for i in 0..size {
            for j in i + 1..size {
                let union = graphs[i].union(&graphs[j])?;
                let agony = ranker.rank(&union)?.agony;
                debug!("Agony of graphs {} and {}: {}", i + 1, j + 1, agony);
                values[i * size + j] = agony;
                values[j * size + i] = agony;
            }
        }

        info!("Built {size}x{size} agony matrix");
        Ok(Self { size, values })
    }

    /// Build a matrix from explicit rows.
    ///
    /// Rows must form a square, symmetric matrix. Diagonal entries are
    /// cleared.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> AgonyResult<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(AgonyError::invalid_parameter(format!(
                    "agony matrix row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            values.extend_from_slice(row);
        }

        for i in 0..size {
            values[i * size + i] = 0;
            for j in i + 1..size {
                if values[i * size + j] != values[j * size + i] {
                    return Err(AgonyError::invalid_parameter(format!(
                        "agony matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }

        Ok(Self { size, values })
    }

    /// Agony of the union of graphs `i` and `j` (0-indexed).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        assert!(
            i < self.size && j < self.size,
            "agony matrix index ({i}, {j}) out of range for size {}",
            self.size
        );
        self.values[i * self.size + j]
    }

    /// Number of graphs the matrix covers.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no graphs.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The matrix as nested rows.
    pub fn rows(&self) -> Vec<Vec<u64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.values
            .chunks(self.size)
            .map(<[u64]>::to_vec)
            .collect()
    }
}
