//! Parent selection policies.

use rand::Rng;

/// Indices of the best and second-best fitness in one scan.
///
/// A fitness that ties or beats the running best takes its place and demotes
/// the previous best to second, so among equals the later candidate wins.
/// With a single candidate both indices are the same.
pub fn select_best_pair(fitness: &[u64]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, u64)> = None;
    let mut second: Option<(usize, u64)> = None;

    for (i, &f) in fitness.iter().enumerate() {
        if best.map_or(true, |(_, b)| f <= b) {
            second = best;
            best = Some((i, f));
        } else if second.map_or(true, |(_, s)| f <= s) {
            second = Some((i, f));
        }
    }

    let (best, _) = best?;
    Some((best, second.map_or(best, |(i, _)| i)))
}

/// Cumulative selection weights `1 + (max_fitness - fitness)^2`.
///
/// Every candidate keeps a weight of at least 1, so the worst candidate can
/// still be drawn.
#[derive(Debug, Clone)]
pub struct CumulativeWeights {
    cumulative: Vec<u128>,
}

impl CumulativeWeights {
    /// Build the table for a population's fitness values.
    pub fn new(fitness: &[u64]) -> Self {
        let max = fitness.iter().copied().max().unwrap_or(0);
        let mut total = 0u128;
        let cumulative = fitness
            .iter()
            .map(|&f| {
                let distance = u128::from(max - f);
                total += 1 + distance * distance;
                total
            })
            .collect();
        Self { cumulative }
    }

    /// Sum of all weights.
    pub fn total(&self) -> u128 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Draw an index with probability proportional to its weight.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let pick = rng.random_range(1..=total);
        Some(self.cumulative.partition_point(|&c| c < pick))
    }
}
