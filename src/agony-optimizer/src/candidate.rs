//! Candidate partitions and their fitness.

use agony_ranking::AgonyMatrix;
use common_config::OptimizerConfig;
use common_error::{AgonyError, AgonyResult};
use rand::Rng;

/// Read-only inputs shared by every fitness evaluation within a run.
#[derive(Debug, Clone, Copy)]
pub struct FitnessContext<'a> {
    /// Pairwise agony of graph unions.
    pub matrix: &'a AgonyMatrix,
    /// Number of clusters `K`.
    pub partitions: usize,
}

impl<'a> FitnessContext<'a> {
    /// Create a new fitness context.
    pub const fn new(matrix: &'a AgonyMatrix, partitions: usize) -> Self {
        Self { matrix, partitions }
    }
}

/// An assignment of each graph to one of `K` clusters.
///
/// `genes[g]` is the 0-indexed cluster of graph `g`. Fitness is computed on
/// first evaluation and cached; genes never change after construction.
#[derive(Debug, Clone)]
pub struct Candidate {
    genes: Vec<usize>,
    fitness: Option<u64>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl Eq for Candidate {}

impl Candidate {
    /// Wrap an explicit gene sequence.
    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Wrap a gene sequence, rejecting cluster ids outside `0..partitions`.
    pub fn try_from_genes(genes: Vec<usize>, partitions: usize) -> AgonyResult<Self> {
        if let Some((graph, &cluster)) = genes.iter().enumerate().find(|&(_, &c)| c >= partitions)
        {
            return Err(AgonyError::invalid_parameter(format!(
                "graph {graph} assigned to cluster {cluster}, expected < {partitions}"
            )));
        }
        Ok(Self::from_genes(genes))
    }

    /// A candidate with uniformly random cluster ids.
    ///
    /// # Panics
    ///
    /// Panics if `len` is non-zero and `partitions` is zero.
    pub fn random<R: Rng + ?Sized>(len: usize, partitions: usize, rng: &mut R) -> Self {
        let genes = (0..len).map(|_| rng.random_range(0..partitions)).collect();
        Self::from_genes(genes)
    }

    /// Cluster id per graph.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Cluster ids numbered from 1, the on-disk numbering.
    pub fn cluster_ids_one_based(&self) -> Vec<usize> {
        self.genes.iter().map(|&c| c + 1).collect()
    }

    /// Cached fitness, if the candidate has been evaluated.
    pub fn fitness(&self) -> Option<u64> {
        self.fitness
    }

    /// Compute (once) and return the fitness. Lower is better.
    ///
    /// # Panics
    ///
    /// Panics if a graph id beyond those `ctx.matrix` covers shares a cluster
    /// with another graph. Candidates with one gene per matrix graph never
    /// do; [`PartitionOptimizer`](crate::PartitionOptimizer) only builds those.
    pub fn evaluate(&mut self, ctx: &FitnessContext<'_>) -> u64 {
        if let Some(fitness) = self.fitness {
            return fitness;
        }
        let fitness = self
            .clusters(ctx.partitions)
            .iter()
            .map(|members| max_pairwise_agony(ctx.matrix, members))
            .sum();
        self.fitness = Some(fitness);
        fitness
    }

    /// Graph ids per cluster. Ids beyond `partitions` get their own buckets.
    pub fn clusters(&self, partitions: usize) -> Vec<Vec<usize>> {
        let buckets = self
            .genes
            .iter()
            .map(|&c| c + 1)
            .max()
            .map_or(partitions, |n| n.max(partitions));
        let mut clusters = vec![Vec::new(); buckets];
        for (graph, &cluster) in self.genes.iter().enumerate() {
            clusters[cluster].push(graph);
        }
        clusters
    }

    /// Relabel this candidate's clusters to overlap `other` as much as possible.
    ///
    /// Own labels are taken most-frequent first (lowest label on ties). Each is
    /// mapped to the not-yet-used label of `other` it shares the most positions
    /// with, or to the lowest unused label when it shares none.
    pub fn aligned_to(&self, other: &Candidate, partitions: usize) -> Candidate {
        let k = self
            .genes
            .iter()
            .chain(&other.genes)
            .map(|&c| c + 1)
            .max()
            .map_or(partitions, |n| n.max(partitions));

        let mut own_counts = vec![0usize; k];
        let mut shared = vec![vec![0usize; k]; k];
        for (&a, &b) in self.genes.iter().zip(&other.genes) {
            own_counts[a] += 1;
            shared[a][b] += 1;
        }

        let mut used = vec![false; k];
        let mut mapping: Vec<usize> = (0..k).collect();

        for _ in 0..k {
            let Some(label) = argmax_positive(&own_counts, |_| true) else {
                break;
            };
            own_counts[label] = 0;

            let partner = argmax_positive(&shared[label], |j| !used[j])
                .or_else(|| used.iter().position(|&u| !u))
                .unwrap_or(label);
            mapping[label] = partner;
            used[partner] = true;
        }

        Candidate::from_genes(self.genes.iter().map(|&c| mapping[c]).collect())
    }

    /// Breed a child from two parents by uniform crossover with mutation.
    ///
    /// When label matching is enabled, a copy of `a` is first aligned to `b`.
    /// Each gene is then a random cluster with probability `mutation_rate`,
    /// otherwise taken from either parent with equal probability.
    ///
    /// # Panics
    ///
    /// Panics if a gene mutates while `partitions` is zero.
    pub fn breed<R: Rng + ?Sized>(
        a: &Candidate,
        b: &Candidate,
        config: &OptimizerConfig,
        partitions: usize,
        rng: &mut R,
    ) -> Candidate {
        let aligned;
        let a = if config.label_matching {
            aligned = a.aligned_to(b, partitions);
            &aligned
        } else {
            a
        };

        let genes = a
            .genes
            .iter()
            .zip(&b.genes)
            .map(|(&from_a, &from_b)| {
                if rng.random_bool(config.mutation_rate) {
                    rng.random_range(0..partitions)
                } else if rng.random_bool(0.5) {
                    from_a
                } else {
                    from_b
                }
            })
            .collect();
        Candidate::from_genes(genes)
    }
}

/// Maximum agony between any two distinct members, looked up by graph id.
fn max_pairwise_agony(matrix: &AgonyMatrix, members: &[usize]) -> u64 {
    let mut max = 0;
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            max = max.max(matrix.get(a, b));
        }
    }
    max
}

/// Index of the largest positive count among allowed indices; lowest index wins ties.
fn argmax_positive(counts: &[usize], allowed: impl Fn(usize) -> bool) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, &count) in counts.iter().enumerate() {
        if count > 0 && allowed(i) && best.map_or(true, |(_, c)| count > c) {
            best = Some((i, count));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn matrix() -> AgonyMatrix {
        // Graphs 0 and 2 agree, 1 and 3 agree, cross pairs conflict.
        AgonyMatrix::from_rows(vec![
            vec![0, 5, 0, 4],
            vec![5, 0, 3, 0],
            vec![0, 3, 0, 6],
            vec![4, 0, 6, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_fitness_indexes_by_graph_id() {
        let m = matrix();
        let ctx = FitnessContext::new(&m, 2);

        let mut good = Candidate::from_genes(vec![0, 1, 0, 1]);
        assert_eq!(good.evaluate(&ctx), 0);

        // Cluster 0 = {1, 2}: positional lookup would read (0, 1) = 5.
        let mut mixed = Candidate::from_genes(vec![1, 0, 0, 1]);
        assert_eq!(mixed.evaluate(&ctx), 3 + 4);

        let mut all_one = Candidate::from_genes(vec![0, 0, 0, 0]);
        assert_eq!(all_one.evaluate(&ctx), 6);
    }

    #[test]
    fn test_fitness_is_memoized() {
        let m = matrix();
        let ctx = FitnessContext::new(&m, 2);
        let mut c = Candidate::from_genes(vec![0, 0, 1, 1]);

        assert_eq!(c.fitness(), None);
        let first = c.evaluate(&ctx);
        assert_eq!(c.fitness(), Some(first));

        // A different matrix does not change the cached value.
        let other = AgonyMatrix::from_rows(vec![vec![0; 4]; 4]).unwrap();
        assert_eq!(c.evaluate(&FitnessContext::new(&other, 2)), first);
    }

    #[test]
    fn test_singleton_and_empty_clusters_cost_nothing() {
        let m = matrix();
        let ctx = FitnessContext::new(&m, 4);
        let mut c = Candidate::from_genes(vec![0, 1, 2, 3]);
        assert_eq!(c.evaluate(&ctx), 0);
        assert_eq!(c.clusters(5).len(), 5);
    }

    #[test]
    fn test_try_from_genes() {
        assert!(Candidate::try_from_genes(vec![0, 1, 1], 2).is_ok());
        assert!(matches!(
            Candidate::try_from_genes(vec![0, 2], 2),
            Err(AgonyError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_clusters_and_one_based_ids() {
        let c = Candidate::from_genes(vec![1, 0, 1]);
        assert_eq!(c.clusters(3), vec![vec![1], vec![0, 2], vec![]]);
        assert_eq!(c.cluster_ids_one_based(), vec![2, 1, 2]);
    }

    #[test]
    fn test_alignment_recovers_permuted_labels() {
        let a = Candidate::from_genes(vec![2, 2, 0, 1, 1, 2]);
        let b = Candidate::from_genes(vec![0, 0, 1, 2, 2, 0]);
        let aligned = a.aligned_to(&b, 3);
        assert_eq!(aligned.genes(), b.genes());
    }

    #[test]
    fn test_alignment_falls_back_to_unused_label() {
        // Own labels 0 and 1 both co-occur only with other's label 0.
        let a = Candidate::from_genes(vec![0, 0, 0, 1]);
        let b = Candidate::from_genes(vec![0, 0, 0, 0]);
        let aligned = a.aligned_to(&b, 2);
        assert_eq!(aligned.genes(), &[0, 0, 0, 1]);

        let a = Candidate::from_genes(vec![1, 1, 1, 0]);
        let aligned = a.aligned_to(&b, 2);
        assert_eq!(aligned.genes(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_alignment_is_a_relabeling() {
        let mut rng = StdRng::seed_from_u64(17);
        let m = AgonyMatrix::from_rows(vec![vec![1; 8]; 8]).unwrap();
        let ctx = FitnessContext::new(&m, 3);
        for _ in 0..20 {
            let mut a = Candidate::random(8, 3, &mut rng);
            let b = Candidate::random(8, 3, &mut rng);
            let mut aligned = a.aligned_to(&b, 3);

            // Same grouping, so same fitness.
            assert_eq!(aligned.evaluate(&ctx), a.evaluate(&ctx));
            for i in 0..8 {
                for j in 0..8 {
                    assert_eq!(
                        a.genes()[i] == a.genes()[j],
                        aligned.genes()[i] == aligned.genes()[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_breed_without_mutation_copies_parents() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = OptimizerConfig::default()
            .with_mutation_rate(0.0)
            .with_label_matching(false);
        let a = Candidate::from_genes(vec![0; 16]);
        let b = Candidate::from_genes(vec![1; 16]);

        let child = Candidate::breed(&a, &b, &config, 2, &mut rng);
        assert_eq!(child.genes().len(), 16);
        assert!(child.fitness().is_none());
        assert!(child.genes().iter().all(|&g| g <= 1));
    }

    #[test]
    fn test_breed_identical_parents_with_matching() {
        let mut rng = StdRng::seed_from_u64(8);
        let config = OptimizerConfig::default().with_mutation_rate(0.0);
        let a = Candidate::from_genes(vec![1, 0, 2, 1]);
        let b = a.clone();
        let child = Candidate::breed(&a, &b, &config, 3, &mut rng);
        assert_eq!(child, a);
    }

    #[test]
    fn test_full_mutation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = OptimizerConfig::default().with_mutation_rate(1.0);
        let a = Candidate::from_genes(vec![0; 32]);
        let child = Candidate::breed(&a, &a, &config, 4, &mut rng);
        assert!(child.genes().iter().all(|&g| g < 4));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_evaluate_panics_on_genes_beyond_matrix() {
        let m = matrix();
        let mut c = Candidate::from_genes(vec![0, 1, 0, 1, 0]);
        let _ = c.evaluate(&FitnessContext::new(&m, 2));
    }

    #[test]
    #[should_panic]
    fn test_random_panics_without_partitions() {
        let mut rng = StdRng::seed_from_u64(0);
        let _ = Candidate::random(3, 0, &mut rng);
    }

    #[test]
    fn test_random_empty_candidate_needs_no_partitions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Candidate::random(0, 0, &mut rng).genes().is_empty());
    }

    #[test]
    fn test_argmax_positive() {
        assert_eq!(argmax_positive(&[0, 3, 3, 1], |_| true), Some(1));
        assert_eq!(argmax_positive(&[0, 3, 3, 1], |i| i != 1), Some(2));
        assert_eq!(argmax_positive(&[0, 0], |_| true), None);
    }
}
