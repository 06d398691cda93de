//! Generational genetic search over partitions.

use agony_ranking::AgonyMatrix;
use common_config::{OptimizerConfig, SelectionMode};
use common_error::{AgonyError, AgonyResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::candidate::{Candidate, FitnessContext};
use crate::selection::{CumulativeWeights, select_best_pair};

/// Receives the global best candidate every time it improves.
///
/// Implementations must tolerate being called many times within one run.
pub trait BestSink {
    /// Record a new best candidate and its fitness.
    fn record(&mut self, best: &Candidate, fitness: u64) -> AgonyResult<()>;
}

/// A sink that discards every improvement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl BestSink for NullSink {
    fn record(&mut self, _best: &Candidate, _fitness: u64) -> AgonyResult<()> {
        Ok(())
    }
}

/// Collects every improvement in order.
impl BestSink for Vec<(Candidate, u64)> {
    fn record(&mut self, best: &Candidate, fitness: u64) -> AgonyResult<()> {
        self.push((best.clone(), fitness));
        Ok(())
    }
}

/// A fixed-size generation of candidates.
#[derive(Debug, Clone)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    /// `size` candidates with uniformly random genes.
    ///
    /// # Panics
    ///
    /// Panics if `size` and `genes` are non-zero and `partitions` is zero.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        genes: usize,
        partitions: usize,
        rng: &mut R,
    ) -> Self {
        let candidates = (0..size)
            .map(|_| Candidate::random(genes, partitions, rng))
            .collect();
        Self { candidates }
    }

    /// Wrap existing candidates.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// The candidates of this generation.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Evaluate every candidate and return their fitness in order.
    pub fn evaluate(&mut self, ctx: &FitnessContext<'_>) -> Vec<u64> {
        self.candidates.iter_mut().map(|c| c.evaluate(ctx)).collect()
    }

    /// The evaluated candidate with the lowest fitness, first seen on ties.
    pub fn best(&self) -> Option<&Candidate> {
        let mut best: Option<&Candidate> = None;
        for candidate in &self.candidates {
            let Some(fitness) = candidate.fitness() else {
                continue;
            };
            if best.and_then(Candidate::fitness).map_or(true, |b| fitness < b) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Breed a full replacement generation under the configured selection.
    pub fn next_generation<R: Rng + ?Sized>(
        &mut self,
        ctx: &FitnessContext<'_>,
        config: &OptimizerConfig,
        rng: &mut R,
    ) -> AgonyResult<Population> {
        let fitness = self.evaluate(ctx);
        let size = self.candidates.len();
        let empty = || AgonyError::invalid_parameter("cannot breed from an empty population");

        let candidates = match config.selection {
            SelectionMode::BestPair => {
                let (best, second) = select_best_pair(&fitness).ok_or_else(empty)?;
                debug!(
                    "Breeding from fitness {} and {}",
                    fitness[best], fitness[second]
                );
                let (a, b) = (&self.candidates[best], &self.candidates[second]);
                (0..size)
                    .map(|_| Candidate::breed(a, b, config, ctx.partitions, rng))
                    .collect()
            }
            SelectionMode::FitnessProportional => {
                let weights = CumulativeWeights::new(&fitness);
                let mut children = Vec::with_capacity(size);
                for _ in 0..size {
                    let a = weights.sample(rng).ok_or_else(empty)?;
                    let b = weights.sample(rng).ok_or_else(empty)?;
                    children.push(Candidate::breed(
                        &self.candidates[a],
                        &self.candidates[b],
                        config,
                        ctx.partitions,
                        rng,
                    ));
                }
                children
            }
        };

        Ok(Population { candidates })
    }
}

/// Outcome of an optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best candidate seen across all restarts and generations.
    pub best: Candidate,
    /// Fitness of `best`.
    pub best_fitness: u64,
    /// Global best fitness after each initial population and each generation.
    pub trajectory: Vec<u64>,
    /// Total generations bred across all restarts.
    pub generations_run: usize,
}

/// Genetic search for a partition minimizing aggregated cluster agony.
///
/// The optimizer has no convergence criterion: it runs exactly
/// `restarts * generations` generations.
#[derive(Debug, Clone)]
pub struct PartitionOptimizer<'a> {
    ctx: FitnessContext<'a>,
    config: OptimizerConfig,
}

impl<'a> PartitionOptimizer<'a> {
    /// Create an optimizer, rejecting configurations it cannot run.
    pub fn new(
        matrix: &'a AgonyMatrix,
        partitions: usize,
        config: OptimizerConfig,
    ) -> AgonyResult<Self> {
        config.validate()?;
        common_error::ensure!(partitions > 0, "partitions must be positive");
        common_error::ensure!(!matrix.is_empty(), "agony matrix covers no graphs");
        Ok(Self {
            ctx: FitnessContext::new(matrix, partitions),
            config,
        })
    }

    /// The optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run with a generator seeded from `config.seed`, or from the OS.
    pub fn run_with_config_seed<S: BestSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> AgonyResult<OptimizationResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run(&mut rng, sink)
    }

    /// Run with a generator seeded from `seed`.
    pub fn run_seeded<S: BestSink + ?Sized>(
        &self,
        seed: u64,
        sink: &mut S,
    ) -> AgonyResult<OptimizationResult> {
        self.run(&mut StdRng::seed_from_u64(seed), sink)
    }

    /// Run all restart cycles, reporting every improvement to `sink`.
    pub fn run<R: Rng + ?Sized, S: BestSink + ?Sized>(
        &self,
        rng: &mut R,
        sink: &mut S,
    ) -> AgonyResult<OptimizationResult> {
        let genes = self.ctx.matrix.len();
        let mut tracker = BestTracker::default();
        let mut trajectory = Vec::new();
        let mut generations_run = 0;

        for cycle in 0..self.config.restarts {
            info!(
                "Starting restart cycle {}/{}",
                cycle + 1,
                self.config.restarts
            );

            let mut population = Population::random(
                self.config.population_size,
                genes,
                self.ctx.partitions,
                rng,
            );
            population.evaluate(&self.ctx);
            tracker.observe(&population, sink)?;
            trajectory.push(tracker.fitness);

            for _ in 0..self.config.generations {
                population = population.next_generation(&self.ctx, &self.config, rng)?;
                population.evaluate(&self.ctx);
                tracker.observe(&population, sink)?;
                trajectory.push(tracker.fitness);
                generations_run += 1;
            }
        }

        let best = tracker
            .best
            .ok_or_else(|| AgonyError::internal("optimizer finished without a candidate"))?;
        Ok(OptimizationResult {
            best,
            best_fitness: tracker.fitness,
            trajectory,
            generations_run,
        })
    }
}

/// Global best across generations and restarts.
struct BestTracker {
    best: Option<Candidate>,
    fitness: u64,
}

impl Default for BestTracker {
    fn default() -> Self {
        Self {
            best: None,
            fitness: u64::MAX,
        }
    }
}

impl BestTracker {
    /// Scan an evaluated population and report each strict improvement.
    fn observe<S: BestSink + ?Sized>(
        &mut self,
        population: &Population,
        sink: &mut S,
    ) -> AgonyResult<()> {
        for candidate in population.candidates() {
            let Some(fitness) = candidate.fitness() else {
                continue;
            };
            if fitness < self.fitness {
                info!("New best: {fitness}");
                self.fitness = fitness;
                self.best = Some(candidate.clone());
                sink.record(candidate, fitness)?;
            }
        }
        Ok(())
    }
}
