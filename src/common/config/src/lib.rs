//! Configuration management for agonizer.
//!
//! Provides the tunables for the ranking engine and the partition optimizer.
//! Every struct deserializes with defaults for missing fields, so a JSON file
//! only needs to name the values it overrides.

use std::path::Path;

use common_error::{AgonyError, AgonyResult};
use serde::{Deserialize, Serialize};

/// Global agonizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgonizerConfig {
    /// Ranking engine configuration.
    pub ranking: RankingConfig,
    /// Partition optimizer configuration.
    pub optimizer: OptimizerConfig,
}

impl AgonizerConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> AgonyResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.optimizer.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AgonyResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Iteration caps for the ranking engine.
///
/// Both loops terminate by construction; the caps turn a broken invariant
/// into an `InternalError` instead of a hang. `None` derives the cap from
/// the graph being ranked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum number of cycle-cancellation rounds.
    pub max_cancellations: Option<usize>,
    /// Maximum number of label-propagation passes.
    pub max_propagation_passes: Option<usize>,
}

impl RankingConfig {
    /// Set the cycle-cancellation cap.
    #[must_use]
    pub fn with_max_cancellations(mut self, max: usize) -> Self {
        self.max_cancellations = Some(max);
        self
    }

    /// Set the label-propagation cap.
    #[must_use]
    pub fn with_max_propagation_passes(mut self, max: usize) -> Self {
        self.max_propagation_passes = Some(max);
        self
    }
}

/// Parent selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionMode {
    /// Breed the whole next generation from the best and second-best candidates.
    #[default]
    BestPair,
    /// Draw each parent with weight `1 + (max_fitness - fitness)^2`.
    FitnessProportional,
}

/// Genetic algorithm configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Number of candidates per generation.
    pub population_size: usize,
    /// Probability that a gene is replaced by a random cluster id.
    pub mutation_rate: f64,
    /// Generations per restart cycle.
    pub generations: usize,
    /// Outer restart cycles, each from a fresh random population.
    pub restarts: usize,
    /// Parent selection policy.
    pub selection: SelectionMode,
    /// Align cluster labels of the first parent to the second before crossover.
    pub label_matching: bool,
    /// Random seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            mutation_rate: 0.3,
            generations: 1000,
            restarts: 10,
            selection: SelectionMode::BestPair,
            label_matching: true,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Set the population size.
    #[must_use]
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the mutation rate.
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the number of generations per restart.
    #[must_use]
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the number of restart cycles.
    #[must_use]
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Set the selection policy.
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }

    /// Enable or disable label alignment before crossover.
    #[must_use]
    pub fn with_label_matching(mut self, enable: bool) -> Self {
        self.label_matching = enable;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the optimizer cannot run with.
    pub fn validate(&self) -> AgonyResult<()> {
        if self.population_size == 0 {
            return Err(AgonyError::invalid_parameter(
                "population_size must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(AgonyError::invalid_parameter(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.restarts == 0 {
            return Err(AgonyError::invalid_parameter("restarts must be positive"));
        }
        Ok(())
    }
}
