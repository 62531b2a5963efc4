//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::circuit::ConfigError;

/// Configuration for the circuit Genetic Algorithm.
///
/// Controls population sizes, operator rates, acceptance bars, termination,
/// and parallelism. The solver tolerance and iteration cap live on the
/// problem (see [`CircuitProblem`](super::CircuitProblem)).
///
/// # Defaults
///
/// ```
/// use u_circuit::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 150);
/// assert_eq!(config.offspring_count, 100);
/// assert_eq!(config.max_generations, 3000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_circuit::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_offspring_count(30)
///     .with_max_generations(200)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals sampled for the initial population.
    pub population_size: usize,

    /// Number of individuals in every later generation, elite included.
    pub offspring_count: usize,

    /// Number of generations to run. There is no early exit on plateau.
    pub max_generations: usize,

    /// Probability of applying single-point crossover to a parent pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating each parent after crossover (0.0–1.0).
    pub mutation_rate: f64,

    /// Score a random circuit must exceed to join the initial population.
    pub init_threshold: f64,

    /// Score an offspring must exceed to join the next generation.
    pub admission_threshold: f64,

    /// Cap on breeding rounds per generation.
    ///
    /// When reached, unfilled slots keep the elite copy they were seeded
    /// with. `None` breeds until the generation is full.
    pub offspring_attempt_limit: Option<usize>,

    /// Whether to score populations in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Report every generation at `info` level instead of `debug`.
    pub progress: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 150,
            offspring_count: 100,
            max_generations: 3000,
            crossover_rate: 0.95,
            mutation_rate: 0.01,
            init_threshold: 50.0,
            admission_threshold: 0.0,
            offspring_attempt_limit: None,
            parallel: false,
            seed: None,
            progress: false,
        }
    }
}

impl GaConfig {
    /// Sets the initial population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the size of every later generation.
    pub fn with_offspring_count(mut self, n: usize) -> Self {
        self.offspring_count = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the initial-population acceptance bar.
    pub fn with_init_threshold(mut self, threshold: f64) -> Self {
        self.init_threshold = threshold;
        self
    }

    /// Sets the offspring admission bar.
    pub fn with_admission_threshold(mut self, threshold: f64) -> Self {
        self.admission_threshold = threshold;
        self
    }

    /// Caps breeding rounds per generation.
    pub fn with_offspring_attempt_limit(mut self, limit: usize) -> Self {
        self.offspring_attempt_limit = Some(limit);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables per-generation progress reporting.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// The reference run: 150 initial circuits, 100 per generation, 3000 generations.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Preset for quick exploratory runs.
    ///
    /// - Population: 30, Offspring: 20, Generations: 100
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            offspring_count: 20,
            max_generations: 100,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::Invalid("population_size must be at least 2"));
        }
        if self.offspring_count < 1 {
            return Err(ConfigError::Invalid("offspring_count must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::Invalid("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::Invalid("crossover_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid("mutation_rate must be within [0, 1]"));
        }
        if self.offspring_attempt_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "offspring_attempt_limit must be positive or None",
            ));
        }
        Ok(())
    }
}
