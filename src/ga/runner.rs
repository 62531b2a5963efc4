//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → selection → crossover →
//! mutation → admission → repeat, for a fixed number of generations.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use super::config::GaConfig;
use super::population::Population;
use super::selection::select_parents;
use super::types::GaProblem;
use crate::circuit::{Chromosome, ConfigError};
use crate::random::create_rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Elite of the last completed generation.
    pub best: Chromosome,

    /// Score of `best`: the best score last recorded.
    pub best_score: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Random chromosomes drawn to fill the initial population.
    pub initial_samples: usize,

    /// Best score of each completed generation. Non-decreasing.
    pub fitness_history: Vec<f64>,
}

/// Snapshot handed to [`GaProblem::on_generation`] after each generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Elite chromosome of this generation.
    pub best: Chromosome,

    /// Elite score.
    pub best_score: f64,

    /// Mean score of the evaluated population.
    pub mean_score: f64,

    /// Offspring admitted into the next generation (elite excluded).
    pub admitted: usize,

    /// Breeding rounds (parent pairs) spent filling the next generation.
    pub attempts: usize,
}

/// One trace line: the elite's genes followed by its score.
impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.best, self.best_score)
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```no_run
/// use u_circuit::ga::{CircuitProblem, GaConfig, GaRunner};
///
/// let problem = CircuitProblem::default();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config);
/// println!("best: {} -> {}", result.best, result.best_score);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// or use [`try_run`](Self::try_run) to get a descriptive error).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA, returning an error for an invalid configuration.
    pub fn try_run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult, ConfigError> {
        Self::try_run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before starting the next generation and returns the best recorded
    /// so far.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult {
        Self::try_run_with_cancel(problem, config, cancel).expect("invalid GaConfig")
    }

    /// Fallible form of [`run_with_cancel`](Self::run_with_cancel).
    pub fn try_run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "rejecting GA configuration");
            return Err(e);
        }
        if config.parallel && !cfg!(feature = "parallel") {
            warn!("parallel evaluation requested without the `parallel` feature; scoring serially");
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        // 1. Initialize population
        let (mut population, initial_samples) = initial_population(problem, config, &mut rng);
        debug!(
            size = population.len(),
            samples = initial_samples,
            "initial population ready"
        );

        let (seed_best, seed_score) = population
            .best()
            .map(|(c, s)| (c.clone(), s))
            .expect("population must not be empty");
        let mut best = seed_best;
        let mut best_score = seed_score;
        let mut fitness_history = Vec::with_capacity(config.max_generations);
        let mut cancelled = false;

        // 2. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Evaluate
            population.evaluate(problem, config.parallel);

            // Elitism
            let elite_idx = population
                .best_index()
                .expect("population must not be empty");
            let elite = population.chromosomes()[elite_idx].clone();
            let elite_score = population.scores()[elite_idx];
            let mut next = Population::seeded(&elite, elite_score, config.offspring_count);

            // Breed until the next generation is full
            let mut filled = 1;
            let mut attempts = 0;
            while filled < config.offspring_count {
                if config
                    .offspring_attempt_limit
                    .is_some_and(|limit| attempts >= limit)
                {
                    break;
                }
                attempts += 1;

                let (f_idx, m_idx) = select_parents(population.scores(), &mut rng);
                let mut father = population.chromosomes()[f_idx].clone();
                let mut mother = population.chromosomes()[m_idx].clone();

                if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&mut father, &mut mother, &mut rng);
                }
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    problem.mutate(&mut father, &mut rng);
                }
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    problem.mutate(&mut mother, &mut rng);
                }

                for child in [father, mother] {
                    if filled >= config.offspring_count {
                        break;
                    }
                    if let Some(score) = admit(problem, &child, config.admission_threshold) {
                        next.set(filled, child, score);
                        filled += 1;
                    }
                }
            }

            let stats = GenerationStats {
                generation: gen + 1,
                best: elite.clone(),
                best_score: elite_score,
                mean_score: population.mean_score(),
                admitted: filled - 1,
                attempts,
            };
            if config.progress {
                info!(
                    generation = stats.generation,
                    elite = %stats,
                    best = stats.best_score,
                    mean = stats.mean_score,
                    admitted = stats.admitted,
                    "generation complete"
                );
            } else {
                debug!(
                    generation = stats.generation,
                    elite = %stats,
                    best = stats.best_score,
                    mean = stats.mean_score,
                    admitted = stats.admitted,
                    "generation complete"
                );
            }
            problem.on_generation(&stats);

            // Advance
            population = next;
            best = elite;
            best_score = elite_score;
            fitness_history.push(best_score);
        }

        Ok(GaResult {
            best,
            best_score,
            generations: fitness_history.len(),
            cancelled,
            initial_samples,
            fitness_history,
        })
    }
}

/// Rejection-samples `population_size` feasible chromosomes scoring above
/// `init_threshold`. Returns the population and the number of draws.
fn initial_population<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    rng: &mut R,
) -> (Population, usize) {
    let mut population = Population::with_capacity(config.population_size);
    let mut samples = 0usize;
    while population.len() < config.population_size {
        let candidate = problem.create_individual(rng);
        samples += 1;
        if let Some(score) = admit(problem, &candidate, config.init_threshold) {
            population.push(candidate, score);
        }
    }
    (population, samples)
}

/// Scores `chromosome` if it is feasible and beats `threshold`.
fn admit<P: GaProblem>(problem: &P, chromosome: &Chromosome, threshold: f64) -> Option<f64> {
    if !problem.is_feasible(chromosome) {
        return None;
    }
    let score = problem.evaluate(chromosome);
    (score > threshold).then_some(score)
}

// ============================================================================
// Tests
// ============================================================================
