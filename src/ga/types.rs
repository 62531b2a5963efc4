//! Core trait definition for the GA framework.
//!
//! [`GaProblem`] is the contract between the evolutionary loop and the
//! domain that creates, checks, scores, and perturbs chromosomes.

use rand::Rng;

use super::runner::GenerationStats;
use crate::circuit::Chromosome;

/// Defines a chromosome optimization problem.
///
/// Higher scores are better (maximization). The runner never calls
/// [`evaluate`](GaProblem::evaluate) on a chromosome it has not first
/// confirmed with [`is_feasible`](GaProblem::is_feasible), except when
/// re-scoring a population whose members were all admitted as feasible.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may score a
/// population in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// Creates a random chromosome.
    ///
    /// It need not be feasible; the runner rejection-samples.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome;

    /// Returns `true` if the chromosome encodes a legal solution.
    fn is_feasible(&self, chromosome: &Chromosome) -> bool;

    /// Scores a chromosome. Higher is better.
    fn evaluate(&self, chromosome: &Chromosome) -> f64;

    /// Recombines two parents in place.
    ///
    /// The default implementation leaves both unchanged.
    fn crossover<R: Rng>(&self, _father: &mut Chromosome, _mother: &mut Chromosome, _rng: &mut R) {}

    /// Mutates a chromosome in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _chromosome: &mut Chromosome, _rng: &mut R) {}

    /// Called at the end of each generation.
    ///
    /// Useful for tracing the best chromosome or external communication.
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}
