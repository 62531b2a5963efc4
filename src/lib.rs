//! Flotation circuit simulation and genetic optimization.
//!
//! Two coupled parts:
//!
//! - **Circuit simulator** ([`circuit`]): topology encoding, legality
//!   checking, and an iterative mass-balance solver that scores how well a
//!   circuit separates a valuable component from waste.
//! - **Genetic optimizer** ([`ga`]): an elitist GA with roulette selection,
//!   single-point crossover, and point mutation that evolves circuit
//!   topologies toward higher scores.
//!
//! The two boundary operations are [`evaluate_circuit`] and
//! [`run_optimizer`].
//!
//! # Example
//!
//! ```
//! let chain = [0, 1, 11, 2, 11, 3, 11, 4, 11, 5, 11, 6, 11, 7, 11, 8, 11, 9, 11, 10, 11];
//! let score = u_circuit::evaluate_circuit(&chain, 1e-8, 1000).unwrap();
//! assert!((score - 57.77).abs() < 0.01);
//! ```

pub mod circuit;
pub mod ga;
pub mod random;

use circuit::{CircuitError, Chromosome, Circuit};
use ga::{CircuitProblem, GaConfig, GaRunner};

pub use circuit::NON_CONVERGENCE_SCORE;

/// Scores a topology given as `2 * NUM_UNITS + 1` genes.
///
/// Returns [`NON_CONVERGENCE_SCORE`] if the mass balance does not settle
/// within `max_iterations`. Legality is not checked; see
/// [`Circuit::check_validity`].
pub fn evaluate_circuit(
    genes: &[usize],
    tolerance: f64,
    max_iterations: usize,
) -> Result<f64, CircuitError> {
    let chromosome = Chromosome::from_slice(genes)?;
    Ok(Circuit::new(&chromosome).evaluate_circuit(tolerance, max_iterations))
}

/// Runs the reference optimization and returns the best final score.
pub fn run_optimizer() -> f64 {
    run_optimizer_with(&GaConfig::reference())
}

/// Runs the optimization with `config`, scoring circuits with the GA solver
/// settings.
///
/// # Panics
/// Panics if `config` is invalid.
pub fn run_optimizer_with(config: &GaConfig) -> f64 {
    GaRunner::run(&CircuitProblem::default(), config).best_score
}
