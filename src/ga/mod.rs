//! Genetic Algorithm for circuit topology search.
//!
//! A single-objective, elitist GA over [`Chromosome`](crate::circuit::Chromosome)s.
//! Problems plug in through [`GaProblem`]; [`CircuitProblem`] is the
//! implementation backed by the topology validator and the mass-balance
//! solver.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population sizes, rates, bars, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//! - [`Population`]: Chromosomes with their aligned scores
//!
//! # Submodules
//!
//! - [`operators`]: Random chromosomes, single-point crossover, point mutation
//! - [`selection`]: Roulette-wheel parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod population;
mod problem;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use population::Population;
pub use problem::{CircuitProblem, GA_MAX_ITERATIONS, GA_TOLERANCE};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use types::GaProblem;
