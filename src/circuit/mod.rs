//! Flotation circuit simulator.
//!
//! A circuit is a fixed set of [`NUM_UNITS`] flotation cells. Each cell
//! splits its feed into a concentrate stream and a tailings stream, and each
//! stream is routed either to another cell or out of the circuit through one
//! of two terminals. The topology is encoded as a [`Chromosome`].
//!
//! # Core Operations
//!
//! - [`Circuit::check_validity`] / [`Circuit::validate`]: topology legality
//! - [`Circuit::evaluate_circuit`]: mass-balance score of a topology
//! - [`Circuit::simulate`]: the full [`MassBalance`] behind a score
//!
//! # Example
//!
//! ```
//! use u_circuit::circuit::{Chromosome, Circuit};
//!
//! let chromosome = Chromosome::from([
//!     0, 1, 11, 2, 11, 3, 11, 4, 11, 5, 11, 6, 11, 7, 11, 8, 11, 9, 11, 10, 11,
//! ]);
//! let mut circuit = Circuit::new(&chromosome);
//! assert!(circuit.check_validity());
//! let score = circuit.evaluate_circuit(1e-8, 1000);
//! assert!((score - 57.77).abs() < 0.01);
//! ```
//!
//! # References
//!
//! - Wills & Finch (2016), *Wills' Mineral Processing Technology*, ch. 12
//! - Cisternas et al. (2015), "Trends in modeling, design, and optimization
//!   of multiphase systems in minerals processing"

mod config;
mod error;
mod solver;
mod types;
mod validity;

pub use config::{SolverConfig, UnitParameters, NON_CONVERGENCE_SCORE};
pub use error::{CircuitError, ConfigError, TopologyViolation};
pub use solver::MassBalance;
pub use types::{
    Chromosome, Circuit, Route, Unit, CHROMOSOME_LEN, CONCENTRATE_EXIT, NUM_UNITS, TAILINGS_EXIT,
};
