//! The flotation-circuit design problem.

use rand::Rng;

use super::operators::{point_mutation, random_chromosome, single_point_crossover};
use super::types::GaProblem;
use crate::circuit::{Chromosome, Circuit, ConfigError, SolverConfig};

/// Solver tolerance used while evolving circuits.
///
/// Looser than the [`SolverConfig`] default, so scores seen during evolution
/// differ slightly from those of a circuit built with [`Circuit::new`].
pub const GA_TOLERANCE: f64 = 1e-3;

/// Solver iteration cap used while evolving circuits.
pub const GA_MAX_ITERATIONS: usize = 500;

/// Circuit topology search backed by the validator and the mass-balance solver.
///
/// ```
/// use u_circuit::circuit::Chromosome;
/// use u_circuit::ga::{CircuitProblem, GaProblem};
///
/// let problem = CircuitProblem::default();
/// let chain = Chromosome::from([
///     0, 1, 11, 2, 11, 3, 11, 4, 11, 5, 11, 6, 11, 7, 11, 8, 11, 9, 11, 10, 11,
/// ]);
/// assert!(problem.is_feasible(&chain));
/// assert!(problem.evaluate(&chain) > 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitProblem {
    solver: SolverConfig,
}

impl Default for CircuitProblem {
    fn default() -> Self {
        Self::new(
            SolverConfig::default()
                .with_tolerance(GA_TOLERANCE)
                .with_max_iterations(GA_MAX_ITERATIONS),
        )
    }
}

impl CircuitProblem {
    /// Creates a problem scoring circuits with `solver`.
    pub fn new(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// Creates a problem after checking `solver`.
    pub fn try_new(solver: SolverConfig) -> Result<Self, ConfigError> {
        solver.validate()?;
        Ok(Self::new(solver))
    }

    /// The solver configuration every candidate is scored with.
    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }
}

impl GaProblem for CircuitProblem {
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        random_chromosome(rng)
    }

    fn is_feasible(&self, chromosome: &Chromosome) -> bool {
        Circuit::with_config(chromosome, self.solver).check_validity()
    }

    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        Circuit::with_config(chromosome, self.solver).evaluate()
    }

    fn crossover<R: Rng>(&self, father: &mut Chromosome, mother: &mut Chromosome, rng: &mut R) {
        single_point_crossover(father.genes_mut(), mother.genes_mut(), rng);
    }

    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        point_mutation(chromosome.genes_mut(), rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::NON_CONVERGENCE_SCORE;
    use crate::random::create_rng;

    const SERIES_WITH_BRANCHES: [usize; 21] = [
        0, 1, 2, 3, 4, 4, 5, 6, 7, 7, 8, 8, 9, 10, 11, 10, 11, 10, 11, 10, 11,
    ];

    #[test]
    fn test_default_solver_settings() {
        let problem = CircuitProblem::default();
        assert!((problem.solver().tolerance - GA_TOLERANCE).abs() < 1e-15);
        assert_eq!(problem.solver().max_iterations, GA_MAX_ITERATIONS);
    }

    #[test]
    fn test_try_new_validates_solver() {
        assert!(CircuitProblem::try_new(SolverConfig::default()).is_ok());
        assert!(CircuitProblem::try_new(SolverConfig::default().with_tolerance(-1.0)).is_err());
    }

    #[test]
    fn test_evaluate_matches_circuit() {
        let problem = CircuitProblem::new(SolverConfig::default().with_tolerance(1e-8));
        let c = Chromosome::from(SERIES_WITH_BRANCHES);
        assert!(problem.is_feasible(&c));
        assert!((problem.evaluate(&c) + 979.269).abs() < 0.01);
    }

    #[test]
    fn test_non_convergent_problem() {
        let problem = CircuitProblem::new(SolverConfig::default().with_max_iterations(0));
        let c = Chromosome::from(SERIES_WITH_BRANCHES);
        assert_eq!(problem.evaluate(&c), NON_CONVERGENCE_SCORE);
    }

    #[test]
    fn test_operators_keep_length() {
        let problem = CircuitProblem::default();
        let mut rng = create_rng(8);
        let mut f = problem.create_individual(&mut rng);
        let mut m = problem.create_individual(&mut rng);
        for _ in 0..50 {
            problem.crossover(&mut f, &mut m, &mut rng);
            problem.mutate(&mut f, &mut rng);
            problem.mutate(&mut m, &mut rng);
            assert_eq!(f.genes().len(), 21);
            assert_eq!(m.genes().len(), 21);
        }
    }
}
