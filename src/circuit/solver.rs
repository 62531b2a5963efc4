//! Steady-state mass balance by successive substitution.
//!
//! Every unit starts with the external feed as its guess. Each iteration
//! splits the current feeds, rebuilds every feed from the external feed
//! plus the routed streams, and stops once no feed moved by more than the
//! tolerance. Cycles in the topology mean convergence is not guaranteed;
//! the iteration cap turns a non-convergent circuit into
//! [`NON_CONVERGENCE_SCORE`].

use tracing::trace;

use super::config::NON_CONVERGENCE_SCORE;
use super::types::{Circuit, Route, NUM_UNITS};

/// Outcome of a mass-balance run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalance {
    /// Whether the feeds settled within tolerance.
    pub converged: bool,

    /// Iterations performed.
    pub iterations: usize,

    /// Valuable mass leaving through the concentrate exit.
    pub concentrate_valuable: f64,

    /// Waste mass leaving through the concentrate exit.
    pub concentrate_waste: f64,

    /// Valuable mass leaving through the tailings exit.
    pub tailings_valuable: f64,

    /// Waste mass leaving through the tailings exit.
    pub tailings_waste: f64,

    /// Performance score, or [`NON_CONVERGENCE_SCORE`] if not converged.
    pub score: f64,
}

impl MassBalance {
    fn diverged(iterations: usize) -> Self {
        Self {
            converged: false,
            iterations,
            concentrate_valuable: 0.0,
            concentrate_waste: 0.0,
            tailings_valuable: 0.0,
            tailings_waste: 0.0,
            score: NON_CONVERGENCE_SCORE,
        }
    }

    /// Total mass leaving the circuit through both exits.
    pub fn total_out(&self) -> f64 {
        self.concentrate_valuable
            + self.concentrate_waste
            + self.tailings_valuable
            + self.tailings_waste
    }

    /// Valuable fraction of the final concentrate, if any left.
    pub fn concentrate_grade(&self) -> Option<f64> {
        let total = self.concentrate_valuable + self.concentrate_waste;
        (total > 0.0).then(|| self.concentrate_valuable / total)
    }
}

impl Circuit {
    /// Scores the circuit with the tolerance and cap captured at construction.
    pub fn evaluate(&mut self) -> f64 {
        self.evaluate_circuit(self.config.tolerance, self.config.max_iterations)
    }

    /// Scores the circuit.
    ///
    /// Returns [`NON_CONVERGENCE_SCORE`] when the feeds have not settled
    /// within `max_iterations`. Deterministic for a given topology and
    /// arguments. Does not check validity.
    pub fn evaluate_circuit(&mut self, tolerance: f64, max_iterations: usize) -> f64 {
        self.simulate(tolerance, max_iterations).score
    }

    /// Runs the mass balance and reports the product streams.
    pub fn simulate(&mut self, tolerance: f64, max_iterations: usize) -> MassBalance {
        let config = self.config;
        for unit in &mut self.units {
            unit.feed_valuable = config.initial_feed_valuable;
            unit.feed_waste = config.initial_feed_waste;
        }
        if self.feed_unit >= NUM_UNITS {
            return MassBalance::diverged(0);
        }

        let mut iterations = 0;
        let mut converged = false;
        while iterations < max_iterations {
            for unit in &mut self.units {
                unit.guard_underflow();
                unit.split(&config.unit);
            }

            let feed = &mut self.units[self.feed_unit];
            feed.feed_valuable = config.initial_feed_valuable;
            feed.feed_waste = config.initial_feed_waste;

            for i in 0..NUM_UNITS {
                let source = self.units[i];
                if let Route::Unit(t) = Route::of(source.concentrate_target) {
                    self.units[t].feed_valuable += source.out_concentrate_valuable;
                    self.units[t].feed_waste += source.out_concentrate_waste;
                }
                if let Route::Unit(t) = Route::of(source.tailings_target) {
                    self.units[t].feed_valuable += source.out_tailings_valuable;
                    self.units[t].feed_waste += source.out_tailings_waste;
                }
            }

            iterations += 1;

            if self.units.iter().all(|u| u.feed_change() <= tolerance) {
                converged = true;
                break;
            }
        }

        if !converged {
            trace!(iterations, "mass balance did not converge");
            return MassBalance::diverged(iterations);
        }

        let mut balance = MassBalance {
            converged,
            iterations,
            concentrate_valuable: 0.0,
            concentrate_waste: 0.0,
            tailings_valuable: 0.0,
            tailings_waste: 0.0,
            score: 0.0,
        };
        for unit in &self.units {
            // Only concentrate streams are scored, even for exotic routings.
            if Route::of(unit.concentrate_target) == Route::Concentrate {
                balance.concentrate_valuable += unit.out_concentrate_valuable;
                balance.concentrate_waste += unit.out_concentrate_waste;
                balance.score += unit.out_concentrate_valuable * config.value_weight
                    - unit.out_concentrate_waste * config.waste_penalty;
            }
            if Route::of(unit.tailings_target) == Route::Tailings {
                balance.tailings_valuable += unit.out_tailings_valuable;
                balance.tailings_waste += unit.out_tailings_waste;
            }
        }
        balance
    }
}
