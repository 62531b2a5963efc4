//! Physical and numerical parameters for circuit simulation.
//!
//! [`UnitParameters`] holds the flotation-cell physics shared by every unit;
//! [`SolverConfig`] controls the mass-balance iteration and scoring.

use super::error::ConfigError;

/// Score returned when the mass balance fails to converge.
///
/// No converged reference circuit scores this low.
pub const NON_CONVERGENCE_SCORE: f64 = -50_000.0;

/// Physical constants of a single flotation cell.
///
/// # Defaults
///
/// ```
/// use u_circuit::circuit::UnitParameters;
///
/// let p = UnitParameters::default();
/// assert_eq!(p.k_valuable, 0.005);
/// assert_eq!(p.k_waste, 0.0005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitParameters {
    /// First-order rate constant of the valuable component (1/s).
    pub k_valuable: f64,

    /// First-order rate constant of the waste component (1/s).
    ///
    /// An order of magnitude below `k_valuable` in the reference cell.
    pub k_waste: f64,

    /// Solids density (kg/m³).
    pub solids_density: f64,

    /// Volume fraction of solids in the feed.
    pub solids_fraction: f64,

    /// Cell volume (m³).
    pub volume: f64,
}

impl Default for UnitParameters {
    fn default() -> Self {
        Self {
            k_valuable: 0.005,
            k_waste: 0.0005,
            solids_density: 3000.0,
            solids_fraction: 0.1,
            volume: 10.0,
        }
    }
}

impl UnitParameters {
    /// Solids hold-up of one cell, `V·φ·ρ`.
    ///
    /// Residence time is this mass divided by the total feed rate.
    pub fn solids_mass(&self) -> f64 {
        self.volume * self.solids_fraction * self.solids_density
    }

    /// Recovery fractions `(R_valuable, R_waste)` for residence time `tau`.
    ///
    /// `R = k·τ / (1 + k·τ)` per component.
    pub fn recoveries(&self, tau: f64) -> (f64, f64) {
        let kv = self.k_valuable * tau;
        let kw = self.k_waste * tau;
        (kv / (1.0 + kv), kw / (1.0 + kw))
    }
}

/// Configuration for the mass-balance solver.
///
/// # Builder Pattern
///
/// ```
/// use u_circuit::circuit::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_tolerance(1e-8)
///     .with_max_iterations(2000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Largest absolute feed change (per component, per unit) accepted as converged.
    pub tolerance: f64,

    /// Iteration cap. Zero means the solver never converges.
    pub max_iterations: usize,

    /// Valuable mass rate of the external feed (kg/s).
    pub initial_feed_valuable: f64,

    /// Waste mass rate of the external feed (kg/s).
    pub initial_feed_waste: f64,

    /// Reward per unit of valuable mass in the final concentrate.
    pub value_weight: f64,

    /// Penalty per unit of waste mass in the final concentrate.
    pub waste_penalty: f64,

    /// Cell physics shared by every unit.
    pub unit: UnitParameters,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            initial_feed_valuable: 10.0,
            initial_feed_waste: 100.0,
            value_weight: 100.0,
            waste_penalty: 500.0,
            unit: UnitParameters::default(),
        }
    }
}

impl SolverConfig {
    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the external feed rates.
    pub fn with_feed(mut self, valuable: f64, waste: f64) -> Self {
        self.initial_feed_valuable = valuable;
        self.initial_feed_waste = waste;
        self
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, value_weight: f64, waste_penalty: f64) -> Self {
        self.value_weight = value_weight;
        self.waste_penalty = waste_penalty;
        self
    }

    /// Sets the cell physics.
    pub fn with_unit_parameters(mut self, unit: UnitParameters) -> Self {
        self.unit = unit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid("tolerance must be non-negative"));
        }
        if self.initial_feed_valuable < 0.0 || self.initial_feed_waste < 0.0 {
            return Err(ConfigError::Invalid("feed rates must be non-negative"));
        }
        if self.unit.solids_mass() <= 0.0 {
            return Err(ConfigError::Invalid("cell solids hold-up must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_solver_config() {
        let config = SolverConfig::default();
        assert!((config.tolerance - 1e-6).abs() < 1e-15);
        assert_eq!(config.max_iterations, 1000);
        assert!((config.initial_feed_valuable - 10.0).abs() < 1e-12);
        assert!((config.initial_feed_waste - 100.0).abs() < 1e-12);
        assert!((config.value_weight - 100.0).abs() < 1e-12);
        assert!((config.waste_penalty - 500.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_solids_mass() {
        assert!((UnitParameters::default().solids_mass() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_recoveries_bounds() {
        let p = UnitParameters::default();
        for tau in [0.0, 1.0, 27.27, 1e3, 1e9] {
            let (rv, rw) = p.recoveries(tau);
            assert!((0.0..1.0).contains(&rv));
            assert!((0.0..1.0).contains(&rw));
            assert!(rv >= rw, "valuable recovers faster than waste at tau={tau}");
        }
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let config = SolverConfig::default().with_tolerance(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_tolerance() {
        let config = SolverConfig::default().with_tolerance(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_feed() {
        let config = SolverConfig::default().with_feed(-1.0, 100.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_cell() {
        let unit = UnitParameters {
            volume: 0.0,
            ..UnitParameters::default()
        };
        let config = SolverConfig::default().with_unit_parameters(unit);
        assert!(config.validate().is_err());
    }
}
