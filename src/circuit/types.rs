//! Circuit data model: units, chromosomes, and the circuit that binds them.

use std::fmt;

use super::config::{SolverConfig, UnitParameters};
use super::error::CircuitError;

/// Number of flotation units in every circuit.
pub const NUM_UNITS: usize = 10;

/// Destination index meaning "leaves as final concentrate".
pub const CONCENTRATE_EXIT: usize = NUM_UNITS;

/// Destination index meaning "leaves as final tailings".
pub const TAILINGS_EXIT: usize = NUM_UNITS + 1;

/// Number of genes in a chromosome: the feed plus two targets per unit.
pub const CHROMOSOME_LEN: usize = 2 * NUM_UNITS + 1;

/// Below this `total_feed / UNDERFLOW_SCALE` a unit is treated as empty.
const UNDERFLOW_GUARD: f64 = 1e-10;
const UNDERFLOW_SCALE: f64 = 3000.0;

/// Feed assigned to both components of an empty unit.
const FEED_FLOOR: f64 = 1e-7;

/// Where a stream goes, decoded from a raw target gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Into the feed of another unit.
    Unit(usize),
    /// Out of the circuit as final concentrate.
    Concentrate,
    /// Out of the circuit as final tailings.
    Tailings,
    /// Beyond both terminals; never legal.
    Invalid(usize),
}

impl Route {
    /// Decodes a raw target index.
    pub fn of(target: usize) -> Self {
        match target {
            t if t < NUM_UNITS => Route::Unit(t),
            CONCENTRATE_EXIT => Route::Concentrate,
            TAILINGS_EXIT => Route::Tailings,
            t => Route::Invalid(t),
        }
    }
}

/// Flat integer encoding of a circuit topology.
///
/// Gene 0 is the feed unit. For unit `i`, gene `2i + 1` is its concentrate
/// target and gene `2i + 2` its tailings target. Always exactly
/// [`CHROMOSOME_LEN`] genes long; the gene slice can be edited in place but
/// never resized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome(Vec<usize>);

impl Chromosome {
    /// Wraps a gene vector, checking its length.
    pub fn new(genes: Vec<usize>) -> Result<Self, CircuitError> {
        if genes.len() != CHROMOSOME_LEN {
            return Err(CircuitError::ChromosomeLength {
                expected: CHROMOSOME_LEN,
                actual: genes.len(),
            });
        }
        Ok(Self(genes))
    }

    /// Copies genes from a slice, checking its length.
    pub fn from_slice(genes: &[usize]) -> Result<Self, CircuitError> {
        Self::new(genes.to_vec())
    }

    /// The gene sequence.
    pub fn genes(&self) -> &[usize] {
        &self.0
    }

    /// Mutable view of the genes. Length stays fixed.
    pub fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Index of the unit receiving the external feed.
    pub fn feed(&self) -> usize {
        self.0[0]
    }

    /// Concentrate target of unit `i`.
    pub fn concentrate_target(&self, i: usize) -> usize {
        self.0[2 * i + 1]
    }

    /// Tailings target of unit `i`.
    pub fn tailings_target(&self, i: usize) -> usize {
        self.0[2 * i + 2]
    }

    /// Consumes the chromosome and returns its genes.
    pub fn into_genes(self) -> Vec<usize> {
        self.0
    }
}

impl TryFrom<Vec<usize>> for Chromosome {
    type Error = CircuitError;

    fn try_from(genes: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(genes)
    }
}

impl From<[usize; CHROMOSOME_LEN]> for Chromosome {
    fn from(genes: [usize; CHROMOSOME_LEN]) -> Self {
        Self(genes.to_vec())
    }
}

impl AsRef<[usize]> for Chromosome {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, g) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{g}")?;
        }
        Ok(())
    }
}

/// A single flotation cell.
///
/// Holds its routing, the traversal mark, and the flows of the current
/// solver iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Unit {
    pub concentrate_target: usize,
    pub tailings_target: usize,

    /// Traversal mark; only meaningful right after a validity check.
    pub visited: bool,

    pub feed_valuable: f64,
    pub feed_waste: f64,
    pub feed_valuable_prev: f64,
    pub feed_waste_prev: f64,

    pub out_concentrate_valuable: f64,
    pub out_concentrate_waste: f64,
    pub out_tailings_valuable: f64,
    pub out_tailings_waste: f64,
}

impl Unit {
    /// Creates a unit with the given routing and no flow.
    pub fn new(concentrate_target: usize, tailings_target: usize) -> Self {
        Self {
            concentrate_target,
            tailings_target,
            ..Self::default()
        }
    }

    /// Total feed rate of both components.
    pub fn total_feed(&self) -> f64 {
        self.feed_valuable + self.feed_waste
    }

    /// Lifts a near-empty feed to a small positive floor.
    ///
    /// Keeps the residence time finite for units that receive no flow.
    pub fn guard_underflow(&mut self) {
        if self.total_feed() / UNDERFLOW_SCALE < UNDERFLOW_GUARD {
            self.feed_valuable = FEED_FLOOR;
            self.feed_waste = FEED_FLOOR;
        }
    }

    /// Splits the current feed into concentrate and tailings streams.
    ///
    /// Afterwards the feed is moved into the `*_prev` snapshot and zeroed,
    /// ready to be rebuilt from the inflows of the next iteration.
    pub fn split(&mut self, params: &UnitParameters) {
        let tau = params.solids_mass() / self.total_feed();
        let (r_valuable, r_waste) = params.recoveries(tau);

        self.out_concentrate_valuable = self.feed_valuable * r_valuable;
        self.out_concentrate_waste = self.feed_waste * r_waste;
        self.out_tailings_valuable = self.feed_valuable * (1.0 - r_valuable);
        self.out_tailings_waste = self.feed_waste * (1.0 - r_waste);

        self.feed_valuable_prev = self.feed_valuable;
        self.feed_waste_prev = self.feed_waste;
        self.feed_valuable = 0.0;
        self.feed_waste = 0.0;
    }

    /// Largest absolute change of either feed component since the last split.
    pub fn feed_change(&self) -> f64 {
        (self.feed_valuable - self.feed_valuable_prev)
            .abs()
            .max((self.feed_waste - self.feed_waste_prev).abs())
    }
}

/// A fixed-size circuit of [`NUM_UNITS`] units built from a [`Chromosome`].
///
/// The circuit is a transient, exclusively owned view: the optimizer keeps
/// chromosomes and rebuilds a circuit whenever one must be checked or scored.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub(crate) units: [Unit; NUM_UNITS],
    pub(crate) feed_unit: usize,
    pub(crate) reaches_concentrate_exit: bool,
    pub(crate) reaches_tailings_exit: bool,
    pub(crate) config: SolverConfig,
}

impl Circuit {
    /// Builds a circuit with the default solver configuration.
    pub fn new(chromosome: &Chromosome) -> Self {
        Self::with_config(chromosome, SolverConfig::default())
    }

    /// Builds a circuit, capturing `config` for later evaluation.
    pub fn with_config(chromosome: &Chromosome, config: SolverConfig) -> Self {
        let mut units = [Unit::default(); NUM_UNITS];
        for (i, unit) in units.iter_mut().enumerate() {
            *unit = Unit::new(
                chromosome.concentrate_target(i),
                chromosome.tailings_target(i),
            );
        }
        Self {
            units,
            feed_unit: chromosome.feed(),
            reaches_concentrate_exit: false,
            reaches_tailings_exit: false,
            config,
        }
    }

    /// Builds a circuit straight from a gene slice.
    pub fn from_genes(genes: &[usize]) -> Result<Self, CircuitError> {
        Ok(Self::new(&Chromosome::from_slice(genes)?))
    }

    /// The units, indexed by position.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Index of the unit receiving the external feed.
    pub fn feed_unit(&self) -> usize {
        self.feed_unit
    }

    /// Whether the last validity traversal reached the concentrate exit.
    pub fn reaches_concentrate_exit(&self) -> bool {
        self.reaches_concentrate_exit
    }

    /// Whether the last validity traversal reached the tailings exit.
    pub fn reaches_tailings_exit(&self) -> bool {
        self.reaches_tailings_exit
    }

    /// Solver configuration captured at construction.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_decoding() {
        assert_eq!(Route::of(0), Route::Unit(0));
        assert_eq!(Route::of(NUM_UNITS - 1), Route::Unit(NUM_UNITS - 1));
        assert_eq!(Route::of(CONCENTRATE_EXIT), Route::Concentrate);
        assert_eq!(Route::of(TAILINGS_EXIT), Route::Tailings);
        assert_eq!(Route::of(TAILINGS_EXIT + 1), Route::Invalid(TAILINGS_EXIT + 1));
    }

    #[test]
    fn test_chromosome_length_checked() {
        assert!(Chromosome::new(vec![0; CHROMOSOME_LEN]).is_ok());
        let err = Chromosome::new(vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            CircuitError::ChromosomeLength {
                expected: CHROMOSOME_LEN,
                actual: 5
            }
        );
        assert!(Chromosome::try_from(vec![0; CHROMOSOME_LEN + 1]).is_err());
    }

    #[test]
    fn test_chromosome_accessors() {
        let genes: Vec<usize> = (0..CHROMOSOME_LEN).collect();
        let c = Chromosome::new(genes).unwrap();
        assert_eq!(c.feed(), 0);
        assert_eq!(c.concentrate_target(0), 1);
        assert_eq!(c.tailings_target(0), 2);
        assert_eq!(c.concentrate_target(NUM_UNITS - 1), 2 * NUM_UNITS - 1);
        assert_eq!(c.tailings_target(NUM_UNITS - 1), 2 * NUM_UNITS);
    }

    #[test]
    fn test_chromosome_conversions() {
        let genes: Vec<usize> = (0..CHROMOSOME_LEN).map(|g| g % 12).collect();
        let c = Chromosome::try_from(genes.clone()).unwrap();
        let view: &[usize] = c.as_ref();
        assert_eq!(view, c.genes());
        assert_eq!(c.into_genes(), genes);
    }

    #[test]
    fn test_chromosome_display() {
        let c = Chromosome::from([
            0, 1, 11, 2, 11, 3, 11, 4, 11, 5, 11, 6, 11, 7, 11, 8, 11, 9, 11, 10, 11,
        ]);
        assert_eq!(
            c.to_string(),
            "0 1 11 2 11 3 11 4 11 5 11 6 11 7 11 8 11 9 11 10 11"
        );
    }

    #[test]
    fn test_circuit_reads_routing() {
        let genes: Vec<usize> = (0..CHROMOSOME_LEN).map(|g| g % 12).collect();
        let circuit = Circuit::from_genes(&genes).unwrap();
        assert_eq!(circuit.feed_unit(), 0);
        assert_eq!(circuit.units()[0].concentrate_target, 1);
        assert_eq!(circuit.units()[0].tailings_target, 2);
        assert_eq!(circuit.units()[5].concentrate_target, 11);
        assert_eq!(circuit.units()[5].tailings_target, 0);
    }

    #[test]
    fn test_unit_split_conserves_mass() {
        let params = UnitParameters::default();
        let mut unit = Unit::new(CONCENTRATE_EXIT, TAILINGS_EXIT);
        unit.feed_valuable = 10.0;
        unit.feed_waste = 100.0;
        unit.split(&params);

        let valuable = unit.out_concentrate_valuable + unit.out_tailings_valuable;
        let waste = unit.out_concentrate_waste + unit.out_tailings_waste;
        assert!((valuable - 10.0).abs() < 1e-12);
        assert!((waste - 100.0).abs() < 1e-12);
        assert!(unit.out_concentrate_valuable / 10.0 > unit.out_concentrate_waste / 100.0);

        assert_eq!(unit.feed_valuable, 0.0);
        assert_eq!(unit.feed_waste, 0.0);
        assert_eq!(unit.feed_valuable_prev, 10.0);
        assert_eq!(unit.feed_waste_prev, 100.0);
    }

    #[test]
    fn test_unit_underflow_guard() {
        let mut unit = Unit::default();
        unit.guard_underflow();
        assert_eq!(unit.feed_valuable, FEED_FLOOR);
        assert_eq!(unit.feed_waste, FEED_FLOOR);

        let mut busy = Unit::default();
        busy.feed_valuable = 1.0;
        busy.guard_underflow();
        assert_eq!(busy.feed_valuable, 1.0);
        assert_eq!(busy.feed_waste, 0.0);
    }
}
