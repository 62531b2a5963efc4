//! Genetic operators for circuit chromosomes.
//!
//! Genes are routing indices in `0..=TAILINGS_EXIT`. None of these operators
//! preserve topology legality on their own; offspring are re-validated by
//! the runner before admission.
//!
//! - [`random_chromosome`]: feed and targets drawn uniformly, rejecting
//!   self loops and identical targets
//! - [`single_point_crossover`]: swap the prefixes of two chromosomes
//! - [`point_mutation`]: overwrite one gene with a fresh random target

use rand::Rng;

use crate::circuit::{Chromosome, CHROMOSOME_LEN, NUM_UNITS, TAILINGS_EXIT};

/// Draws a random chromosome.
///
/// The feed is uniform over the units. Each unit's targets are uniform over
/// `0..=TAILINGS_EXIT`, re-drawn until neither is the unit itself and the
/// two differ. Reachability and terminal legality are not enforced.
pub fn random_chromosome<R: Rng>(rng: &mut R) -> Chromosome {
    let mut genes = [0usize; CHROMOSOME_LEN];
    genes[0] = rng.random_range(0..NUM_UNITS);

    for i in 0..NUM_UNITS {
        let conc = loop {
            let t = random_target(rng);
            if t != i {
                break t;
            }
        };
        let tails = loop {
            let t = random_target(rng);
            if t != i && t != conc {
                break t;
            }
        };
        genes[2 * i + 1] = conc;
        genes[2 * i + 2] = tails;
    }

    Chromosome::from(genes)
}

/// Single-point crossover: swaps genes `[0, cut)` between the two parents.
///
/// `cut` is uniform over `0..len`, so a zero-length swap is possible.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover<R: Rng>(father: &mut [usize], mother: &mut [usize], rng: &mut R) {
    assert_eq!(father.len(), mother.len(), "parents must have equal length");
    if father.is_empty() {
        return;
    }
    let cut = rng.random_range(0..father.len());
    father[..cut].swap_with_slice(&mut mother[..cut]);
}

/// Point mutation: one random position gets a fresh target in `0..=TAILINGS_EXIT`.
pub fn point_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    if genes.is_empty() {
        return;
    }
    let pos = rng.random_range(0..genes.len());
    genes[pos] = random_target(rng);
}

fn random_target<R: Rng>(rng: &mut R) -> usize {
    rng.random_range(0..=TAILINGS_EXIT)
}

// ============================================================================
// Tests
// ============================================================================
