//! Fitness-proportionate parent selection.
//!
//! Scores are maximized. Each individual's weight is its score clipped at
//! zero, so non-convergent and losing circuits are never drawn while any
//! positive-scoring individual exists. When no weight is positive the wheel
//! degenerates to uniform selection.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, §1.4 (roulette wheel)

use rand::Rng;

/// Roulette-wheel selection over `scores`.
///
/// Draws `u` uniformly in `[0, 1)` and returns the first index whose
/// normalized cumulative weight reaches `u`. Ties resolve to the lowest
/// index.
///
/// # Panics
/// Panics if `scores` is empty.
pub fn roulette<R: Rng>(scores: &[f64], rng: &mut R) -> usize {
    assert!(!scores.is_empty(), "cannot select from empty population");

    let total: f64 = scores.iter().map(|&s| weight(s)).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..scores.len());
    }

    let threshold = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &s) in scores.iter().enumerate() {
        let w = weight(s);
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if cumulative >= threshold {
            return i;
        }
    }

    last_positive // floating-point fallback
}

/// Selects two distinct parents `(father, mother)`.
///
/// The mother is re-drawn until she differs from the father. If fewer than
/// two individuals carry positive weight the redraw could never succeed, so
/// the mother is then drawn uniformly from the rest.
///
/// # Panics
/// Panics if fewer than two individuals are given.
pub fn select_parents<R: Rng>(scores: &[f64], rng: &mut R) -> (usize, usize) {
    assert!(scores.len() >= 2, "need at least two individuals to mate");

    let father = roulette(scores, rng);
    let positive = scores.iter().filter(|&&s| weight(s) > 0.0).count();

    let mother = if positive >= 2 {
        loop {
            let m = roulette(scores, rng);
            if m != father {
                break m;
            }
        }
    } else {
        let m = rng.random_range(0..scores.len() - 1);
        if m >= father {
            m + 1
        } else {
            m
        }
    };

    (father, mother)
}

fn weight(score: f64) -> f64 {
    if score > 0.0 {
        score
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_roulette_proportional() {
        let scores = [100.0, 300.0, 600.0];
        let mut rng = create_rng(42);

        let mut counts = [0u32; 3];
        let n = 20_000;
        for _ in 0..n {
            counts[roulette(&scores, &mut rng)] += 1;
        }
        let share = |c: u32| c as f64 / n as f64;
        assert!((share(counts[0]) - 0.1).abs() < 0.02, "{counts:?}");
        assert!((share(counts[1]) - 0.3).abs() < 0.02, "{counts:?}");
        assert!((share(counts[2]) - 0.6).abs() < 0.02, "{counts:?}");
    }

    #[test]
    fn test_roulette_skips_non_positive() {
        let scores = [-50_000.0, 0.0, 10.0, -3.0];
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            assert_eq!(roulette(&scores, &mut rng), 2);
        }
    }

    #[test]
    fn test_roulette_degenerate_is_uniform() {
        let scores = [-50_000.0, -1.0, 0.0, -7.0];
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10_000;
        for _ in 0..n {
            counts[roulette(&scores, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_single_individual() {
        let mut rng = create_rng(42);
        assert_eq!(roulette(&[5.0], &mut rng), 0);
        assert_eq!(roulette(&[-5.0], &mut rng), 0);
    }

    #[test]
    fn test_parents_are_distinct() {
        let scores = [10.0, 900.0, 20.0, 70.0];
        let mut rng = create_rng(11);
        for _ in 0..1000 {
            let (f, m) = select_parents(&scores, &mut rng);
            assert_ne!(f, m);
        }
    }

    #[test]
    fn test_parents_with_single_positive() {
        let scores = [-50_000.0, 80.0, -50_000.0];
        let mut rng = create_rng(11);
        for _ in 0..200 {
            let (f, m) = select_parents(&scores, &mut rng);
            assert_eq!(f, 1);
            assert_ne!(m, 1);
            assert!(m < 3);
        }
    }

    #[test]
    fn test_parents_all_degenerate() {
        let scores = [0.0, 0.0];
        let mut rng = create_rng(5);
        for _ in 0..100 {
            let (f, m) = select_parents(&scores, &mut rng);
            assert_ne!(f, m);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        let empty: [f64; 0] = [];
        roulette(&empty, &mut rng);
    }

    #[test]
    #[should_panic(expected = "need at least two individuals to mate")]
    fn test_single_parent_panics() {
        let mut rng = create_rng(42);
        select_parents(&[1.0], &mut rng);
    }
}
