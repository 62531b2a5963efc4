//! Population storage: chromosomes paired by index with their scores.

use super::types::GaProblem;
use crate::circuit::Chromosome;

/// An ordered set of chromosomes and a parallel score vector.
///
/// `chromosomes.len() == scores.len()` always. Within a generation built by
/// the runner, slot 0 holds the elite carried over from the previous one.
#[derive(Debug, Clone, Default)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    scores: Vec<f64>,
}

impl Population {
    /// Creates an empty population with room for `n` individuals.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            chromosomes: Vec::with_capacity(n),
            scores: Vec::with_capacity(n),
        }
    }

    /// Creates `n` copies of `elite`, the fallback content of a new generation.
    pub fn seeded(elite: &Chromosome, score: f64, n: usize) -> Self {
        Self {
            chromosomes: vec![elite.clone(); n],
            scores: vec![score; n],
        }
    }

    /// Appends an individual.
    pub fn push(&mut self, chromosome: Chromosome, score: f64) {
        self.chromosomes.push(chromosome);
        self.scores.push(score);
    }

    /// Overwrites slot `i`.
    pub fn set(&mut self, i: usize, chromosome: Chromosome, score: f64) {
        self.chromosomes[i] = chromosome;
        self.scores[i] = score;
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Index of the highest score; the lowest index wins ties.
    ///
    /// `None` for an empty population.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &s) in self.scores.iter().enumerate() {
            match best {
                Some(b) if s <= self.scores[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// The best chromosome and its score.
    pub fn best(&self) -> Option<(&Chromosome, f64)> {
        self.best_index()
            .map(|i| (&self.chromosomes[i], self.scores[i]))
    }

    /// Mean score, or `0.0` for an empty population.
    ///
    /// Never exceeds the best score.
    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let mean = self.scores.iter().sum::<f64>() / self.scores.len() as f64;
        // Summation rounding can lift the mean of equal scores past them.
        let max = self.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        mean.min(max)
    }

    /// Re-scores every chromosome.
    ///
    /// With `parallel` and the `parallel` feature, chromosomes are scored on
    /// the rayon pool; each task writes only its own score slot.
    pub fn evaluate<P: GaProblem>(&mut self, problem: &P, parallel: bool) {
        score_all(problem, &self.chromosomes, &mut self.scores, parallel);
    }
}

#[cfg(feature = "parallel")]
fn score_all<P: GaProblem>(
    problem: &P,
    chromosomes: &[Chromosome],
    scores: &mut [f64],
    parallel: bool,
) {
    use rayon::prelude::*;

    if parallel {
        scores
            .par_iter_mut()
            .zip(chromosomes.par_iter())
            .for_each(|(score, c)| *score = problem.evaluate(c));
    } else {
        score_serial(problem, chromosomes, scores);
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all<P: GaProblem>(
    problem: &P,
    chromosomes: &[Chromosome],
    scores: &mut [f64],
    _parallel: bool,
) {
    score_serial(problem, chromosomes, scores);
}

fn score_serial<P: GaProblem>(problem: &P, chromosomes: &[Chromosome], scores: &mut [f64]) {
    for (score, c) in scores.iter_mut().zip(chromosomes) {
        *score = problem.evaluate(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CHROMOSOME_LEN;
    use rand::Rng;

    fn chromosome(feed: usize) -> Chromosome {
        let mut genes = [0usize; CHROMOSOME_LEN];
        genes[0] = feed;
        Chromosome::from(genes)
    }

    /// Scores a chromosome by its feed gene.
    struct FeedScore;

    impl GaProblem for FeedScore {
        fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
            chromosome(rng.random_range(0..10))
        }
        fn is_feasible(&self, _c: &Chromosome) -> bool {
            true
        }
        fn evaluate(&self, c: &Chromosome) -> f64 {
            c.feed() as f64 * 10.0
        }
    }

    #[test]
    fn test_best_prefers_lowest_index_on_tie() {
        let mut pop = Population::with_capacity(3);
        pop.push(chromosome(1), 5.0);
        pop.push(chromosome(2), 9.0);
        pop.push(chromosome(3), 9.0);
        assert_eq!(pop.best_index(), Some(1));
        let (c, s) = pop.best().unwrap();
        assert_eq!(c.feed(), 2);
        assert_eq!(s, 9.0);
    }

    #[test]
    fn test_best_all_sentinel() {
        let mut pop = Population::default();
        pop.push(chromosome(1), -50_000.0);
        pop.push(chromosome(2), -50_000.0);
        assert_eq!(pop.best_index(), Some(0));
        assert!(Population::default().best().is_none());
    }

    #[test]
    fn test_seeded_and_set() {
        let mut pop = Population::seeded(&chromosome(4), 40.0, 5);
        assert_eq!(pop.len(), 5);
        assert!(pop.chromosomes().iter().all(|c| c.feed() == 4));
        pop.set(3, chromosome(7), 70.0);
        assert_eq!(pop.best_index(), Some(3));
        assert!((pop.mean_score() - 46.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_aligns_scores() {
        let mut pop = Population::default();
        for feed in [3, 1, 4, 1, 5] {
            pop.push(chromosome(feed), f64::NAN);
        }
        pop.evaluate(&FeedScore, false);
        assert_eq!(pop.scores(), &[30.0, 10.0, 40.0, 10.0, 50.0]);

        let mut par = pop.clone();
        par.evaluate(&FeedScore, true);
        assert_eq!(par.scores(), pop.scores());
    }

    #[test]
    fn test_mean_of_elite_copies_not_above_elite() {
        let elite = 191.387_451_364_400_845_93;
        let pop = Population::seeded(&chromosome(2), elite, 10);
        assert!(pop.mean_score() <= elite);
        assert!((pop.mean_score() - elite).abs() < 1e-9);

        let mut mixed = Population::seeded(&chromosome(2), 0.1, 7);
        mixed.push(chromosome(3), 0.2);
        mixed.push(chromosome(4), 0.3);
        assert!(mixed.mean_score() <= 0.3);
    }

    #[test]
    fn test_empty_mean() {
        assert_eq!(Population::default().mean_score(), 0.0);
        assert!(Population::default().is_empty());
    }
}
