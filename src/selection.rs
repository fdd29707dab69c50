//! Selection strategies.
//!
//! Selection picks the parents of the next generation. All strategies
//! assume **minimization** and only sample valid individuals: an individual
//! whose evaluation failed is never chosen while at least one valid
//! individual exists. When none is valid, selection degrades to a uniform
//! draw over the whole population.
//!
//! Strategies read the population through a shared slice, so any number of
//! threads may select from the same generation at once.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::genome::Genome;
use crate::individual::Individual;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_genetic::Selection;
///
/// // Tournament with 3 participants (the default)
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Draw `k` valid individuals uniformly with replacement, keep the best.
    ///
    /// Higher `k` means stronger selection pressure. `k` must be at least 2.
    Tournament(usize),

    /// Fitness-proportionate selection on inverted fitness
    /// (`weight = max - f + ε`).
    Roulette,

    /// Linear rank selection: the best of `n` valid individuals has weight
    /// `n`, the worst weight 1.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from `population`.
    ///
    /// For repeated draws from the same generation, prepare the pool once
    /// with [`Candidates::new`] and call [`Selection::select_from`].
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<G: Genome, R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> usize {
        self.select_from(&Candidates::new(population), rng)
    }

    /// Selects a parent index from a prepared pool.
    pub fn select_from<G: Genome, R: Rng>(
        &self,
        candidates: &Candidates<'_, G>,
        rng: &mut R,
    ) -> usize {
        let population = candidates.population;
        let ranked = &candidates.ranked;
        if ranked.is_empty() {
            return rng.random_range(0..population.len());
        }

        match self {
            Selection::Tournament(k) => tournament(population, ranked, *k, rng),
            Selection::Roulette => roulette(population, ranked, rng),
            Selection::Rank => rank(ranked, rng),
        }
    }
}

/// The valid individuals of one generation, ranked best first.
///
/// Built once per generation and shared by every selection draw.
#[derive(Debug, Clone)]
pub struct Candidates<'a, G> {
    population: &'a [Individual<G>],
    ranked: Vec<usize>,
}

impl<'a, G: Genome> Candidates<'a, G> {
    /// Collects and ranks the valid individuals of `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn new(population: &'a [Individual<G>]) -> Self {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let mut ranked: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| ind.is_valid())
            .map(|(i, _)| i)
            .collect();
        ranked.sort_by(|&a, &b| population[a].rank_cmp(&population[b]));
        Self { population, ranked }
    }

    /// Number of valid individuals.
    pub fn valid(&self) -> usize {
        self.ranked.len()
    }
}

fn tournament<G: Genome, R: Rng>(
    population: &[Individual<G>],
    candidates: &[usize],
    k: usize,
    rng: &mut R,
) -> usize {
    let n = candidates.len();
    let mut best = candidates[rng.random_range(0..n)];
    for _ in 1..k.max(1) {
        let idx = candidates[rng.random_range(0..n)];
        if population[idx].fitness() < population[best].fitness() {
            best = idx;
        }
    }
    best
}

fn roulette<G: Genome, R: Rng>(
    population: &[Individual<G>],
    candidates: &[usize],
    rng: &mut R,
) -> usize {
    if candidates.len() == 1 {
        return candidates[0];
    }

    let max_fitness = candidates
        .iter()
        .map(|&i| population[i].fitness())
        .fold(f64::NEG_INFINITY, f64::max);

    let epsilon = 1e-10;
    let weights: Vec<f64> = candidates
        .iter()
        .map(|&i| (max_fitness - population[i].fitness() + epsilon).max(epsilon))
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return candidates[rng.random_range(0..candidates.len())];
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (&idx, &w) in candidates.iter().zip(weights.iter()) {
        cumulative += w;
        if cumulative > threshold {
            return idx;
        }
    }

    candidates[candidates.len() - 1] // floating-point fallback
}

fn rank<R: Rng>(ranked: &[usize], rng: &mut R) -> usize {
    let n = ranked.len();
    if n == 1 {
        return ranked[0];
    }

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (position, &idx) in ranked.iter().enumerate() {
        cumulative += (n - position) as f64;
        if cumulative > threshold {
            return idx;
        }
    }

    ranked[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationFailure;
    use crate::genome::RealVector;
    use crate::random::create_rng;
    use std::sync::Arc;

    type Objective = fn(&[f64]) -> std::result::Result<f64, EvaluationFailure>;

    /// Identity on the first gene; negative values are out of domain.
    fn first_gene(genes: &[f64]) -> std::result::Result<f64, EvaluationFailure> {
        if genes[0] < 0.0 {
            Err(EvaluationFailure::new("negative"))
        } else {
            Ok(genes[0])
        }
    }

    fn make_population(values: &[f64]) -> Vec<Individual<RealVector<Objective>>> {
        let objective = Arc::new(first_gene as Objective);
        values
            .iter()
            .map(|&v| {
                let mut ind = Individual::new(RealVector::new(vec![v], objective.clone()));
                ind.evaluate();
                ind
            })
            .collect()
    }

    fn histogram(sel: Selection, pop: &[Individual<RealVector<Objective>>]) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10_000 {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = histogram(Selection::Tournament(4), &pop);
        assert!(
            counts[2] > 6000,
            "expected best to be selected >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_equal_fitness_is_uniform() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let counts = histogram(Selection::Tournament(2), &pop);
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = histogram(Selection::Roulette, &pop);
        assert!(counts[2] > counts[0], "got {counts:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = histogram(Selection::Rank, &pop);
        assert!(counts[2] > counts[0], "got {counts:?}");
    }

    #[test]
    fn test_invalid_individuals_never_selected() {
        let pop = make_population(&[-1.0, 3.0, -2.0, 7.0]);
        for sel in [Selection::Tournament(2), Selection::Roulette, Selection::Rank] {
            let counts = histogram(sel, &pop);
            assert_eq!(counts[0], 0, "{sel:?} picked an invalid individual");
            assert_eq!(counts[2], 0, "{sel:?} picked an invalid individual");
        }
    }

    #[test]
    fn test_all_invalid_falls_back_to_uniform() {
        let pop = make_population(&[-1.0, -2.0, -3.0]);
        let counts = histogram(Selection::Tournament(3), &pop);
        for &c in &counts {
            assert!(c > 2500, "expected uniform fallback, got {counts:?}");
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
    }

    #[test]
    fn test_candidates_ranked_once() {
        let pop = make_population(&[4.0, -1.0, 2.0, 9.0]);
        let candidates = Candidates::new(&pop);
        assert_eq!(candidates.valid(), 3);
        assert_eq!(candidates.ranked, vec![2, 0, 3]);

        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for sel in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
            for _ in 0..100 {
                assert_eq!(
                    sel.select_from(&candidates, &mut a),
                    sel.select(&pop, &mut b)
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Individual<RealVector<Objective>>> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, &mut rng);
    }
}
