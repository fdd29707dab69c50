//! Populations and per-generation statistics.

use crate::error::{GaError, Result};
use crate::genome::{Genome, GenomeFactory};
use crate::individual::Individual;
use crate::random::GaRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An ordered collection of individuals evolved together.
///
/// All individuals share one genome type (enforced by `G`) and one
/// dimensionality (checked by [`Population::from_factory`]).
#[derive(Debug, Clone)]
pub struct Population<G> {
    id: usize,
    individuals: Vec<Individual<G>>,
    generation: usize,
}

impl<G: Genome> Population<G> {
    /// Creates `size` individuals from `factory`.
    ///
    /// Returns [`GaError::IncompatibleGenomes`] if the factory produces
    /// genomes of differing dimensionality.
    pub fn from_factory<F: GenomeFactory<G> + ?Sized>(
        id: usize,
        size: usize,
        factory: &F,
        rng: &mut GaRng,
    ) -> Result<Self> {
        let individuals: Vec<Individual<G>> = (0..size)
            .map(|_| Individual::new(factory.create(rng)))
            .collect();

        if let Some(first) = individuals.first() {
            let expected = first.genome().dimension();
            if let Some(odd) = individuals
                .iter()
                .find(|ind| ind.genome().dimension() != expected)
            {
                return Err(GaError::IncompatibleGenomes {
                    expected,
                    found: odd.genome().dimension(),
                });
            }
        }

        Ok(Self {
            id,
            individuals,
            generation: 0,
        })
    }

    /// Index of this population within the engine.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The individuals, in population order.
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population has no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates every stale individual.
    pub fn evaluate(&mut self, parallel: bool) {
        evaluate_all(&mut self.individuals, parallel);
    }

    /// Whether every individual has an up-to-date fitness.
    pub fn is_evaluated(&self) -> bool {
        self.individuals.iter().all(Individual::is_evaluated)
    }

    /// The best valid individual, if any.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals
            .iter()
            .filter(|ind| ind.is_valid())
            .min_by(|a, b| a.rank_cmp(b))
    }

    /// Indices sorted best first (invalid individuals last).
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.individuals.len()).collect();
        indices.sort_by(|&a, &b| self.individuals[a].rank_cmp(&self.individuals[b]));
        indices
    }

    /// Swaps in a complete new generation and advances the counter.
    ///
    /// The replacement is all-or-nothing: callers build `next` in full
    /// before handing it over.
    pub(crate) fn replace(&mut self, next: Vec<Individual<G>>) {
        debug_assert_eq!(next.len(), self.individuals.len());
        self.individuals = next;
        self.generation += 1;
    }

    /// Overwrites the individual at `index`.
    pub(crate) fn set(&mut self, index: usize, individual: Individual<G>) {
        self.individuals[index] = individual;
    }

    /// Summary statistics over the valid individuals.
    pub fn stats(&self) -> GenerationStats {
        let valid: Vec<f64> = self
            .individuals
            .iter()
            .filter(|ind| ind.is_valid())
            .map(Individual::fitness)
            .collect();
        let invalid = self.individuals.len() - valid.len();

        if valid.is_empty() {
            return GenerationStats {
                population: self.id,
                generation: self.generation,
                best: f64::INFINITY,
                mean: f64::INFINITY,
                worst: f64::INFINITY,
                invalid,
            };
        }

        let best = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = valid.iter().sum::<f64>() / valid.len() as f64;
        GenerationStats {
            population: self.id,
            generation: self.generation,
            best,
            mean,
            worst,
            invalid,
        }
    }
}

/// Fitness summary of one population at one generation.
///
/// `best`, `mean` and `worst` are computed over valid individuals and are
/// `f64::INFINITY` when there are none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Population index.
    pub population: usize,
    /// Generation the statistics describe.
    pub generation: usize,
    /// Lowest fitness.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Highest fitness.
    pub worst: f64,
    /// Individuals whose evaluation failed.
    pub invalid: usize,
}

/// Evaluates every stale individual, across rayon's pool when `parallel`.
pub(crate) fn evaluate_all<G: Genome>(individuals: &mut [Individual<G>], parallel: bool) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            individuals.par_iter_mut().for_each(Individual::evaluate);
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    individuals.iter_mut().for_each(Individual::evaluate);
}
