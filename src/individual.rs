//! A genome with its cached fitness.

use crate::error::Result;
use crate::genome::Genome;
use rand::Rng;
use std::cmp::Ordering;

/// A candidate solution in a population.
///
/// The fitness cache is valid only while `evaluated` is `true`; every
/// operation that can change the genome clears it. An individual whose
/// evaluation failed is `evaluated` but not `valid`, and carries
/// `f64::INFINITY` as its fitness so that it sorts last.
#[derive(Debug, Clone)]
pub struct Individual<G> {
    genome: G,
    fitness: f64,
    evaluated: bool,
    valid: bool,
}

impl<G: Genome> Individual<G> {
    /// Wraps a genome with an empty fitness cache.
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: f64::INFINITY,
            evaluated: false,
            valid: false,
        }
    }

    /// The genome.
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Mutable access to the genome. Invalidates the fitness cache.
    pub fn genome_mut(&mut self) -> &mut G {
        self.invalidate();
        &mut self.genome
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genome(self) -> G {
        self.genome
    }

    /// Cached fitness; `f64::INFINITY` when not evaluated or invalid.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Whether the cache reflects the current genome.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Whether the last evaluation succeeded.
    pub fn is_valid(&self) -> bool {
        self.evaluated && self.valid
    }

    /// Evaluates the genome if the cache is stale.
    ///
    /// An [`EvaluationFailure`](crate::EvaluationFailure) is absorbed: the
    /// individual becomes invalid and keeps its place in the population.
    pub fn evaluate(&mut self) {
        if self.evaluated {
            return;
        }
        match self.genome.evaluate() {
            Ok(fitness) => {
                self.fitness = fitness;
                self.valid = true;
            }
            Err(failure) => {
                log::trace!("individual marked invalid: {failure}");
                self.fitness = f64::INFINITY;
                self.valid = false;
            }
        }
        self.evaluated = true;
    }

    /// Mutates the genome and clears the cache.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) {
        self.genome.mutate(rng);
        self.invalidate();
    }

    /// Crosses this individual's genome with `other`'s, clearing both caches.
    ///
    /// On [`IncompatibleGenomes`](crate::GaError::IncompatibleGenomes) both
    /// individuals are left untouched, caches included.
    pub fn crossover<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<()> {
        self.genome.crossover(&mut other.genome, rng)?;
        self.invalidate();
        other.invalidate();
        Ok(())
    }

    /// Ranking order: valid before invalid, then ascending fitness.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .is_valid()
            .cmp(&self.is_valid())
            .then_with(|| {
                self.fitness
                    .partial_cmp(&other.fitness)
                    .unwrap_or(Ordering::Equal)
            })
    }

    fn invalidate(&mut self) {
        self.fitness = f64::INFINITY;
        self.evaluated = false;
        self.valid = false;
    }
}
