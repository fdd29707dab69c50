//! Fixed-length real-valued genome.

use super::{check_dimensions, finite_fitness, Genome, Objective};
use crate::error::{EvaluationFailure, Result};
use crate::operators::{blend_crossover, normal_mutation, probability, uniform_init};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Default per-gene mutation probability.
pub const DEFAULT_GENE_RATE: f64 = 0.8;

/// A real-valued vector scored by a shared objective.
///
/// - Mutation: [`normal_mutation`] with probability `gene_rate` per gene.
/// - Crossover: [`blend_crossover`].
/// - Evaluation: any non-finite gene or objective output is an
///   [`EvaluationFailure`].
///
/// Clones share the objective (`Arc`) but never the genes.
pub struct RealVector<O> {
    genes: Vec<f64>,
    objective: Arc<O>,
    gene_rate: f64,
}

impl<O: Objective<f64>> RealVector<O> {
    /// Wraps existing genes.
    pub fn new(genes: Vec<f64>, objective: Arc<O>) -> Self {
        Self {
            genes,
            objective,
            gene_rate: DEFAULT_GENE_RATE,
        }
    }

    /// Creates `dimension` genes drawn uniformly from `[lower, upper)`.
    pub fn random<R: Rng>(
        dimension: usize,
        lower: f64,
        upper: f64,
        objective: Arc<O>,
        rng: &mut R,
    ) -> Self {
        Self::new(uniform_init(dimension, lower, upper, rng), objective)
    }

    /// Sets the per-gene mutation probability (clamped to `[0, 1]`, NaN as 0).
    pub fn with_gene_rate(mut self, rate: f64) -> Self {
        self.gene_rate = probability(rate);
        self
    }

    /// The genes.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Mutable access to the genes.
    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Per-gene mutation probability.
    pub fn gene_rate(&self) -> f64 {
        self.gene_rate
    }
}

impl<O> Clone for RealVector<O> {
    fn clone(&self) -> Self {
        Self {
            genes: self.genes.clone(),
            objective: Arc::clone(&self.objective),
            gene_rate: self.gene_rate,
        }
    }
}

impl<O> fmt::Debug for RealVector<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealVector")
            .field("genes", &self.genes)
            .field("gene_rate", &self.gene_rate)
            .finish()
    }
}

impl<O: Objective<f64>> Genome for RealVector<O> {
    fn evaluate(&self) -> std::result::Result<f64, EvaluationFailure> {
        if let Some(i) = self.genes.iter().position(|x| !x.is_finite()) {
            return Err(EvaluationFailure::new(format!(
                "gene {i} is not finite ({})",
                self.genes[i]
            )));
        }
        finite_fitness(self.objective.evaluate(&self.genes)?)
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        normal_mutation(&mut self.genes, self.gene_rate, rng);
    }

    fn crossover<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<()> {
        check_dimensions(self, other)?;
        blend_crossover(&mut self.genes, &mut other.genes, rng);
        Ok(())
    }

    fn dimension(&self) -> usize {
        self.genes.len()
    }
}
