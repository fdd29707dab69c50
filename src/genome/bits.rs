//! Fixed-length bit-string genome.

use super::{check_dimensions, finite_fitness, Genome, Objective};
use crate::error::{EvaluationFailure, Result};
use crate::operators::{flip_mutation, one_point_crossover, probability};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// A bit string scored by a shared objective.
///
/// Mutation flips each bit with probability `bit_rate` (default `1/n`);
/// crossover is [`one_point_crossover`].
pub struct BitString<O> {
    bits: Vec<bool>,
    objective: Arc<O>,
    bit_rate: f64,
}

impl<O: Objective<bool>> BitString<O> {
    /// Wraps existing bits.
    pub fn new(bits: Vec<bool>, objective: Arc<O>) -> Self {
        let bit_rate = 1.0 / bits.len().max(1) as f64;
        Self {
            bits,
            objective,
            bit_rate,
        }
    }

    /// Creates `n` fair coin flips.
    pub fn random<R: Rng>(n: usize, objective: Arc<O>, rng: &mut R) -> Self {
        Self::new((0..n).map(|_| rng.random_bool(0.5)).collect(), objective)
    }

    /// Sets the per-bit flip probability (clamped to `[0, 1]`, NaN as 0).
    pub fn with_bit_rate(mut self, rate: f64) -> Self {
        self.bit_rate = probability(rate);
        self
    }

    /// The bits.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl<O> Clone for BitString<O> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            objective: Arc::clone(&self.objective),
            bit_rate: self.bit_rate,
        }
    }
}

impl<O> fmt::Debug for BitString<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: String = self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        f.debug_tuple("BitString").field(&rendered).finish()
    }
}

impl<O: Objective<bool>> Genome for BitString<O> {
    fn evaluate(&self) -> std::result::Result<f64, EvaluationFailure> {
        finite_fitness(self.objective.evaluate(&self.bits)?)
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        flip_mutation(&mut self.bits, self.bit_rate, rng);
    }

    fn crossover<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<()> {
        check_dimensions(self, other)?;
        one_point_crossover(&mut self.bits, &mut other.bits, rng);
        Ok(())
    }

    fn dimension(&self) -> usize {
        self.bits.len()
    }
}
