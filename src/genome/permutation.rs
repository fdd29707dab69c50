//! Permutation genome for ordering problems.

use super::{check_dimensions, finite_fitness, Genome, Objective};
use crate::error::{EvaluationFailure, Result};
use crate::operators::{insert_mutation, invert_mutation, order_crossover, swap_mutation};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// An ordering of `0..n` scored by a shared objective.
///
/// Mutation applies one of swap, insert, or invert, chosen uniformly.
/// Crossover is order crossover (OX).
pub struct Permutation<O> {
    order: Vec<usize>,
    objective: Arc<O>,
}

impl<O: Objective<usize>> Permutation<O> {
    /// Wraps an existing ordering.
    ///
    /// # Panics
    /// Panics if `order` is not a permutation of `0..order.len()`.
    pub fn new(order: Vec<usize>, objective: Arc<O>) -> Self {
        let mut seen = vec![false; order.len()];
        for &v in &order {
            assert!(
                v < order.len() && !seen[v],
                "order must be a permutation of 0..n"
            );
            seen[v] = true;
        }
        Self { order, objective }
    }

    /// Creates a uniformly shuffled ordering of `0..n`.
    pub fn random<R: Rng>(n: usize, objective: Arc<O>, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self { order, objective }
    }

    /// The ordering.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl<O> Clone for Permutation<O> {
    fn clone(&self) -> Self {
        Self {
            order: self.order.clone(),
            objective: Arc::clone(&self.objective),
        }
    }
}

impl<O> fmt::Debug for Permutation<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Permutation").field(&self.order).finish()
    }
}

impl<O: Objective<usize>> Genome for Permutation<O> {
    fn evaluate(&self) -> std::result::Result<f64, EvaluationFailure> {
        finite_fitness(self.objective.evaluate(&self.order)?)
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        match rng.random_range(0..3) {
            0 => swap_mutation(&mut self.order, rng),
            1 => insert_mutation(&mut self.order, rng),
            _ => invert_mutation(&mut self.order, rng),
        }
    }

    fn crossover<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<()> {
        check_dimensions(self, other)?;
        order_crossover(&mut self.order, &mut other.order, rng);
        Ok(())
    }

    fn dimension(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    type Displacement = fn(&[usize]) -> std::result::Result<f64, EvaluationFailure>;

    /// Sum of distances from the identity ordering; 0 when sorted.
    fn displacement(order: &[usize]) -> std::result::Result<f64, EvaluationFailure> {
        Ok(order
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 - v as f64).abs())
            .sum())
    }

    fn is_permutation(order: &[usize]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &v)| i == v)
    }

    #[test]
    fn test_identity_scores_zero() {
        let genome = Permutation::new((0..6).collect(), Arc::new(displacement as Displacement));
        assert_eq!(genome.evaluate(), Ok(0.0));
    }

    #[test]
    #[should_panic(expected = "order must be a permutation")]
    fn test_new_rejects_duplicates() {
        Permutation::new(vec![0, 0, 1], Arc::new(displacement as Displacement));
    }

    #[test]
    fn test_operators_keep_permutation() {
        let mut rng = create_rng(42);
        let objective = Arc::new(displacement as Displacement);
        for _ in 0..100 {
            let mut a = Permutation::random(9, objective.clone(), &mut rng);
            let mut b = Permutation::random(9, objective.clone(), &mut rng);
            a.crossover(&mut b, &mut rng).unwrap();
            a.mutate(&mut rng);
            b.mutate(&mut rng);
            assert!(is_permutation(a.order()), "{a:?}");
            assert!(is_permutation(b.order()), "{b:?}");
        }
    }
}
