//! Bounded, ranked record of the best individuals ever seen.

use crate::error::{GaError, Result};
use crate::genome::Genome;
use crate::individual::Individual;
use parking_lot::RwLock;
use std::sync::Arc;

/// Hall of fame shared between the engine's populations.
///
/// Created with the engine and reset by [`Ga::initialize`](crate::Ga::initialize).
/// The engine takes the write lock once per generation and holds it while
/// every population is considered, in population order.
pub type SharedHallOfFame<G> = Arc<RwLock<HallOfFame<G>>>;

/// The best individuals observed so far, ascending by fitness.
///
/// Entries are independent clones, so replacing a population never
/// affects them. Ties keep insertion order. Once full, a newcomer must be
/// strictly better than the current worst entry, which it evicts.
#[derive(Debug, Clone)]
pub struct HallOfFame<G> {
    entries: Vec<Individual<G>>,
    capacity: usize,
}

impl<G: Genome> HallOfFame<G> {
    /// Creates an empty hall of fame holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "hall of fame capacity must be positive");
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Wraps a new hall of fame in a shared handle.
    pub fn shared(capacity: usize) -> SharedHallOfFame<G> {
        Arc::new(RwLock::new(Self::new(capacity)))
    }

    /// Records a clone of `individual` if it ranks among the best.
    ///
    /// Unevaluated and invalid individuals are ignored. Returns whether
    /// the individual was inserted.
    pub fn consider(&mut self, individual: &Individual<G>) -> bool {
        if !individual.is_valid() {
            return false;
        }
        let fitness = individual.fitness();

        if self.entries.len() >= self.capacity {
            match self.entries.last() {
                Some(worst) if fitness < worst.fitness() => {}
                _ => return false,
            }
        }

        let position = self.entries.partition_point(|e| e.fitness() <= fitness);
        self.entries.insert(position, individual.clone());
        self.entries.truncate(self.capacity);
        true
    }

    /// Considers every individual in order; returns how many were inserted.
    pub fn consider_all<'a, I>(&mut self, individuals: I) -> usize
    where
        I: IntoIterator<Item = &'a Individual<G>>,
        G: 'a,
    {
        individuals
            .into_iter()
            .filter(|ind| self.consider(ind))
            .count()
    }

    /// The best individual ever recorded.
    pub fn best(&self) -> Result<&Individual<G>> {
        self.entries.first().ok_or(GaError::EmptyHallOfFame)
    }

    /// All entries, best first.
    pub fn entries(&self) -> &[Individual<G>] {
        &self.entries
    }

    /// The best `n` entries (fewer if not yet recorded).
    pub fn top(&self, n: usize) -> &[Individual<G>] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationFailure;
    use crate::genome::RealVector;
    use std::sync::Arc;

    type Objective = fn(&[f64]) -> std::result::Result<f64, EvaluationFailure>;

    /// Fitness is the first gene; the second gene tags the individual.
    fn first_gene(genes: &[f64]) -> std::result::Result<f64, EvaluationFailure> {
        if genes[0].is_sign_negative() {
            Err(EvaluationFailure::new("negative"))
        } else {
            Ok(genes[0])
        }
    }

    fn evaluated(fitness: f64, tag: f64) -> Individual<RealVector<Objective>> {
        let genome = RealVector::new(vec![fitness, tag], Arc::new(first_gene as Objective));
        let mut ind = Individual::new(genome);
        ind.evaluate();
        ind
    }

    fn fitnesses(hof: &HallOfFame<RealVector<Objective>>) -> Vec<f64> {
        hof.entries().iter().map(Individual::fitness).collect()
    }

    #[test]
    fn test_empty_best_is_error() {
        let hof: HallOfFame<RealVector<Objective>> = HallOfFame::new(3);
        assert_eq!(hof.best().unwrap_err(), GaError::EmptyHallOfFame);
        assert!(hof.is_empty());
    }

    #[test]
    fn test_keeps_sorted_and_bounded() {
        let mut hof = HallOfFame::new(3);
        for f in [5.0, 3.0, 8.0, 1.0, 4.0, 9.0] {
            hof.consider(&evaluated(f, 0.0));
        }
        assert_eq!(fitnesses(&hof), vec![1.0, 3.0, 4.0]);
        assert_eq!(hof.best().unwrap().fitness(), 1.0);
        assert_eq!(hof.len(), 3);
        assert_eq!(hof.capacity(), 3);
    }

    #[test]
    fn test_fills_before_rejecting() {
        let mut hof = HallOfFame::new(3);
        assert!(hof.consider(&evaluated(9.0, 0.0)));
        assert!(hof.consider(&evaluated(10.0, 0.0)));
        assert!(hof.consider(&evaluated(11.0, 0.0)));
        assert!(!hof.consider(&evaluated(12.0, 0.0)));
        assert!(!hof.consider(&evaluated(11.0, 0.0)), "ties with the worst are rejected");
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut hof = HallOfFame::new(4);
        hof.consider(&evaluated(2.0, 1.0));
        hof.consider(&evaluated(2.0, 2.0));
        hof.consider(&evaluated(1.0, 3.0));
        hof.consider(&evaluated(2.0, 4.0));
        let tags: Vec<f64> = hof.entries().iter().map(|e| e.genome().genes()[1]).collect();
        assert_eq!(tags, vec![3.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_ignores_invalid_and_unevaluated() {
        let mut hof = HallOfFame::new(2);
        assert!(!hof.consider(&evaluated(-1.0, 0.0)));
        let stale = Individual::new(RealVector::new(
            vec![1.0, 0.0],
            Arc::new(first_gene as Objective),
        ));
        assert!(!hof.consider(&stale));
        assert!(hof.is_empty());
    }

    #[test]
    fn test_entries_are_independent_clones() {
        let mut hof = HallOfFame::new(2);
        let mut ind = evaluated(1.0, 0.0);
        hof.consider(&ind);
        ind.genome_mut().genes_mut()[0] = 50.0;
        assert_eq!(hof.best().unwrap().genome().genes()[0], 1.0);
        assert_eq!(hof.best().unwrap().fitness(), 1.0);
    }

    #[test]
    fn test_consider_all_and_top() {
        let mut hof = HallOfFame::new(5);
        let batch: Vec<_> = [4.0, 2.0, 6.0].iter().map(|&f| evaluated(f, 0.0)).collect();
        assert_eq!(hof.consider_all(&batch), 3);
        assert_eq!(hof.top(2).len(), 2);
        assert_eq!(hof.top(10).len(), 3);
        assert_eq!(hof.top(1)[0].fitness(), 2.0);
    }

    #[test]
    fn test_shared_handle() {
        let shared: SharedHallOfFame<RealVector<Objective>> = HallOfFame::shared(2);
        shared.write().consider(&evaluated(3.0, 0.0));
        assert_eq!(shared.read().best().unwrap().fitness(), 3.0);
    }
}
