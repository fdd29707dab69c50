//! Ring migration between populations.

use crate::genome::Genome;
use crate::individual::Individual;
use crate::population::Population;

/// Periodic exchange of top individuals along a ring `0 → 1 → … → 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migrator {
    /// Generations between migrations.
    pub interval: usize,
    /// Individuals copied from each source to its destination.
    pub size: usize,
}

impl Migrator {
    /// Creates a migrator.
    pub fn new(interval: usize, size: usize) -> Self {
        Self { interval, size }
    }

    /// Whether a migration is due after `generation` completed generations.
    pub fn is_due(&self, generation: usize) -> bool {
        self.interval > 0 && generation > 0 && generation % self.interval == 0
    }

    /// Runs one migration round.
    ///
    /// Every population's emigrants (clones of its best `size` valid
    /// individuals) are collected before any replacement, so individuals
    /// never hop more than one step per round. Each destination loses its
    /// worst individuals, one per arriving migrant; population sizes are
    /// unchanged. A single population is left alone.
    ///
    /// Taking `&mut` to every population gives migration exclusive access
    /// for its duration.
    pub fn migrate<G: Genome>(&self, populations: &mut [Population<G>]) {
        let n = populations.len();
        if n < 2 || self.size == 0 {
            return;
        }

        let emigrants: Vec<Vec<Individual<G>>> = populations
            .iter()
            .map(|pop| {
                pop.ranked_indices()
                    .into_iter()
                    .take(self.size)
                    .map(|i| pop.individuals()[i].clone())
                    .filter(Individual::is_valid)
                    .collect()
            })
            .collect();

        for (source, migrants) in emigrants.into_iter().enumerate() {
            let destination = &mut populations[(source + 1) % n];
            let worst_first: Vec<usize> = destination.ranked_indices().into_iter().rev().collect();
            log::trace!(
                "migrating {} individuals from population {} to {}",
                migrants.len(),
                source,
                destination.id()
            );
            for (slot, migrant) in worst_first.into_iter().zip(migrants) {
                destination.set(slot, migrant);
            }
        }
    }
}
