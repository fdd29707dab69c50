//! Offspring production: selection → crossover → mutation.

use crate::config::GaConfig;
use crate::error::{GaError, Result};
use crate::genome::Genome;
use crate::individual::Individual;
use crate::operators::probability;
use crate::selection::{Candidates, Selection};
use rand::Rng;

/// The genetic operators pipeline.
///
/// For each pair of parents drawn by two independent selections:
///
/// 1. with probability `crossover_rate`, the parents' clones are crossed
///    into two children; otherwise the children are plain clones;
/// 2. each child is mutated with probability `mutation_rate`.
///
/// Children that are never altered keep their parent's fitness cache, so
/// they are not re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    selection: Selection,
    crossover_rate: f64,
    mutation_rate: f64,
    elite_count: usize,
}

impl Pipeline {
    /// Builds a pipeline from explicit operator settings.
    ///
    /// # Errors
    /// [`GaError::Configuration`] if a rate lies outside `[0, 1]` (NaN
    /// included) or a tournament has fewer than two participants.
    pub fn new(
        selection: Selection,
        crossover_rate: f64,
        mutation_rate: f64,
        elite_count: usize,
    ) -> Result<Self> {
        for (name, rate) in [
            ("crossover_rate", crossover_rate),
            ("mutation_rate", mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GaError::Configuration(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        if let Selection::Tournament(k) = selection {
            if k < 2 {
                return Err(GaError::Configuration(format!(
                    "tournament size must be at least 2, got {k}"
                )));
            }
        }
        Ok(Self {
            selection,
            crossover_rate,
            mutation_rate,
            elite_count,
        })
    }

    /// Extracts the operator settings from a configuration.
    ///
    /// Rates are read through [`probability`], so an unvalidated
    /// configuration cannot make breeding panic.
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            selection: config.selection,
            crossover_rate: probability(config.crossover_rate),
            mutation_rate: probability(config.mutation_rate),
            elite_count: config.elite_count,
        }
    }

    /// Parent selection strategy.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Per-pair crossover probability.
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Per-child mutation probability.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Best individuals copied unchanged into the next generation.
    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Builds a complete replacement generation of `size` individuals.
    ///
    /// The first `elite_count` slots hold clones of the best valid parents;
    /// the rest come from [`Pipeline::breed`]. `parents` is only read.
    pub fn next_generation<G: Genome, R: Rng>(
        &self,
        parents: &[Individual<G>],
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<Individual<G>>> {
        let mut next = Vec::with_capacity(size);

        if self.elite_count > 0 {
            let mut ranked: Vec<&Individual<G>> =
                parents.iter().filter(|ind| ind.is_valid()).collect();
            ranked.sort_by(|a, b| a.rank_cmp(b));
            next.extend(ranked.into_iter().take(self.elite_count.min(size)).cloned());
        }

        let remaining = size - next.len();
        next.extend(self.breed(parents, remaining, rng)?);
        Ok(next)
    }

    /// Produces exactly `count` offspring from `parents`.
    ///
    /// The valid parents are ranked once per call and shared by every
    /// selection draw.
    ///
    /// # Errors
    /// Propagates [`GaError::IncompatibleGenomes`](crate::GaError::IncompatibleGenomes)
    /// from crossover.
    pub fn breed<G: Genome, R: Rng>(
        &self,
        parents: &[Individual<G>],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Individual<G>>> {
        let mut offspring = Vec::with_capacity(count);
        if count == 0 {
            return Ok(offspring);
        }
        let candidates = Candidates::new(parents);

        while offspring.len() < count {
            let i = self.selection.select_from(&candidates, rng);
            let j = self.selection.select_from(&candidates, rng);

            let mut first = parents[i].clone();
            let mut second = parents[j].clone();
            if rng.random_bool(self.crossover_rate) {
                first.crossover(&mut second, rng)?;
            }

            for mut child in [first, second] {
                if offspring.len() >= count {
                    break;
                }
                if rng.random_bool(self.mutation_rate) {
                    child.mutate(rng);
                }
                offspring.push(child);
            }
        }

        Ok(offspring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationFailure;
    use crate::genome::{check_dimensions, RealVector};
    use crate::random::create_rng;
    use std::sync::Arc;

    type Objective = fn(&[f64]) -> std::result::Result<f64, EvaluationFailure>;

    fn sphere(genes: &[f64]) -> std::result::Result<f64, EvaluationFailure> {
        Ok(genes.iter().map(|x| x * x).sum())
    }

    fn population(rows: &[&[f64]]) -> Vec<Individual<RealVector<Objective>>> {
        let objective = Arc::new(sphere as Objective);
        rows.iter()
            .map(|genes| {
                let mut ind = Individual::new(RealVector::new(genes.to_vec(), objective.clone()));
                ind.evaluate();
                ind
            })
            .collect()
    }

    fn pipeline(crossover_rate: f64, mutation_rate: f64) -> Pipeline {
        Pipeline {
            selection: Selection::Tournament(2),
            crossover_rate,
            mutation_rate,
            elite_count: 0,
        }
    }

    #[test]
    fn test_breed_exact_count() {
        let parents = population(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let mut rng = create_rng(42);
        for count in [0, 1, 2, 3, 7, 10] {
            let kids = pipeline(0.9, 0.5).breed(&parents, count, &mut rng).unwrap();
            assert_eq!(kids.len(), count);
        }
    }

    #[test]
    fn test_no_operators_yields_evaluated_clones() {
        let parents = population(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let mut rng = create_rng(42);
        let kids = pipeline(0.0, 0.0).breed(&parents, 6, &mut rng).unwrap();
        for kid in &kids {
            assert!(kid.is_evaluated());
            assert!(parents
                .iter()
                .any(|p| p.genome().genes() == kid.genome().genes()));
        }
    }

    #[test]
    fn test_crossover_clears_cache() {
        let parents = population(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let mut rng = create_rng(42);
        let kids = pipeline(1.0, 0.0).breed(&parents, 4, &mut rng).unwrap();
        assert!(kids.iter().all(|k| !k.is_evaluated()));
    }

    #[test]
    fn test_parents_untouched() {
        let parents = population(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let before: Vec<Vec<f64>> = parents.iter().map(|p| p.genome().genes().to_vec()).collect();
        let mut rng = create_rng(42);
        pipeline(1.0, 1.0).breed(&parents, 20, &mut rng).unwrap();
        let after: Vec<Vec<f64>> = parents.iter().map(|p| p.genome().genes().to_vec()).collect();
        assert_eq!(before, after);
        assert!(parents.iter().all(Individual::is_evaluated));
    }

    #[test]
    fn test_incompatible_parents_propagate() {
        let parents = population(&[&[1.0, 2.0], &[3.0, 4.0, 5.0]]);
        assert!(check_dimensions(parents[0].genome(), parents[1].genome()).is_err());
        let mut rng = create_rng(42);
        let result = pipeline(1.0, 0.0).breed(&parents, 200, &mut rng);
        assert!(matches!(
            result,
            Err(GaError::IncompatibleGenomes { .. })
        ));
    }

    #[test]
    fn test_next_generation_keeps_elites() {
        let parents = population(&[&[3.0], &[1.0], &[2.0], &[4.0]]);
        let mut rng = create_rng(42);
        let pipe = Pipeline {
            elite_count: 2,
            ..pipeline(1.0, 1.0)
        };
        let next = pipe.next_generation(&parents, 4, &mut rng).unwrap();
        assert_eq!(next.len(), 4);
        assert_eq!(next[0].genome().genes(), &[1.0]);
        assert_eq!(next[1].genome().genes(), &[2.0]);
        assert!(next[0].is_evaluated() && next[1].is_evaluated());
    }

    #[test]
    fn test_new_rejects_out_of_range_settings() {
        assert!(Pipeline::new(Selection::Rank, 0.9, 0.1, 0).is_ok());
        for (crossover, mutation) in [(1.5, 0.1), (0.9, -0.1), (f64::NAN, 0.1)] {
            assert!(matches!(
                Pipeline::new(Selection::Rank, crossover, mutation, 0),
                Err(GaError::Configuration(_))
            ));
        }
        assert!(Pipeline::new(Selection::Tournament(1), 0.9, 0.1, 0).is_err());
    }

    #[test]
    fn test_unvalidated_config_cannot_panic_breeding() {
        let mut config = GaConfig::default();
        config.crossover_rate = 1.5;
        config.mutation_rate = f64::NAN;
        let pipe = Pipeline::from_config(&config);
        assert_eq!(pipe.crossover_rate(), 1.0);
        assert_eq!(pipe.mutation_rate(), 0.0);

        let parents = population(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let mut rng = create_rng(42);
        assert_eq!(pipe.breed(&parents, 4, &mut rng).unwrap().len(), 4);
    }

    #[test]
    fn test_from_config() {
        let config = GaConfig::default()
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.2)
            .with_elite_count(3);
        let pipe = Pipeline::from_config(&config);
        assert_eq!(pipe.selection, config.selection);
        assert_eq!(pipe.crossover_rate, 0.7);
        assert_eq!(pipe.mutation_rate, 0.2);
        assert_eq!(pipe.elite_count, 3);
    }
}
