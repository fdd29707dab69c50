//! Engine configuration.
//!
//! [`GaConfig`] is fixed once the engine is built. Builders clamp rates into
//! `[0, 1]`; everything else is checked by [`GaConfig::validate`].

use crate::error::{GaError, Result};
use crate::selection::Selection;

/// Configuration for the genetic algorithm engine.
///
/// # Defaults
///
/// ```
/// use u_genetic::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_count, 2);
/// assert_eq!(config.population_size, 50);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetic::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_count(4)
///     .with_population_size(100)
///     .with_selection(Selection::Tournament(5))
///     .with_mutation_rate(0.3)
///     .with_migration(10, 2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of independent populations (islands). At least 1.
    pub population_count: usize,

    /// Individuals per population. At least 2, since crossover needs pairs.
    pub population_size: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Probability of crossing a selected pair (0.0–1.0).
    ///
    /// When crossover is skipped the children are clones of the parents.
    pub crossover_rate: f64,

    /// Probability of mutating each child (0.0–1.0).
    ///
    /// Per-gene probabilities are the genome's own concern.
    pub mutation_rate: f64,

    /// Number of entries kept by the hall of fame. At least 1.
    pub hall_of_fame_capacity: usize,

    /// Best individuals copied unchanged into the next generation.
    ///
    /// 0 (the default) gives pure generational replacement.
    pub elite_count: usize,

    /// Generations between migrations. `None` disables migration.
    pub migration_interval: Option<usize>,

    /// Individuals exchanged per migration.
    pub migration_size: usize,

    /// Whether populations and evaluations run on rayon's pool.
    ///
    /// Has no effect when the `parallel` feature is disabled. Results are
    /// identical either way.
    pub parallel: bool,

    /// Master seed. `None` draws one at initialization.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_count: 2,
            population_size: 50,
            selection: Selection::default(),
            crossover_rate: 1.0,
            mutation_rate: 0.5,
            hall_of_fame_capacity: 1,
            elite_count: 0,
            migration_interval: None,
            migration_size: 0,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of populations.
    pub fn with_population_count(mut self, n: usize) -> Self {
        self.population_count = n;
        self
    }

    /// Sets the number of individuals per population.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the hall of fame capacity.
    pub fn with_hall_of_fame_capacity(mut self, n: usize) -> Self {
        self.hall_of_fame_capacity = n;
        self
    }

    /// Sets the number of elites carried over each generation.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Enables ring migration of `size` individuals every `interval`
    /// generations.
    pub fn with_migration(mut self, interval: usize, size: usize) -> Self {
        self.migration_interval = Some(interval);
        self.migration_size = size;
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs: one population of 30.
    pub fn fast() -> Self {
        Self {
            population_count: 1,
            population_size: 30,
            ..Self::default()
        }
    }

    /// Preset balancing speed and quality: two populations of 50 with
    /// migration every 10 generations.
    pub fn balanced() -> Self {
        Self {
            population_count: 2,
            population_size: 50,
            migration_interval: Some(10),
            migration_size: 2,
            ..Self::default()
        }
    }

    /// Preset for quality: four populations of 100, stronger tournament,
    /// migration every 10 generations.
    pub fn quality() -> Self {
        Self {
            population_count: 4,
            population_size: 100,
            selection: Selection::Tournament(4),
            hall_of_fame_capacity: 10,
            migration_interval: Some(10),
            migration_size: 5,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::EmptyPopulationConfig`] for a missing population
    /// or one that cannot form pairs, [`GaError::Configuration`] for any
    /// other out-of-range parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_count < 1 || self.population_size < 2 {
            return Err(GaError::EmptyPopulationConfig {
                population_count: self.population_count,
                population_size: self.population_size,
            });
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GaError::Configuration(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        if let Selection::Tournament(k) = self.selection {
            if k < 2 {
                return Err(GaError::Configuration(format!(
                    "tournament size must be at least 2, got {k}"
                )));
            }
        }
        if self.hall_of_fame_capacity == 0 {
            return Err(GaError::Configuration(
                "hall_of_fame_capacity must be at least 1".into(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(GaError::Configuration(format!(
                "elite_count ({}) must be below population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if let Some(interval) = self.migration_interval {
            if interval == 0 {
                return Err(GaError::Configuration(
                    "migration_interval must be at least 1".into(),
                ));
            }
            if self.migration_size > self.population_size {
                return Err(GaError::Configuration(format!(
                    "migration_size ({}) exceeds population_size ({})",
                    self.migration_size, self.population_size
                )));
            }
        }
        Ok(())
    }
}
