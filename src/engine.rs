//! The generation scheduler.
//!
//! [`Ga`] owns the populations, their random streams, and the hall of fame,
//! and advances them one generation per [`Ga::evolve`] call:
//! evaluate → select → crossover → mutate → evaluate offspring → replace →
//! record champions → migrate.

use crate::config::GaConfig;
use crate::error::{GaError, Result};
use crate::genome::{Genome, GenomeFactory};
use crate::hall_of_fame::{HallOfFame, SharedHallOfFame};
use crate::individual::Individual;
use crate::migration::Migrator;
use crate::pipeline::Pipeline;
use crate::population::{evaluate_all, GenerationStats, Population};
use crate::random::{stream_rng, GaRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of a [`Ga`].
///
/// `Uninitialized → Initialized → Evolving → Terminated`. Calling
/// [`Ga::initialize`] again from any state but `Terminated` starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built and validated, no population yet.
    Uninitialized,
    /// Populations created and evaluated, hall of fame seeded.
    Initialized,
    /// At least one generation has been evolved.
    Evolving,
    /// Stopped by [`Ga::terminate`].
    Terminated,
}

/// Outcome of [`Ga::run`].
#[derive(Debug, Clone)]
pub struct RunSummary<G> {
    /// Best individual ever recorded, `None` if no evaluation succeeded.
    pub best: Option<Individual<G>>,

    /// Fitness of `best`, `f64::INFINITY` without one.
    pub best_fitness: f64,

    /// Generations evolved by this call.
    pub generations: usize,

    /// Whether the run stopped on the cancellation flag.
    pub cancelled: bool,

    /// Hall of fame best fitness before the first step and after each one.
    pub fitness_history: Vec<f64>,
}

/// Generational genetic algorithm engine.
///
/// The engine has no stopping rule of its own: callers compose one around
/// the re-entrant [`evolve`](Ga::evolve) step, or use [`run`](Ga::run).
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_genetic::functions::drop_wave;
/// use u_genetic::genome::RealVector;
/// use u_genetic::random::GaRng;
/// use u_genetic::{Ga, GaConfig};
///
/// let objective = Arc::new(drop_wave);
/// let factory = move |rng: &mut GaRng| RealVector::random(2, -10.0, 10.0, objective.clone(), rng);
///
/// let config = GaConfig::default().with_population_count(1).with_seed(42);
/// let mut ga = Ga::new(config, factory)?;
/// ga.initialize()?;
/// let start = ga.best()?.fitness();
/// for _ in 0..10 {
///     ga.evolve()?;
/// }
/// assert!(ga.best()?.fitness() <= start);
/// # Ok::<(), u_genetic::GaError>(())
/// ```
pub struct Ga<G, F> {
    config: GaConfig,
    factory: F,
    pipeline: Pipeline,
    migrator: Option<Migrator>,
    state: EngineState,
    seed: Option<u64>,
    generation: usize,
    populations: Vec<Population<G>>,
    rngs: Vec<GaRng>,
    hall_of_fame: SharedHallOfFame<G>,
}

impl<G: Genome, F: GenomeFactory<G>> Ga<G, F> {
    /// Validates `config` and builds an uninitialized engine.
    ///
    /// # Errors
    /// [`GaError::EmptyPopulationConfig`] or [`GaError::Configuration`].
    pub fn new(config: GaConfig, factory: F) -> Result<Self> {
        config.validate()?;

        let migrator = config
            .migration_interval
            .filter(|_| config.population_count > 1 && config.migration_size > 0)
            .map(|interval| Migrator::new(interval, config.migration_size));

        Ok(Self {
            pipeline: Pipeline::from_config(&config),
            hall_of_fame: HallOfFame::shared(config.hall_of_fame_capacity),
            migrator,
            factory,
            state: EngineState::Uninitialized,
            seed: config.seed,
            generation: 0,
            populations: Vec::new(),
            rngs: Vec::new(),
            config,
        })
    }

    /// Creates and evaluates every population and seeds the hall of fame.
    ///
    /// Reinitializing discards all progress; the hall of fame handle stays
    /// the same but is emptied.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state == EngineState::Terminated {
            return Err(GaError::Terminated);
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let parallel = self.config.parallel;

        let mut rngs: Vec<GaRng> = (0..self.config.population_count)
            .map(|i| stream_rng(seed, i))
            .collect();
        let mut populations = rngs
            .iter_mut()
            .enumerate()
            .map(|(i, rng)| {
                Population::from_factory(i, self.config.population_size, &self.factory, rng)
            })
            .collect::<Result<Vec<_>>>()?;

        for pop in &mut populations {
            pop.evaluate(parallel);
            warn_if_all_invalid(pop);
        }

        {
            let mut hof = self.hall_of_fame.write();
            *hof = HallOfFame::new(self.config.hall_of_fame_capacity);
            for pop in &populations {
                hof.consider_all(pop.individuals());
            }
        }

        self.seed = Some(seed);
        self.rngs = rngs;
        self.populations = populations;
        self.generation = 0;
        self.state = EngineState::Initialized;

        log::info!(
            "initialized {} population(s) of {} (seed {seed}), best fitness {:?}",
            self.config.population_count,
            self.config.population_size,
            self.best_fitness()
        );
        Ok(())
    }

    /// Advances every population by one generation.
    ///
    /// Offspring for all populations are built and evaluated before any
    /// population is replaced; if breeding fails anywhere, no population
    /// changes and the error is returned.
    ///
    /// # Errors
    /// - [`GaError::NotInitialized`] before [`initialize`](Ga::initialize)
    /// - [`GaError::Terminated`] after [`terminate`](Ga::terminate)
    /// - [`GaError::IncompatibleGenomes`] from crossover
    pub fn evolve(&mut self) -> Result<()> {
        match self.state {
            EngineState::Uninitialized => return Err(GaError::NotInitialized),
            EngineState::Terminated => return Err(GaError::Terminated),
            EngineState::Initialized | EngineState::Evolving => {}
        }

        let offspring = breed_all(
            &mut self.populations,
            &mut self.rngs,
            &self.pipeline,
            self.config.population_size,
            self.config.parallel,
        )?;

        for (pop, next) in self.populations.iter_mut().zip(offspring) {
            pop.replace(next);
            warn_if_all_invalid(pop);
        }
        self.generation += 1;

        {
            let mut hof = self.hall_of_fame.write();
            for pop in &self.populations {
                hof.consider_all(pop.individuals());
            }
        }

        if let Some(migrator) = self.migrator {
            if migrator.is_due(self.generation) {
                migrator.migrate(&mut self.populations);
            }
        }

        self.state = EngineState::Evolving;
        log::debug!(
            "generation {}: best fitness {:?}",
            self.generation,
            self.best_fitness()
        );
        Ok(())
    }

    /// Evolves up to `generations` steps, initializing first if needed.
    ///
    /// If `cancel` is set, the flag is checked before every step and the
    /// run stops early once it reads `true`. A run in which no individual
    /// was ever valid still returns its summary, with `best` unset.
    pub fn run(
        &mut self,
        generations: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunSummary<G>> {
        if self.state == EngineState::Uninitialized {
            self.initialize()?;
        }

        let mut fitness_history = Vec::with_capacity(generations + 1);
        fitness_history.push(self.best_fitness().unwrap_or(f64::INFINITY));

        let mut cancelled = false;
        let mut executed = 0;
        for _ in 0..generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            self.evolve()?;
            executed += 1;
            fitness_history.push(self.best_fitness().unwrap_or(f64::INFINITY));
        }

        let best = self.best().ok();
        Ok(RunSummary {
            best_fitness: best.as_ref().map_or(f64::INFINITY, Individual::fitness),
            best,
            generations: executed,
            cancelled,
            fitness_history,
        })
    }

    /// Stops the engine. Later `evolve` or `initialize` calls fail with
    /// [`GaError::Terminated`]; queries keep working.
    pub fn terminate(&mut self) {
        if self.state != EngineState::Terminated {
            log::info!(
                "terminated after {} generation(s), best fitness {:?}",
                self.generation,
                self.best_fitness()
            );
        }
        self.state = EngineState::Terminated;
    }

    /// A clone of the best individual ever recorded.
    ///
    /// # Errors
    /// [`GaError::EmptyHallOfFame`] if nothing valid has been evaluated.
    pub fn best(&self) -> Result<Individual<G>> {
        let hof = self.hall_of_fame.read();
        hof.best().cloned()
    }

    /// Fitness of the best individual ever recorded.
    pub fn best_fitness(&self) -> Result<f64> {
        let hof = self.hall_of_fame.read();
        hof.best().map(Individual::fitness)
    }

    /// Clones of the best `n` hall of fame entries.
    pub fn top(&self, n: usize) -> Vec<Individual<G>> {
        let hof = self.hall_of_fame.read();
        hof.top(n).to_vec()
    }

    /// Shared handle to the hall of fame.
    pub fn hall_of_fame(&self) -> SharedHallOfFame<G> {
        Arc::clone(&self.hall_of_fame)
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Master seed in use (known once initialized, or if configured).
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// All populations, empty before initialization.
    pub fn populations(&self) -> &[Population<G>] {
        &self.populations
    }

    /// Population `index`, if it exists.
    pub fn population(&self, index: usize) -> Option<&Population<G>> {
        self.populations.get(index)
    }

    /// Per-population statistics for the current generation.
    pub fn stats(&self) -> Vec<GenerationStats> {
        self.populations.iter().map(Population::stats).collect()
    }
}

/// Builds and evaluates the next generation of every population, across
/// rayon's pool when `parallel`. Results come back in population order.
fn breed_all<G: Genome>(
    populations: &mut [Population<G>],
    rngs: &mut [GaRng],
    pipeline: &Pipeline,
    size: usize,
    parallel: bool,
) -> Result<Vec<Vec<Individual<G>>>> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return populations
                .par_iter_mut()
                .zip(rngs.par_iter_mut())
                .map(|(pop, rng)| breed_one(pop, rng, pipeline, size, parallel))
                .collect();
        }
    }

    populations
        .iter_mut()
        .zip(rngs.iter_mut())
        .map(|(pop, rng)| breed_one(pop, rng, pipeline, size, parallel))
        .collect()
}

/// One population's step: refresh stale fitness, breed, evaluate offspring.
fn breed_one<G: Genome>(
    population: &mut Population<G>,
    rng: &mut GaRng,
    pipeline: &Pipeline,
    size: usize,
    parallel: bool,
) -> Result<Vec<Individual<G>>> {
    population.evaluate(parallel);
    let mut next = pipeline.next_generation(population.individuals(), size, rng)?;
    evaluate_all(&mut next, parallel);
    Ok(next)
}

fn warn_if_all_invalid<G: Genome>(population: &Population<G>) {
    if population.best().is_none() {
        log::warn!(
            "population {} has no valid individual at generation {}",
            population.id(),
            population.generation()
        );
    }
}
