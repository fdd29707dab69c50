//! Generational genetic algorithm engine for continuous black-box
//! optimization.
//!
//! Given an objective over fixed-length candidate solutions, the engine
//! evolves one or more populations toward a minimum through repeated
//! selection, crossover, and mutation, and keeps a ranked hall of fame of
//! the best individuals ever seen.
//!
//! # Core Traits
//!
//! - [`Genome`]: the capability set a representation must provide
//!   (evaluate, mutate, crossover, clone)
//! - [`genome::Objective`]: scores a gene slice; any closure qualifies
//! - [`genome::GenomeFactory`]: creates random genomes; any closure qualifies
//!
//! # Key Types
//!
//! - [`GaConfig`]: population layout, operator rates, migration, seed
//! - [`Ga`]: the generation scheduler; call [`Ga::initialize`] then
//!   [`Ga::evolve`] in a loop
//! - [`HallOfFame`]: best individuals ever recorded
//! - [`Selection`]: tournament (default), roulette, rank
//!
//! # Submodules
//!
//! - [`genome`]: built-in real-vector, bit-string and permutation genomes
//! - [`operators`]: gene-level crossover and mutation operators
//! - [`functions`]: benchmark objectives (Drop-Wave, Sphere, Rastrigin)
//!
//! # Concurrency
//!
//! With the default `parallel` feature, populations evolve concurrently and
//! evaluations are spread over rayon's pool. Each population draws from
//! its own random stream derived from the master seed, so results do not
//! depend on thread scheduling.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Whitley, Rana & Heckendorn (1999), "The Island Model Genetic Algorithm"

mod config;
mod engine;
pub mod error;
pub mod functions;
pub mod genome;
mod hall_of_fame;
mod individual;
mod migration;
pub mod operators;
mod pipeline;
mod population;
pub mod random;
mod selection;

pub use config::GaConfig;
pub use engine::{EngineState, Ga, RunSummary};
pub use error::{EvaluationFailure, GaError, Result};
pub use genome::Genome;
pub use hall_of_fame::{HallOfFame, SharedHallOfFame};
pub use individual::Individual;
pub use migration::Migrator;
pub use pipeline::Pipeline;
pub use population::{GenerationStats, Population};
pub use selection::{Candidates, Selection};
