//! Genome abstraction.
//!
//! [`Genome`] is the capability set every candidate-solution representation
//! must provide: evaluation, mutation, crossover, and deep cloning. The
//! engine is generic over it and never inspects the representation.
//!
//! Three representations ship with the crate:
//!
//! - [`RealVector`]: fixed-length `f64` vector (continuous optimization)
//! - [`BitString`]: fixed-length `bool` vector
//! - [`Permutation`]: ordering of `0..n`
//!
//! Each one delegates scoring to an [`Objective`], which any
//! `Fn(&[T]) -> Result<f64, EvaluationFailure>` closure satisfies.

mod bits;
mod permutation;
mod vector;

pub use bits::BitString;
pub use permutation::Permutation;
pub use vector::RealVector;

use crate::error::{EvaluationFailure, GaError, Result};
use crate::random::GaRng;
use rand::Rng;

/// A candidate solution representation.
///
/// Lower fitness is better (minimization). For maximization, negate the
/// objective.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_genetic::genome::{check_dimensions, Genome};
/// use u_genetic::{EvaluationFailure, Result};
///
/// #[derive(Clone)]
/// struct Point(Vec<f64>);
///
/// impl Genome for Point {
///     fn evaluate(&self) -> std::result::Result<f64, EvaluationFailure> {
///         Ok(self.0.iter().map(|x| x * x).sum())
///     }
///
///     fn mutate<R: Rng>(&mut self, rng: &mut R) {
///         let i = rng.random_range(0..self.0.len());
///         self.0[i] += rng.random_range(-0.5..0.5);
///     }
///
///     fn crossover<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<()> {
///         check_dimensions(self, other)?;
///         let cut = rng.random_range(0..self.0.len());
///         self.0[cut..].swap_with_slice(&mut other.0[cut..]);
///         Ok(())
///     }
///
///     fn dimension(&self) -> usize {
///         self.0.len()
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// Genomes must be `Send + Sync`: populations are evaluated and bred on
/// rayon worker threads.
pub trait Genome: Clone + Send + Sync {
    /// Computes the fitness of this genome.
    ///
    /// Must be a pure function of the genome's state. Returns
    /// [`EvaluationFailure`] when the genome lies outside the objective's
    /// valid domain.
    fn evaluate(&self) -> std::result::Result<f64, EvaluationFailure>;

    /// Stochastically perturbs the genome in place. Never fails.
    fn mutate<R: Rng>(&mut self, rng: &mut R);

    /// Recombines `self` and `other` in place into two new candidates.
    ///
    /// Must return [`GaError::IncompatibleGenomes`] without modifying either
    /// genome when the two differ in dimensionality.
    fn crossover<R: Rng>(&mut self, other: &mut Self, rng: &mut R) -> Result<()>;

    /// Number of genes.
    fn dimension(&self) -> usize;
}

/// Returns [`GaError::IncompatibleGenomes`] unless both genomes share a
/// dimension.
pub fn check_dimensions<G: Genome>(a: &G, b: &G) -> Result<()> {
    if a.dimension() == b.dimension() {
        Ok(())
    } else {
        Err(GaError::IncompatibleGenomes {
            expected: a.dimension(),
            found: b.dimension(),
        })
    }
}

/// Scores a gene slice. Lower is better.
pub trait Objective<T>: Send + Sync {
    /// Evaluates the genes.
    fn evaluate(&self, genes: &[T]) -> std::result::Result<f64, EvaluationFailure>;
}

impl<T, F> Objective<T> for F
where
    F: Fn(&[T]) -> std::result::Result<f64, EvaluationFailure> + Send + Sync,
{
    fn evaluate(&self, genes: &[T]) -> std::result::Result<f64, EvaluationFailure> {
        self(genes)
    }
}

/// Produces fresh random genomes for population initialization.
///
/// Implemented for every `Fn(&mut GaRng) -> G` closure.
pub trait GenomeFactory<G>: Send + Sync {
    /// Creates one genome.
    fn create(&self, rng: &mut GaRng) -> G;
}

impl<G, F> GenomeFactory<G> for F
where
    F: Fn(&mut GaRng) -> G + Send + Sync,
{
    fn create(&self, rng: &mut GaRng) -> G {
        self(rng)
    }
}

/// Rejects non-finite objective outputs.
pub(crate) fn finite_fitness(value: f64) -> std::result::Result<f64, EvaluationFailure> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationFailure::new(format!(
            "objective returned non-finite value {value}"
        )))
    }
}
