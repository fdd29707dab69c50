//! Error types for the GA engine.
//!
//! Two families of failure exist:
//!
//! - [`EvaluationFailure`] is produced by a genome's objective and is absorbed
//!   per individual: the individual is marked invalid and the generation
//!   carries on.
//! - [`GaError`] aborts the operation that raised it and is returned to the
//!   caller.

use thiserror::Error;

/// The objective function rejected a genome.
///
/// Typical causes are non-finite coordinates or a non-finite result.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("evaluation failed: {reason}")]
pub struct EvaluationFailure {
    /// Human-readable cause.
    pub reason: String,
}

impl EvaluationFailure {
    /// Creates a failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the engine to its caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Fewer than one population, or fewer than two individuals per population.
    #[error(
        "empty population config: population_count={population_count}, \
         population_size={population_size} (need count >= 1 and size >= 2)"
    )]
    EmptyPopulationConfig {
        population_count: usize,
        population_size: usize,
    },

    /// Crossover was attempted between genomes of different dimensionality.
    #[error("incompatible genomes: expected dimension {expected}, found {found}")]
    IncompatibleGenomes { expected: usize, found: usize },

    /// The hall of fame was queried before any individual was evaluated.
    #[error("hall of fame is empty")]
    EmptyHallOfFame,

    /// `evolve` was called before `initialize`.
    #[error("engine is not initialized")]
    NotInitialized,

    /// The engine has been terminated and accepts no further steps.
    #[error("engine has been terminated")]
    Terminated,

    /// An evaluation failure escalated by the caller.
    #[error(transparent)]
    Evaluation(#[from] EvaluationFailure),
}

impl GaError {
    /// Returns `true` for errors raised while validating a configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GaError::Configuration(_) | GaError::EmptyPopulationConfig { .. }
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(GaError::Configuration("x".into()).is_configuration());
        assert!(GaError::EmptyPopulationConfig {
            population_count: 1,
            population_size: 1
        }
        .is_configuration());
        assert!(!GaError::EmptyHallOfFame.is_configuration());
        assert!(!GaError::IncompatibleGenomes {
            expected: 2,
            found: 3
        }
        .is_configuration());
    }

    #[test]
    fn test_messages() {
        let err = GaError::IncompatibleGenomes {
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "incompatible genomes: expected dimension 2, found 3"
        );

        let err: GaError = EvaluationFailure::new("NaN input").into();
        assert_eq!(err.to_string(), "evaluation failed: NaN input");
    }
}
