//! Benchmark objective functions for continuous minimization.
//!
//! All functions accept any dimension and fail on an empty input.
//!
//! | Function | Global minimum |
//! |---|---|
//! | [`drop_wave`] | -1 at the origin |
//! | [`sphere`] | 0 at the origin |
//! | [`rastrigin`] | 0 at the origin |

use crate::error::EvaluationFailure;
use std::f64::consts::PI;

fn non_empty(x: &[f64]) -> Result<(), EvaluationFailure> {
    if x.is_empty() {
        Err(EvaluationFailure::new("empty input vector"))
    } else {
        Ok(())
    }
}

/// Drop-Wave: `-(1 + cos(12·r)) / (0.5·r² + 2)` with `r = ‖x‖`.
///
/// Highly multimodal, usually evaluated on `[-5.12, 5.12]²`.
pub fn drop_wave(x: &[f64]) -> Result<f64, EvaluationFailure> {
    non_empty(x)?;
    let r2: f64 = x.iter().map(|v| v * v).sum();
    Ok(-(1.0 + (12.0 * r2.sqrt()).cos()) / (0.5 * r2 + 2.0))
}

/// Sphere: `Σ xᵢ²`.
pub fn sphere(x: &[f64]) -> Result<f64, EvaluationFailure> {
    non_empty(x)?;
    Ok(x.iter().map(|v| v * v).sum())
}

/// Rastrigin: `10·n + Σ (xᵢ² − 10·cos(2π·xᵢ))`.
pub fn rastrigin(x: &[f64]) -> Result<f64, EvaluationFailure> {
    non_empty(x)?;
    let n = x.len() as f64;
    Ok(10.0 * n
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>())
}
