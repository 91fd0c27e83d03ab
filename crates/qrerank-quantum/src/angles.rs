//! Map a reduced vector to rotation angles in [0, π].
//!
//! `angle_i = ((z_i - min_i) / (max_i - min_i)) · π`
//!
//! A dimension with `max_i == min_i` has no spread to scale by. Its
//! denominator is replaced by a fixed epsilon. A value at or below the bound
//! maps to 0, a value more than epsilon above it clamps to π, and a value
//! within epsilon above it scales linearly, `(z_i - min_i) / epsilon · π`.
//! That is a deterministic policy, not an error.

use std::f64::consts::PI;

use qrerank_core::errors::{QrerankResult, QuantumError};

/// Denominator substituted for a zero-width range.
pub const DEGENERATE_RANGE_EPSILON: f64 = 1e-12;

/// Encode with the default degenerate-range epsilon.
pub fn encode_angles(reduced: &[f64], mins: &[f64], maxs: &[f64]) -> QrerankResult<Vec<f64>> {
    encode_angles_with_epsilon(reduced, mins, maxs, DEGENERATE_RANGE_EPSILON)
}

/// Encode with an explicit degenerate-range epsilon.
pub fn encode_angles_with_epsilon(
    reduced: &[f64],
    mins: &[f64],
    maxs: &[f64],
    epsilon: f64,
) -> QrerankResult<Vec<f64>> {
    for (context, len) in [
        ("angle encoding mins", mins.len()),
        ("angle encoding maxs", maxs.len()),
    ] {
        if len != reduced.len() {
            return Err(QuantumError::DimensionMismatch {
                context,
                expected: reduced.len(),
                actual: len,
            }
            .into());
        }
    }

    Ok(reduced
        .iter()
        .zip(mins.iter().zip(maxs))
        .map(|(&z, (&lo, &hi))| {
            let span = hi - lo;
            let denom = if span == 0.0 { epsilon } else { span };
            let angle = (z - lo) / denom * PI;
            if angle.is_finite() {
                angle.clamp(0.0, PI)
            } else {
                0.0
            }
        })
        .collect())
}
