//! Pure-state fidelity: F(a, b) = |⟨a|b⟩|².

use num_complex::Complex64;
use qrerank_core::errors::{QrerankResult, QuantumError};

use crate::statevector::Statevector;

/// Fidelity of two states, clamped to [0, 1].
///
/// Symmetric, and 1 exactly when the states agree up to global phase.
/// A non-finite result (only possible from corrupt input) scores 0.
///
/// # Errors
/// `DimensionMismatch` when the states have different lengths.
pub fn fidelity(a: &Statevector, b: &Statevector) -> QrerankResult<f64> {
    if a.len() != b.len() {
        return Err(QuantumError::DimensionMismatch {
            context: "fidelity",
            expected: a.len(),
            actual: b.len(),
        }
        .into());
    }

    let overlap: Complex64 = a
        .amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| x.conj() * y)
        .sum();

    let f = overlap.norm_sqr();
    Ok(if f.is_finite() { f.clamp(0.0, 1.0) } else { 0.0 })
}

/// Fidelity of `query` against each candidate, in candidate order.
///
/// One result per candidate, so a malformed candidate does not fail the
/// rest of the batch. No sorting happens here.
pub fn similarity_batch<'a, I>(query: &Statevector, candidates: I) -> Vec<QrerankResult<f64>>
where
    I: IntoIterator<Item = &'a Statevector>,
{
    candidates
        .into_iter()
        .map(|candidate| fidelity(query, candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(amps: &[(f64, f64)]) -> Statevector {
        Statevector::from_amplitudes(amps.iter().map(|&(re, im)| Complex64::new(re, im)).collect())
            .unwrap()
    }

    #[test]
    fn identical_states_have_unit_fidelity() {
        let s = state(&[(0.6, 0.0), (0.0, 0.8)]);
        assert!((fidelity(&s, &s).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_states_have_zero_fidelity() {
        let a = state(&[(1.0, 0.0), (0.0, 0.0)]);
        let b = state(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(fidelity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn global_phase_is_ignored() {
        let a = state(&[(0.6, 0.0), (0.8, 0.0)]);
        let b = state(&[(0.0, 0.6), (0.0, 0.8)]);
        assert!((fidelity(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fidelity_is_symmetric_for_complex_states() {
        let a = state(&[(0.6, 0.0), (0.0, 0.8)]);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let b = state(&[(h, 0.0), (h, 0.0)]);
        let ab = fidelity(&a, &b).unwrap();
        let ba = fidelity(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-12);
        assert!((ab - 0.5).abs() < 1e-12);
    }

    #[test]
    fn excursions_above_one_are_clamped() {
        let a = state(&[(1.0 + 1e-9, 0.0), (0.0, 0.0)]);
        assert_eq!(fidelity(&a, &a).unwrap(), 1.0);
    }

    #[test]
    fn nan_amplitudes_score_zero() {
        let a = state(&[(1.0, 0.0), (0.0, 0.0)]);
        let b = state(&[(f64::NAN, 0.0), (0.0, 0.0)]);
        assert_eq!(fidelity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let a = state(&[(1.0, 0.0), (0.0, 0.0)]);
        let b = state(&[(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        assert!(fidelity(&a, &b).is_err());
    }

    #[test]
    fn batch_preserves_order_and_isolates_errors() {
        let q = state(&[(1.0, 0.0), (0.0, 0.0)]);
        let same = q.clone();
        let other = state(&[(0.0, 0.0), (1.0, 0.0)]);
        let wide = state(&[(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        let scores = similarity_batch(&q, [&other, &wide, &same]);
        assert_eq!(scores.len(), 3);
        assert_eq!(*scores[0].as_ref().unwrap(), 0.0);
        assert!(scores[1].is_err());
        assert!((scores[2].as_ref().unwrap() - 1.0).abs() < 1e-12);
    }
}
