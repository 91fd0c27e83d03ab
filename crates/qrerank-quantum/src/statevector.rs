//! Simulated k-qubit state: 2^k complex amplitudes.
//!
//! Basis index bit `q` holds the value of qubit `q` (qubit 0 is the least
//! significant bit).

use num_complex::Complex64;
use qrerank_core::constants::MAX_QUBITS;
use qrerank_core::errors::{QrerankResult, QuantumError};
use serde::{Deserialize, Serialize};

/// An immutable statevector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// The all-zero basis state |0…0⟩ on `num_qubits` qubits.
    pub fn zero_state(num_qubits: usize) -> QrerankResult<Self> {
        check_width(num_qubits)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes })
    }

    /// Wrap raw amplitudes. The length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> QrerankResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() || len.trailing_zeros() as usize > MAX_QUBITS {
            return Err(QuantumError::DimensionMismatch {
                context: "statevector length",
                expected: len.max(1).next_power_of_two(),
                actual: len,
            }
            .into());
        }
        Ok(Self { amplitudes })
    }

    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Euclidean norm. 1 for every simulator output.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }

    /// True when every amplitude is finite and the norm is within
    /// `tolerance` of 1.
    pub fn is_valid(&self, tolerance: f64) -> bool {
        self.amplitudes
            .iter()
            .all(|a| a.re.is_finite() && a.im.is_finite())
            && (self.norm() - 1.0).abs() <= tolerance
    }

    /// Measurement probabilities |a_i|² per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }
}

pub(crate) fn check_width(num_qubits: usize) -> QrerankResult<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(QuantumError::InvalidQubitCount {
            count: num_qubits,
            max: MAX_QUBITS,
        }
        .into());
    }
    Ok(())
}
