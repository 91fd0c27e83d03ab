//! Configuration for the quantum similarity engine.
//!
//! `num_qubits` fixes both the circuit width and the reduction output
//! dimension. Changing it invalidates every precomputed corpus statevector.
//!
//! # Examples
//!
//! ```
//! use qrerank_core::config::QuantumConfig;
//!
//! let config = QuantumConfig::default();
//! assert_eq!(config.num_qubits, 6);
//! assert_eq!(config.state_dimension(), 64);
//! ```

use serde::{Deserialize, Serialize};

use super::defaults;

/// Quantum similarity engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantumConfig {
    /// Circuit width `k`. Default: 6.
    pub num_qubits: usize,
    /// Denominator substituted when a reduction dimension has `max == min`.
    /// Default: 1e-12.
    pub degenerate_range_epsilon: f64,
}

impl QuantumConfig {
    /// Number of amplitudes in a statevector of this width.
    pub fn state_dimension(&self) -> usize {
        1usize << self.num_qubits
    }
}

impl Default for QuantumConfig {
    fn default() -> Self {
        Self {
            num_qubits: defaults::DEFAULT_NUM_QUBITS,
            degenerate_range_epsilon: defaults::DEFAULT_DEGENERATE_RANGE_EPSILON,
        }
    }
}
