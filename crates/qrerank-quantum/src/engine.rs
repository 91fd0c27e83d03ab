//! QuantumSimilarityEngine: embedding to reduced vector to angles to statevector.
//!
//! The same path produces corpus reference states offline and query states
//! at request time; any divergence between the two breaks self-similarity.

use qrerank_core::config::QuantumConfig;
use qrerank_core::errors::{QrerankResult, QuantumError};
use tracing::trace;

use crate::angles::encode_angles_with_epsilon;
use crate::circuit::build_circuit;
use crate::fidelity;
use crate::reduction::ReductionModel;
use crate::simulator::{StateSimulator, StatevectorSimulator};
use crate::statevector::{check_width, Statevector};

/// Every intermediate of one encoding, for inspection and logging.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub reduced: Vec<f64>,
    pub angles: Vec<f64>,
    pub statevector: Statevector,
}

/// Read-only after construction; share it behind an `Arc`.
pub struct QuantumSimilarityEngine {
    reduction: ReductionModel,
    simulator: Box<dyn StateSimulator>,
    num_qubits: usize,
    degenerate_range_epsilon: f64,
}

impl QuantumSimilarityEngine {
    /// Build with the default statevector backend.
    ///
    /// # Errors
    /// `InvalidReductionModel` when the reduction width differs from
    /// `config.num_qubits`: one rotation angle per qubit.
    pub fn new(reduction: ReductionModel, config: &QuantumConfig) -> QrerankResult<Self> {
        Self::with_simulator(reduction, config, Box::new(StatevectorSimulator::new()))
    }

    pub fn with_simulator(
        reduction: ReductionModel,
        config: &QuantumConfig,
        simulator: Box<dyn StateSimulator>,
    ) -> QrerankResult<Self> {
        check_width(config.num_qubits)?;
        if reduction.components() != config.num_qubits {
            return Err(QuantumError::InvalidReductionModel {
                reason: format!(
                    "reduction has {} components but the circuit has {} qubits",
                    reduction.components(),
                    config.num_qubits
                ),
            }
            .into());
        }
        Ok(Self {
            reduction,
            simulator,
            num_qubits: config.num_qubits,
            degenerate_range_epsilon: config.degenerate_range_epsilon,
        })
    }

    /// Encode an embedding into its statevector, keeping intermediates.
    pub fn encode(&self, embedding: &[f32]) -> QrerankResult<QueryState> {
        let reduced = self.reduction.reduce(embedding)?;
        let angles = encode_angles_with_epsilon(
            &reduced,
            self.reduction.mins(),
            self.reduction.maxs(),
            self.degenerate_range_epsilon,
        )?;
        let statevector = self.state_for_angles(&angles)?;
        trace!(?angles, "encoded query state");
        Ok(QueryState {
            reduced,
            angles,
            statevector,
        })
    }

    /// Build and simulate the canonical circuit for `angles`.
    pub fn state_for_angles(&self, angles: &[f64]) -> QrerankResult<Statevector> {
        if angles.len() != self.num_qubits {
            return Err(QuantumError::DimensionMismatch {
                context: "circuit angles",
                expected: self.num_qubits,
                actual: angles.len(),
            }
            .into());
        }
        let circuit = build_circuit(angles)?;
        self.simulator.simulate(&circuit)
    }

    /// Fidelity of `query` against each candidate, order preserved.
    pub fn similarity_batch<'a, I>(&self, query: &Statevector, candidates: I) -> Vec<QrerankResult<f64>>
    where
        I: IntoIterator<Item = &'a Statevector>,
    {
        fidelity::similarity_batch(query, candidates)
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes per statevector, 2^k.
    pub fn state_dimension(&self) -> usize {
        1 << self.num_qubits
    }

    pub fn embedding_dim(&self) -> usize {
        self.reduction.embedding_dim()
    }

    pub fn reduction(&self) -> &ReductionModel {
        &self.reduction
    }

    pub fn simulator_name(&self) -> &str {
        self.simulator.name()
    }
}
