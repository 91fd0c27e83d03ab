//! Declarative circuit description.
//!
//! The only supported shape: one RY rotation per qubit `i` with `angles[i]`,
//! then CNOTs on (0,1), (1,2), …, (k−2,k−1) in that order. Gates do not
//! commute, so the op order is part of the contract.

use qrerank_core::errors::QrerankResult;
use serde::{Deserialize, Serialize};

use crate::statevector::check_width;

/// A single gate operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Gate {
    /// RY(angle) on one qubit.
    Rotation { qubit: usize, angle: f64 },
    /// CNOT: flips `target` when `control` is |1⟩.
    Entangle { control: usize, target: usize },
}

/// Ordered gate list over a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    ops: Vec<Gate>,
}

impl Circuit {
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn ops(&self) -> &[Gate] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Build the canonical circuit for `angles.len()` qubits.
///
/// # Errors
/// `InvalidQubitCount` when `angles` is empty or wider than `MAX_QUBITS`.
pub fn build_circuit(angles: &[f64]) -> QrerankResult<Circuit> {
    let num_qubits = angles.len();
    check_width(num_qubits)?;

    let mut ops = Vec::with_capacity(2 * num_qubits - 1);
    ops.extend(
        angles
            .iter()
            .enumerate()
            .map(|(qubit, &angle)| Gate::Rotation { qubit, angle }),
    );
    ops.extend((0..num_qubits - 1).map(|i| Gate::Entangle {
        control: i,
        target: i + 1,
    }));

    Ok(Circuit { num_qubits, ops })
}
