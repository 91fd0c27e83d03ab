//! # qrerank-quantum
//!
//! Second-stage scoring: project an embedding to `k` dimensions, map each
//! dimension to a rotation angle, simulate the canonical `k`-qubit circuit,
//! and compare statevectors by fidelity.

pub mod angles;
pub mod circuit;
pub mod engine;
pub mod fidelity;
pub mod reduction;
pub mod simulator;
pub mod statevector;

pub use angles::{encode_angles, DEGENERATE_RANGE_EPSILON};
pub use circuit::{build_circuit, Circuit, Gate};
pub use engine::{QuantumSimilarityEngine, QueryState};
pub use fidelity::{fidelity, similarity_batch};
pub use reduction::{ReductionModel, ReductionModelSpec};
pub use simulator::{StateSimulator, StatevectorSimulator};
pub use statevector::Statevector;

pub use num_complex::Complex64;
