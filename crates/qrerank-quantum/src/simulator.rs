//! Exact statevector simulation.
//!
//! The backend sits behind `StateSimulator` so the pipeline does not depend
//! on how a circuit is evaluated. `StatevectorSimulator` allocates a fresh
//! buffer per call and holds no state, so one instance can serve every
//! request thread.

use num_complex::Complex64;
use qrerank_core::errors::{QrerankResult, QuantumError};

use crate::circuit::{Circuit, Gate};
use crate::statevector::Statevector;

/// A circuit evaluation backend.
pub trait StateSimulator: Send + Sync {
    /// Evaluate `circuit` from |0…0⟩. Must be deterministic.
    fn simulate(&self, circuit: &Circuit) -> QrerankResult<Statevector>;

    fn name(&self) -> &str;
}

/// Noiseless dense statevector simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatevectorSimulator;

impl StatevectorSimulator {
    pub fn new() -> Self {
        Self
    }
}

impl StateSimulator for StatevectorSimulator {
    fn simulate(&self, circuit: &Circuit) -> QrerankResult<Statevector> {
        let width = circuit.num_qubits();
        let mut amps = Statevector::zero_state(width)?.into_amplitudes();

        for op in circuit.ops() {
            match *op {
                Gate::Rotation { qubit, angle } => {
                    check_qubit(qubit, width)?;
                    apply_ry(&mut amps, qubit, angle);
                }
                Gate::Entangle { control, target } => {
                    check_qubit(control, width)?;
                    check_qubit(target, width)?;
                    if control == target {
                        return Err(QuantumError::QubitOutOfRange {
                            qubit: target,
                            width,
                        }
                        .into());
                    }
                    apply_cnot(&mut amps, control, target);
                }
            }
        }

        Statevector::from_amplitudes(amps)
    }

    fn name(&self) -> &str {
        "statevector"
    }
}

fn check_qubit(qubit: usize, width: usize) -> QrerankResult<()> {
    if qubit >= width {
        return Err(QuantumError::QubitOutOfRange { qubit, width }.into());
    }
    Ok(())
}

/// RY(θ) = [[cos θ/2, −sin θ/2], [sin θ/2, cos θ/2]] on `qubit`.
fn apply_ry(amps: &mut [Complex64], qubit: usize, angle: f64) {
    let (s, c) = (angle / 2.0).sin_cos();
    let stride = 1usize << qubit;
    for i in 0..amps.len() {
        if i & stride != 0 {
            continue;
        }
        let a0 = amps[i];
        let a1 = amps[i | stride];
        amps[i] = a0 * c - a1 * s;
        amps[i | stride] = a0 * s + a1 * c;
    }
}

/// CNOT: swap the target-0 and target-1 amplitudes wherever control is 1.
fn apply_cnot(amps: &mut [Complex64], control: usize, target: usize) {
    let cmask = 1usize << control;
    let tmask = 1usize << target;
    for i in 0..amps.len() {
        if i & cmask != 0 && i & tmask == 0 {
            amps.swap(i, i | tmask);
        }
    }
}
