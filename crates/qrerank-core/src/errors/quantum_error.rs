/// Reduction, angle encoding, and simulation errors.
#[derive(Debug, thiserror::Error)]
pub enum QuantumError {
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid qubit count {count}: must be in 1..={max}")]
    InvalidQubitCount { count: usize, max: usize },

    #[error("qubit {qubit} out of range for a {width}-qubit circuit")]
    QubitOutOfRange { qubit: usize, width: usize },

    #[error("invalid reduction model: {reason}")]
    InvalidReductionModel { reason: String },
}
