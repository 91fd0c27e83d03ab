/// qrerank system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on circuit width. A statevector holds 2^k amplitudes, so this
/// caps a single state at 16 MiB.
pub const MAX_QUBITS: usize = 20;

/// Artifact manifest format understood by this build.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;
