//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

/// Log a successful artifact load.
pub fn artifacts_loaded(dir: &str, records: usize, corrupt: usize, num_qubits: usize) {
    tracing::info!(
        event = "artifacts_loaded",
        dir = %dir,
        records = records,
        corrupt = corrupt,
        num_qubits = num_qubits,
        "artifacts loaded"
    );
}

/// Log a stored statevector that failed its integrity check at load.
pub fn corrupt_statevector(id: u64, norm: f64) {
    tracing::warn!(
        event = "corrupt_statevector",
        id = id,
        norm = norm,
        "statevector failed integrity check, slot will be skipped"
    );
}

/// Log candidates dropped from a shortlist.
pub fn candidates_skipped(skipped: usize, shortlist: usize, ids: &[u64]) {
    tracing::warn!(
        event = "candidates_skipped",
        skipped = skipped,
        shortlist = shortlist,
        ids = ?ids,
        "candidates skipped during reranking"
    );
}

/// Log pipeline completion.
pub fn pipeline_completed(shortlist: usize, returned: usize, skipped: usize, elapsed: Duration) {
    tracing::info!(
        event = "pipeline_completed",
        shortlist = shortlist,
        returned = returned,
        skipped = skipped,
        latency_us = elapsed.as_micros() as u64,
        "pipeline completed"
    );
}
