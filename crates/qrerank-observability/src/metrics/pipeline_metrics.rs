//! Query counts, result sizes, and skipped candidates by reason.

use std::collections::BTreeMap;
use std::time::Duration;

use qrerank_core::models::{PipelineOutcome, SkipReason};
use serde::{Deserialize, Serialize};

/// Counters over every pipeline call since start or last reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub queries: u64,
    pub failures: u64,
    /// Successful calls that returned no passages.
    pub empty_results: u64,
    pub passages_returned: u64,
    pub candidates_considered: u64,
    pub skipped_total: u64,
    pub skipped_by_reason: BTreeMap<String, u64>,
    pub total_latency: Duration,
    pub max_latency: Duration,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful call.
    pub fn record_outcome(&mut self, outcome: &PipelineOutcome) {
        self.queries += 1;
        if outcome.passages.is_empty() {
            self.empty_results += 1;
        }
        self.passages_returned += outcome.passages.len() as u64;
        self.candidates_considered += outcome.shortlist_len as u64;
        for skip in &outcome.skipped {
            self.skipped_total += 1;
            *self
                .skipped_by_reason
                .entry(reason_key(skip.reason).to_string())
                .or_default() += 1;
        }
        self.record_latency(outcome.elapsed);
    }

    /// Record a call that returned an error.
    pub fn record_failure(&mut self, elapsed: Duration) {
        self.queries += 1;
        self.failures += 1;
        self.record_latency(elapsed);
    }

    fn record_latency(&mut self, elapsed: Duration) {
        self.total_latency += elapsed;
        self.max_latency = self.max_latency.max(elapsed);
    }

    /// Fraction of shortlisted candidates that had to be skipped.
    pub fn skip_rate(&self) -> f64 {
        if self.candidates_considered == 0 {
            return 0.0;
        }
        self.skipped_total as f64 / self.candidates_considered as f64
    }

    pub fn avg_latency(&self) -> Duration {
        if self.queries == 0 {
            return Duration::ZERO;
        }
        self.total_latency / self.queries as u32
    }
}

fn reason_key(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::UnknownId => "unknown_id",
        SkipReason::CorruptStatevector => "corrupt_statevector",
        SkipReason::StateDimensionMismatch => "state_dimension_mismatch",
    }
}
