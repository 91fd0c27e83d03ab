//! [`ObservabilityEngine`]: owns the metrics registry and the query log.

use std::time::Duration;

use qrerank_core::config::ObservabilityConfig;
use qrerank_core::errors::{QrerankError, QrerankResult};
use qrerank_core::models::PipelineOutcome;

use crate::metrics::MetricsCollector;
use crate::query_log::{QueryLog, QueryLogEntry};

/// Central observability engine.
#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: MetricsCollector,
    pub query_log: QueryLog,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            metrics: MetricsCollector::new(),
            query_log: QueryLog::with_capacity(config.query_log_capacity),
        }
    }

    /// Record a completed pipeline call.
    pub fn record_outcome(&mut self, query: &str, top_k: usize, outcome: &PipelineOutcome) {
        self.metrics.pipeline.record_outcome(outcome);
        self.query_log.record(QueryLogEntry::new(
            query,
            top_k,
            outcome.elapsed,
            outcome.passages.len(),
            outcome.skipped_count(),
        ));
    }

    /// Record a pipeline call that returned an error.
    pub fn record_failure(
        &mut self,
        query: &str,
        top_k: usize,
        elapsed: Duration,
        error: &QrerankError,
    ) {
        self.metrics.pipeline.record_failure(elapsed);
        self.query_log
            .record(QueryLogEntry::failed(query, top_k, elapsed, error.to_string()));
    }

    /// Reset all metrics (for testing or periodic rotation).
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Serialize current metrics and query log state to JSON.
    pub fn metrics_snapshot(&self) -> QrerankResult<serde_json::Value> {
        let metrics_json =
            serde_json::to_value(&self.metrics).map_err(QrerankError::SerializationError)?;

        Ok(serde_json::json!({
            "metrics": metrics_json,
            "query_log_count": self.query_log.count(),
            "query_avg_latency_us": self.query_log.avg_latency().as_micros() as u64,
            "query_p50_latency_us": self.query_log.latency_percentile(0.5).as_micros() as u64,
            "query_p99_latency_us": self.query_log.latency_percentile(0.99).as_micros() as u64,
        }))
    }
}
