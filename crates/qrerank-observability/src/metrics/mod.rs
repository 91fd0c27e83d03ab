//! Central metrics registry.
//!
//! [`MetricsCollector`] owns the domain collectors and serializes as one
//! document for snapshots.

pub mod pipeline_metrics;

pub use pipeline_metrics::PipelineMetrics;

/// Central metrics registry.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub pipeline: PipelineMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
