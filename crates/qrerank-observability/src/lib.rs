//! # qrerank-observability
//!
//! Structured tracing setup with span and event definitions, a bounded query
//! log, and counters over pipeline outcomes.

pub mod engine;
pub mod metrics;
pub mod query_log;
pub mod tracing_setup;

pub use engine::ObservabilityEngine;
pub use metrics::{MetricsCollector, PipelineMetrics};
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
