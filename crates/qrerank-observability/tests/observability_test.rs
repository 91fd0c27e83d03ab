use std::time::Duration;

use qrerank_core::config::ObservabilityConfig;
use qrerank_core::errors::QrerankError;
use qrerank_core::models::{PipelineOutcome, RankedPassage, SkipReason, SkippedCandidate};
use qrerank_observability::tracing_setup::{events, spans};
use qrerank_observability::{init_tracing_with_filter, ObservabilityEngine};

fn outcome() -> PipelineOutcome {
    PipelineOutcome {
        passages: vec![RankedPassage {
            id: 7,
            text: "Rotate maize with legumes to restore nitrogen.".into(),
            score: 0.93,
            ann_rank: 2,
        }],
        shortlist_len: 3,
        skipped: vec![SkippedCandidate {
            id: 9,
            reason: SkipReason::CorruptStatevector,
        }],
        elapsed: Duration::from_millis(2),
    }
}

#[test]
fn engine_honors_configured_log_capacity() {
    let config = ObservabilityConfig {
        query_log_capacity: 2,
        ..Default::default()
    };
    let mut engine = ObservabilityEngine::from_config(&config);
    for _ in 0..5 {
        engine.record_outcome("crop rotation", 3, &outcome());
    }
    assert_eq!(engine.query_log.count(), 2);
    assert_eq!(engine.metrics.pipeline.queries, 5);
    assert_eq!(engine.metrics.pipeline.skipped_total, 5);
}

#[test]
fn snapshot_contains_metrics_and_log_summary() {
    let mut engine = ObservabilityEngine::new();
    engine.record_outcome("crop rotation", 3, &outcome());
    engine.record_failure(
        "   ",
        3,
        Duration::from_micros(5),
        &QrerankError::Validation {
            reason: "empty query".into(),
        },
    );

    let snap = engine.metrics_snapshot().unwrap();
    assert_eq!(snap["query_log_count"], 2);
    assert_eq!(snap["metrics"]["pipeline"]["failures"], 1);
    assert_eq!(
        snap["metrics"]["pipeline"]["skipped_by_reason"]["corrupt_statevector"],
        1
    );
    let latest = engine.query_log.latest().unwrap();
    assert!(latest.error.as_deref().unwrap().contains("empty query"));
}

#[test]
fn reset_clears_metrics_but_keeps_log() {
    let mut engine = ObservabilityEngine::new();
    engine.record_outcome("irrigation", 1, &outcome());
    engine.reset_metrics();
    assert_eq!(engine.metrics.pipeline.queries, 0);
    assert_eq!(engine.query_log.count(), 1);
}

#[test]
fn log_timestamps_are_recent() {
    let mut engine = ObservabilityEngine::new();
    let before = chrono::Utc::now();
    engine.record_outcome("pest control", 1, &outcome());
    let ts = engine.query_log.latest().unwrap().timestamp;
    assert!(ts >= before);
    assert!(ts <= chrono::Utc::now());
}

#[test]
fn repeated_init_is_tolerated() {
    init_tracing_with_filter("debug");
    assert!(!init_tracing_with_filter("debug"));

    let span = qrerank_observability::retrieval_span!(12usize, 5usize);
    let _guard = span.enter();
    let embed = qrerank_observability::embedding_span!("hashing", 384usize);
    let sim = qrerank_observability::simulation_span!("statevector", 6usize, 20usize);
    drop((embed, sim));
    events::candidates_skipped(1, 20, &[4]);
    events::pipeline_completed(20, 5, 1, Duration::from_millis(3));
    assert_eq!(spans::names::RETRIEVAL, "qrerank.retrieval");
}
