use std::path::Path;

use qrerank_core::config::QrerankConfig;
use qrerank_core::errors::QrerankError;
use qrerank_embeddings::EmbeddingEngine;
use qrerank_quantum::{QuantumSimilarityEngine, ReductionModel, ReductionModelSpec};
use qrerank_retrieval::{ArtifactWriter, CorpusBuilder};
use qrerank_runtime::{QrerankRuntime, RuntimeOptions};
use test_fixtures::{advisory_pairs, fixture_projection, projection_bounds};

const CONFIG_TOML: &str = r#"
[embedding]
provider = "hashing"
dimensions = 96

[retrieval]
shortlist_size = 8
default_top_k = 3

[observability]
query_log_capacity = 4
"#;

fn write_artifacts(dir: &Path) {
    let config = QrerankConfig::from_toml(CONFIG_TOML).unwrap();
    let dims = config.embedding.dimensions;
    let k = config.quantum.num_qubits;
    let projection = fixture_projection(dims, k);
    let (mins, maxs) = projection_bounds(&projection);
    let spec = ReductionModelSpec {
        embedding_dim: dims,
        components: k,
        mean: None,
        projection,
        mins,
        maxs,
    };
    let quantum =
        QuantumSimilarityEngine::new(ReductionModel::from_spec(spec).unwrap(), &config.quantum)
            .unwrap();
    let embedder = EmbeddingEngine::new(config.embedding.clone()).unwrap();
    let built = CorpusBuilder::new(&embedder, &quantum)
        .build(advisory_pairs())
        .unwrap();
    ArtifactWriter::new(dir).write(&built).unwrap();
}

fn runtime(dir: &Path) -> QrerankRuntime {
    QrerankRuntime::initialize(RuntimeOptions {
        artifact_dir: Some(dir.to_path_buf()),
        config_toml: Some(CONFIG_TOML.to_string()),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn serves_queries_and_logs_them() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let rt = runtime(dir.path());

    let out = rt.full_pipeline("cassava whitefly disease", 3).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.windows(2).all(|w| w[0].1 >= w[1].1));
    assert_eq!(rt.logged_queries(), 1);
    assert_eq!(rt.config().retrieval.shortlist_size, 8);
}

#[test]
fn exact_passage_text_comes_back_first() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let rt = runtime(dir.path());

    let passage = &advisory_pairs()[6].1;
    let out = rt.full_pipeline(passage, 1).unwrap();
    assert_eq!(&out[0].0, passage);
    assert!((out[0].1 - 1.0).abs() < 1e-9);
}

#[test]
fn failures_are_logged_and_counted() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let rt = runtime(dir.path());

    assert!(rt.full_pipeline("  ", 3).unwrap_err().is_caller_error());
    rt.full_pipeline("drip irrigation", 2).unwrap();

    let snap = rt.metrics_snapshot().unwrap();
    assert_eq!(snap["metrics"]["pipeline"]["queries"], 2);
    assert_eq!(snap["metrics"]["pipeline"]["failures"], 1);
}

#[test]
fn query_log_respects_configured_capacity() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let rt = runtime(dir.path());
    for _ in 0..10 {
        rt.full_pipeline("mulch for dry spells", 2).unwrap();
    }
    assert_eq!(rt.logged_queries(), 4);
}

#[test]
fn pipeline_handles_share_the_loaded_context() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let rt = runtime(dir.path());

    let handle = rt.pipeline();
    assert_eq!(
        handle.full_pipeline("grain storage", 2).unwrap(),
        rt.full_pipeline("grain storage", 2).unwrap()
    );
    assert_eq!(rt.logged_queries(), 1);
}

#[test]
fn missing_artifacts_abort_startup() {
    let dir = tempfile::tempdir().unwrap();
    let err = QrerankRuntime::initialize(RuntimeOptions {
        artifact_dir: Some(dir.path().join("absent")),
        config_toml: Some(CONFIG_TOML.to_string()),
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(err.is_fatal());
}

#[test]
fn malformed_config_is_a_config_error() {
    let err = QrerankRuntime::initialize(RuntimeOptions {
        config_toml: Some("[quantum]\nnum_qubits = \"six\"".to_string()),
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, QrerankError::ConfigError(_)));
}

#[test]
fn invalid_config_values_are_rejected_before_loading() {
    let err = QrerankRuntime::initialize(RuntimeOptions {
        config_toml: Some("[quantum]\nnum_qubits = 0".to_string()),
        ..Default::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, QrerankError::ConfigError(_)));
}

#[test]
fn config_file_is_read_when_given() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let config_path = dir.path().join("qrerank.toml");
    std::fs::write(&config_path, CONFIG_TOML).unwrap();

    let rt = QrerankRuntime::initialize(RuntimeOptions {
        artifact_dir: Some(dir.path().to_path_buf()),
        config_path: Some(config_path),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(rt.config().embedding.dimensions, 96);
}
