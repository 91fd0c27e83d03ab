use std::path::Path;
use std::sync::Arc;

use qrerank_core::config::QrerankConfig;
use qrerank_core::errors::{ArtifactError, QrerankError};
use qrerank_embeddings::EmbeddingEngine;
use qrerank_quantum::{QuantumSimilarityEngine, ReductionModel, ReductionModelSpec};
use qrerank_retrieval::artifacts::{
    ArtifactManifest, CORPUS_FILE, EMBEDDINGS_FILE, MANIFEST_FILE, STATEVECTORS_FILE,
};
use qrerank_retrieval::{
    load_artifacts, ArtifactWriter, BuiltCorpus, CorpusBuilder, RetrievalContext,
    RetrievalPipeline,
};
use test_fixtures::{advisory_pairs, fixture_projection, projection_bounds};

const DIMS: usize = 48;
const QUBITS: usize = 6;

fn config() -> QrerankConfig {
    let mut config = QrerankConfig::default();
    config.embedding.dimensions = DIMS;
    config
}

fn embedder(config: &QrerankConfig) -> EmbeddingEngine {
    EmbeddingEngine::new(config.embedding.clone()).unwrap()
}

fn quantum(config: &QrerankConfig) -> QuantumSimilarityEngine {
    let projection = fixture_projection(DIMS, QUBITS);
    let (mins, maxs) = projection_bounds(&projection);
    let spec = ReductionModelSpec {
        embedding_dim: DIMS,
        components: QUBITS,
        mean: Some(vec![0.01; DIMS]),
        projection,
        mins,
        maxs,
    };
    QuantumSimilarityEngine::new(ReductionModel::from_spec(spec).unwrap(), &config.quantum).unwrap()
}

fn built(config: &QrerankConfig) -> BuiltCorpus {
    CorpusBuilder::new(&embedder(config), &quantum(config))
        .build(advisory_pairs())
        .unwrap()
}

fn write_fixture(dir: &Path, config: &QrerankConfig) -> ArtifactManifest {
    ArtifactWriter::new(dir).write(&built(config)).unwrap()
}

fn fatal_kind(err: QrerankError) -> ArtifactError {
    match err {
        QrerankError::FatalInitialization(e) => e,
        other => panic!("expected fatal initialization error, got {other}"),
    }
}

#[test]
fn written_artifacts_load_and_serve_like_the_in_memory_corpus() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_fixture(dir.path(), &config);
    assert_eq!(manifest.record_count, 12);
    assert_eq!(manifest.num_qubits, QUBITS);

    let loaded = load_artifacts(dir.path(), &config).unwrap();
    assert_eq!(loaded.manifest, manifest);
    assert_eq!(loaded.corpus.len(), 12);
    assert_eq!(loaded.corpus.corrupt_count(), 0);

    let from_disk = RetrievalPipeline::new(Arc::new(
        RetrievalContext::from_artifacts(loaded, embedder(&config), &config).unwrap(),
    ));
    let in_memory = RetrievalPipeline::new(Arc::new(
        RetrievalContext::from_built(
            built(&config),
            embedder(&config),
            quantum(&config),
            config.retrieval.clone(),
        )
        .unwrap(),
    ));

    let query = "how do I stop armyworm in maize";
    let a = from_disk.full_pipeline(query, 5).unwrap();
    let b = in_memory.full_pipeline(query, 5).unwrap();
    assert_eq!(a.len(), b.len());
    for ((ta, sa), (tb, sb)) in a.iter().zip(&b) {
        assert_eq!(ta, tb);
        assert!((sa - sb).abs() < 1e-9);
    }
}

#[test]
fn missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_artifacts(&dir.path().join("nope"), &config()).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(fatal_kind(err), ArtifactError::Missing { .. }));
}

#[test]
fn missing_data_file_is_fatal() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &config);
    std::fs::remove_file(dir.path().join(EMBEDDINGS_FILE)).unwrap();
    let err = load_artifacts(dir.path(), &config).unwrap_err();
    assert!(matches!(fatal_kind(err), ArtifactError::Missing { .. }));
}

#[test]
fn tampered_file_fails_checksum() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &config);

    let path = dir.path().join(CORPUS_FILE);
    let mut text = std::fs::read_to_string(&path).unwrap();
    text = text.replace("nitrogen", "nitrogem");
    std::fs::write(&path, text).unwrap();

    let err = load_artifacts(dir.path(), &config).unwrap_err();
    assert!(matches!(fatal_kind(err), ArtifactError::ChecksumMismatch { .. }));
}

#[test]
fn non_finite_statevector_becomes_a_corrupt_slot() {
    let mut config = config();
    config.artifacts.verify_checksums = false;
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &config);

    // First amplitude of record index 2 (id 3).
    let path = dir.path().join(STATEVECTORS_FILE);
    let mut bytes = std::fs::read(&path).unwrap();
    let offset = 8 + 2 * (1 << QUBITS) * 16;
    bytes[offset..offset + 8].copy_from_slice(&f64::NAN.to_le_bytes());
    std::fs::write(&path, bytes).unwrap();

    let loaded = load_artifacts(dir.path(), &config).unwrap();
    assert_eq!(loaded.corpus.corrupt_count(), 1);
    assert!(loaded.corpus.get(3).unwrap().statevector.is_none());
}

#[test]
fn truncated_blob_is_fatal_even_without_checksums() {
    let mut config = config();
    config.artifacts.verify_checksums = false;
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &config);

    let path = dir.path().join(EMBEDDINGS_FILE);
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 4]).unwrap();

    let err = load_artifacts(dir.path(), &config).unwrap_err();
    assert!(matches!(fatal_kind(err), ArtifactError::Corrupt { .. }));
}

#[test]
fn qubit_count_must_match_configuration() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), &config);

    let mut other = config.clone();
    other.quantum.num_qubits = 4;
    let err = load_artifacts(dir.path(), &other).unwrap_err();
    assert!(matches!(fatal_kind(err), ArtifactError::ShapeMismatch { .. }));
}

#[test]
fn oversized_qubit_count_is_a_config_error_before_any_sizing() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = write_fixture(dir.path(), &config);
    manifest.num_qubits = 64;
    manifest.write(dir.path()).unwrap();

    let mut wide = config.clone();
    wide.quantum.num_qubits = 64;
    let err = load_artifacts(dir.path(), &wide).unwrap_err();
    assert!(matches!(err, QrerankError::ConfigError(_)), "got {err}");
    assert!(err.is_fatal());
}

#[test]
fn unsupported_format_version_is_rejected() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = write_fixture(dir.path(), &config);
    manifest.format_version += 1;
    manifest.write(dir.path()).unwrap();

    let err = load_artifacts(dir.path(), &config).unwrap_err();
    assert!(matches!(fatal_kind(err), ArtifactError::Corrupt { .. }));
    assert!(dir.path().join(MANIFEST_FILE).exists());
}
