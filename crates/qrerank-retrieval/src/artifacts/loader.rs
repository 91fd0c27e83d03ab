//! All-or-nothing artifact loading with cross-checks.

use std::collections::HashSet;
use std::path::Path;

use qrerank_core::config::QrerankConfig;
use qrerank_core::errors::{ArtifactError, QrerankResult};
use qrerank_observability::tracing_setup::events;
use qrerank_quantum::{ReductionModel, ReductionModelSpec, Statevector};
use tracing::debug;

use super::blob::{decode_embeddings, decode_statevectors};
use super::manifest::ArtifactManifest;
use crate::corpus::{CorpusLine, CorpusStore};
use crate::search::FlatIpIndex;

/// Everything read from an artifact directory, validated and ready to serve.
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub manifest: ArtifactManifest,
    pub corpus: CorpusStore,
    pub index: FlatIpIndex,
    pub reduction: ReductionModel,
}

fn shape(what: &str, expected: usize, actual: usize) -> Result<(), ArtifactError> {
    if expected != actual {
        return Err(ArtifactError::ShapeMismatch {
            what: what.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn corrupt(path: &Path, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Corrupt {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Load and cross-check the artifact directory at `dir`.
///
/// # Errors
/// `ConfigError` when `config` does not validate. Any `ArtifactError`,
/// wrapped as `FatalInitialization`. Individual
/// statevectors that are non-finite or off unit norm do not fail the load;
/// they become corrupt slots in the returned corpus.
pub fn load_artifacts(dir: &Path, config: &QrerankConfig) -> QrerankResult<LoadedArtifacts> {
    // Bounds the qubit count before any 2^k sizing below.
    config.validate()?;

    let verify = config.artifacts.verify_checksums;
    let manifest = ArtifactManifest::read(dir)?;
    let files = &manifest.files;

    shape("num_qubits", config.quantum.num_qubits, manifest.num_qubits)?;
    shape(
        "embedding_dim",
        config.embedding.dimensions,
        manifest.embedding_dim,
    )?;

    // Reduction model.
    let reduction_path = dir.join(&files.reduction.path);
    let spec: ReductionModelSpec =
        serde_json::from_slice(&files.reduction.read(dir, verify)?)
            .map_err(|e| corrupt(&reduction_path, e.to_string()))?;
    let reduction =
        ReductionModel::from_spec(spec).map_err(|e| corrupt(&reduction_path, e.to_string()))?;
    shape("reduction components", manifest.num_qubits, reduction.components())?;
    shape(
        "reduction embedding_dim",
        manifest.embedding_dim,
        reduction.embedding_dim(),
    )?;

    // Corpus lines.
    let corpus_path = dir.join(&files.corpus.path);
    let lines = parse_corpus(&files.corpus.read(dir, verify)?, &corpus_path)?;
    shape("corpus records", manifest.record_count, lines.len())?;

    // Embeddings.
    let embeddings_path = dir.join(&files.embeddings.path).display().to_string();
    let embeddings = decode_embeddings(&files.embeddings.read(dir, verify)?, &embeddings_path)?;
    shape("embedding records", manifest.record_count, embeddings.count)?;
    shape("embedding dims", manifest.embedding_dim, embeddings.dims)?;

    // Statevectors.
    let states_path = dir.join(&files.statevectors.path).display().to_string();
    let states = decode_statevectors(&files.statevectors.read(dir, verify)?, &states_path)?;
    // num_qubits equals the validated config value here, so the shift fits.
    let state_dim = 1usize << manifest.num_qubits;
    shape("statevector records", manifest.record_count, states.count)?;
    shape("statevector dim", state_dim, states.dim)?;

    let statevectors = states
        .rows()
        .map(|row| Statevector::from_amplitudes(row.to_vec()))
        .collect::<QrerankResult<Vec<_>>>()
        .map_err(|e| corrupt(Path::new(&states_path), e.to_string()))?;

    let index = FlatIpIndex::from_rows(
        embeddings.dims,
        lines
            .iter()
            .map(|l| l.id)
            .zip(embeddings.rows().map(<[f32]>::to_vec)),
    )
    .map_err(|e| corrupt(Path::new(&embeddings_path), e.to_string()))?;

    let corpus = CorpusStore::from_parts(
        lines,
        statevectors,
        state_dim,
        config.retrieval.statevector_norm_tolerance,
    )
    .map_err(|e| corrupt(&corpus_path, e.to_string()))?;

    events::artifacts_loaded(
        &dir.display().to_string(),
        corpus.len(),
        corpus.corrupt_count(),
        manifest.num_qubits,
    );

    Ok(LoadedArtifacts {
        manifest,
        corpus,
        index,
        reduction,
    })
}

fn parse_corpus(bytes: &[u8], path: &Path) -> Result<Vec<CorpusLine>, ArtifactError> {
    let text = std::str::from_utf8(bytes).map_err(|e| corrupt(path, e.to_string()))?;
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line: CorpusLine = serde_json::from_str(raw)
            .map_err(|e| corrupt(path, format!("line {}: {e}", n + 1)))?;
        if !seen.insert(line.id) {
            return Err(corrupt(path, format!("line {}: duplicate id {}", n + 1, line.id)));
        }
        lines.push(line);
    }
    debug!(records = lines.len(), "parsed corpus lines");
    Ok(lines)
}
