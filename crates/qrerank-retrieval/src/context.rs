//! Shared, immutable retrieval state.
//!
//! Built once at startup and handed to request workers behind an `Arc`.
//! Nothing here is mutated after construction; the only interior
//! mutability is inside the embedder (query cache, inference session).

use qrerank_core::config::{QrerankConfig, RetrievalConfig};
use qrerank_core::errors::{ArtifactError, QrerankResult};
use qrerank_core::traits::IAnnIndex;
use qrerank_embeddings::EmbeddingEngine;
use qrerank_quantum::QuantumSimilarityEngine;

use crate::artifacts::LoadedArtifacts;
use crate::builder::BuiltCorpus;
use crate::corpus::CorpusStore;
use crate::search::FlatIpIndex;

pub struct RetrievalContext {
    pub embedder: EmbeddingEngine,
    pub index: Box<dyn IAnnIndex>,
    pub quantum: QuantumSimilarityEngine,
    pub corpus: CorpusStore,
    pub config: RetrievalConfig,
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

impl RetrievalContext {
    /// Assemble a context, checking that every component agrees on shapes.
    pub fn new(
        embedder: EmbeddingEngine,
        index: Box<dyn IAnnIndex>,
        quantum: QuantumSimilarityEngine,
        corpus: CorpusStore,
        config: RetrievalConfig,
    ) -> QrerankResult<Self> {
        shape("index dims", embedder.dimensions(), index.dimensions())?;
        shape("reduction input dims", embedder.dimensions(), quantum.embedding_dim())?;
        shape(
            "corpus state dimension",
            quantum.state_dimension(),
            corpus.state_dimension(),
        )?;
        Ok(Self {
            embedder,
            index,
            quantum,
            corpus,
            config,
        })
    }

    /// Serve a corpus built in memory, without going through files.
    pub fn from_built(
        built: BuiltCorpus,
        embedder: EmbeddingEngine,
        quantum: QuantumSimilarityEngine,
        config: RetrievalConfig,
    ) -> QrerankResult<Self> {
        let index = FlatIpIndex::from_rows(
            built.embedding_dim,
            built.lines.iter().map(|l| l.id).zip(built.embeddings),
        )?;
        let corpus = CorpusStore::from_parts(
            built.lines,
            built.statevectors,
            quantum.state_dimension(),
            config.statevector_norm_tolerance,
        )?;
        Self::new(embedder, Box::new(index), quantum, corpus, config)
    }

    /// Serve loaded artifacts.
    pub fn from_artifacts(
        loaded: LoadedArtifacts,
        embedder: EmbeddingEngine,
        config: &QrerankConfig,
    ) -> QrerankResult<Self> {
        let quantum = QuantumSimilarityEngine::new(loaded.reduction, &config.quantum)?;
        Self::new(
            embedder,
            Box::new(loaded.index),
            quantum,
            loaded.corpus,
            config.retrieval.clone(),
        )
    }
}
