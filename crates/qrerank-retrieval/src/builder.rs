//! Offline corpus building.
//!
//! Embeds every record and runs it through the same reduction, encoding,
//! and simulation path the pipeline uses for queries, so a query that
//! matches a record's text reproduces its reference state exactly.

use std::collections::HashSet;

use qrerank_core::errors::{QrerankError, QrerankResult};
use qrerank_core::models::RecordId;
use qrerank_embeddings::EmbeddingEngine;
use qrerank_quantum::{QuantumSimilarityEngine, ReductionModelSpec, Statevector};
use tracing::info;

use crate::corpus::CorpusLine;

/// A fully computed corpus, ready to write or to serve from memory.
#[derive(Debug, Clone)]
pub struct BuiltCorpus {
    pub lines: Vec<CorpusLine>,
    /// Unit-normalized, parallel to `lines`.
    pub embeddings: Vec<Vec<f32>>,
    /// Parallel to `lines`.
    pub statevectors: Vec<Statevector>,
    pub reduction: ReductionModelSpec,
    pub num_qubits: usize,
    pub embedding_dim: usize,
}

impl BuiltCorpus {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct CorpusBuilder<'a> {
    embedder: &'a EmbeddingEngine,
    quantum: &'a QuantumSimilarityEngine,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(embedder: &'a EmbeddingEngine, quantum: &'a QuantumSimilarityEngine) -> Self {
        Self { embedder, quantum }
    }

    /// Compute embeddings and reference states for `records`, in order.
    ///
    /// # Errors
    /// `Validation` on duplicate ids; embedding errors for empty texts.
    pub fn build<I>(&self, records: I) -> QrerankResult<BuiltCorpus>
    where
        I: IntoIterator<Item = (RecordId, String)>,
    {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for (id, text) in records {
            if !seen.insert(id) {
                return Err(QrerankError::Validation {
                    reason: format!("duplicate record id {id}"),
                });
            }
            lines.push(CorpusLine { id, text });
        }

        let texts: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
        let embeddings = self.embedder.embed_corpus(&texts)?;
        let statevectors = embeddings
            .iter()
            .map(|e| self.quantum.encode(e).map(|q| q.statevector))
            .collect::<QrerankResult<Vec<_>>>()?;

        info!(
            records = lines.len(),
            provider = self.embedder.active_provider(),
            num_qubits = self.quantum.num_qubits(),
            "corpus built"
        );

        Ok(BuiltCorpus {
            lines,
            embeddings,
            statevectors,
            reduction: self.quantum.reduction().to_spec(),
            num_qubits: self.quantum.num_qubits(),
            embedding_dim: self.embedder.dimensions(),
        })
    }
}
