//! RetrievalPipeline: query text → ranked `(text, fidelity)` pairs.
//!
//! Stage 1: embed the query and take an ANN shortlist.
//! Stage 2: encode the query as a statevector, score each shortlisted
//! record's stored state by fidelity, rank, and truncate to `top_k`.

use std::sync::Arc;
use std::time::Instant;

use qrerank_core::errors::{QrerankError, QrerankResult};
use qrerank_core::models::{PipelineOutcome, RankedPassage, SkipReason, SkippedCandidate};
use qrerank_observability::tracing_setup::events;
use qrerank_observability::{retrieval_span, simulation_span};
use qrerank_quantum::Statevector;
use tracing::debug;

use crate::context::RetrievalContext;
use crate::ranking::rank_top_k;

struct Candidate<'c> {
    id: u64,
    ann_rank: usize,
    text: &'c str,
    state: &'c Statevector,
}

/// Stateless request handler over a shared [`RetrievalContext`].
///
/// Cloning is cheap; every clone serves the same context.
#[derive(Clone)]
pub struct RetrievalPipeline {
    context: Arc<RetrievalContext>,
}

impl RetrievalPipeline {
    pub fn new(context: Arc<RetrievalContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RetrievalContext {
        &self.context
    }

    /// Ranked `(text, score)` pairs, at most `top_k`, best first.
    ///
    /// # Errors
    /// `Validation` for an empty query or `top_k == 0`; embedding or index
    /// failures propagate. Bad candidates are skipped, never fatal.
    pub fn full_pipeline(&self, query: &str, top_k: usize) -> QrerankResult<Vec<(String, f64)>> {
        Ok(self.run(query, top_k)?.into_pairs())
    }

    /// Like [`full_pipeline`](Self::full_pipeline) with `retrieval.default_top_k`.
    pub fn search(&self, query: &str) -> QrerankResult<Vec<(String, f64)>> {
        self.full_pipeline(query, self.context.config.default_top_k)
    }

    /// Full outcome including skipped candidates and timing.
    pub fn run(&self, query: &str, top_k: usize) -> QrerankResult<PipelineOutcome> {
        let start = Instant::now();
        let span = retrieval_span!(query.len(), top_k);
        let _guard = span.enter();

        if query.trim().is_empty() {
            return Err(QrerankError::Validation {
                reason: "query text is empty".into(),
            });
        }
        if top_k == 0 {
            return Err(QrerankError::Validation {
                reason: "top_k must be at least 1".into(),
            });
        }

        let ctx = &*self.context;

        // Stage 1: embed and shortlist.
        let embedding = ctx.embedder.embed_query(query)?;
        let shortlist_size = ctx.config.effective_shortlist(top_k);
        let hits = ctx.index.search(&embedding, shortlist_size)?;
        debug!(requested = shortlist_size, returned = hits.len(), "ann shortlist");

        let mut skipped = Vec::new();
        let mut candidates = Vec::with_capacity(hits.len());
        for (ann_rank, hit) in hits.iter().enumerate() {
            match ctx.corpus.lookup(hit.id) {
                Ok((text, state)) => candidates.push(Candidate {
                    id: hit.id,
                    ann_rank,
                    text,
                    state,
                }),
                Err(reason) => skipped.push(SkippedCandidate { id: hit.id, reason }),
            }
        }

        // Stage 2: encode the query and score by fidelity.
        let mut scored = Vec::with_capacity(candidates.len());
        if !candidates.is_empty() {
            let query_state = ctx.quantum.encode(&embedding)?;
            let sim_span = simulation_span!(
                ctx.quantum.simulator_name(),
                ctx.quantum.num_qubits(),
                candidates.len()
            );
            let _sim = sim_span.enter();

            let scores = ctx
                .quantum
                .similarity_batch(&query_state.statevector, candidates.iter().map(|c| c.state));
            for (candidate, score) in candidates.iter().zip(scores) {
                match score {
                    Ok(score) => scored.push(RankedPassage {
                        id: candidate.id,
                        text: candidate.text.to_string(),
                        score,
                        ann_rank: candidate.ann_rank,
                    }),
                    Err(e) => {
                        debug!(id = candidate.id, error = %e, "fidelity failed");
                        skipped.push(SkippedCandidate {
                            id: candidate.id,
                            reason: SkipReason::StateDimensionMismatch,
                        });
                    }
                }
            }
        }

        let passages = rank_top_k(scored, top_k);

        if !skipped.is_empty() {
            let ids: Vec<u64> = skipped.iter().map(|s| s.id).collect();
            events::candidates_skipped(skipped.len(), hits.len(), &ids);
        }

        let elapsed = start.elapsed();
        events::pipeline_completed(hits.len(), passages.len(), skipped.len(), elapsed);

        Ok(PipelineOutcome {
            passages,
            shortlist_len: hits.len(),
            skipped,
            elapsed,
        })
    }
}
