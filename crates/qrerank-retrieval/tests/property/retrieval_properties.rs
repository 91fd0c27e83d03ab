use std::sync::Arc;

use proptest::prelude::*;
use qrerank_core::config::QrerankConfig;
use qrerank_core::models::RankedPassage;
use qrerank_core::traits::IAnnIndex;
use qrerank_embeddings::EmbeddingEngine;
use qrerank_quantum::{QuantumSimilarityEngine, ReductionModel, ReductionModelSpec};
use qrerank_retrieval::ranking::rank_top_k;
use qrerank_retrieval::{CorpusBuilder, FlatIpIndex, RetrievalContext, RetrievalPipeline};
use test_fixtures::{advisory_pairs, fixture_projection, projection_bounds};

const DIMS: usize = 32;

fn pipeline() -> RetrievalPipeline {
    let mut config = QrerankConfig::default();
    config.embedding.dimensions = DIMS;
    let projection = fixture_projection(DIMS, config.quantum.num_qubits);
    let (mins, maxs) = projection_bounds(&projection);
    let spec = ReductionModelSpec {
        embedding_dim: DIMS,
        components: config.quantum.num_qubits,
        mean: None,
        projection,
        mins,
        maxs,
    };
    let make = || {
        (
            EmbeddingEngine::new(config.embedding.clone()).unwrap(),
            QuantumSimilarityEngine::new(
                ReductionModel::from_spec(spec.clone()).unwrap(),
                &config.quantum,
            )
            .unwrap(),
        )
    };
    let (embedder, quantum) = make();
    let built = CorpusBuilder::new(&embedder, &quantum)
        .build(advisory_pairs())
        .unwrap();
    let (embedder, quantum) = make();
    let ctx =
        RetrievalContext::from_built(built, embedder, quantum, config.retrieval.clone()).unwrap();
    RetrievalPipeline::new(Arc::new(ctx))
}

fn arb_rows() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 4), 0..40)
}

// ── ANN search: length, order, membership ────────────────────────────────

proptest! {
    #[test]
    fn ann_hits_are_clamped_and_descending(
        rows in arb_rows(),
        query in prop::collection::vec(-1.0f32..1.0, 4),
        n in 0usize..60,
    ) {
        let index = FlatIpIndex::from_rows(
            4,
            rows.into_iter().enumerate().map(|(i, r)| (i as u64, r)),
        ).unwrap();
        let hits = index.search(&query, n).unwrap();
        prop_assert_eq!(hits.len(), n.min(index.len()));
        for w in hits.windows(2) {
            prop_assert!(w[0].similarity >= w[1].similarity);
            if w[0].similarity == w[1].similarity {
                prop_assert!(w[0].id < w[1].id);
            }
        }
    }
}

// ── Ranking: bounded and sorted ──────────────────────────────────────────

proptest! {
    #[test]
    fn ranking_is_bounded_and_sorted(
        scores in prop::collection::vec(0.0f64..=1.0, 0..30),
        top_k in 1usize..40,
    ) {
        let passages: Vec<RankedPassage> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| RankedPassage { id: i as u64, text: i.to_string(), score, ann_rank: i })
            .collect();
        let ranked = rank_top_k(passages, top_k);
        prop_assert_eq!(ranked.len(), top_k.min(scores.len()));
        for w in ranked.windows(2) {
            prop_assert!(w[0].score > w[1].score
                || (w[0].score == w[1].score && w[0].ann_rank < w[1].ann_rank));
        }
    }
}

// ── Pipeline: any non-empty query gives a bounded, sorted result ─────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pipeline_output_respects_contract(
        query in "[a-z]{2,10}( [a-z]{2,10}){0,6}",
        top_k in 1usize..15,
    ) {
        let p = pipeline();
        let out = p.full_pipeline(&query, top_k).unwrap();
        prop_assert!(out.len() <= top_k);
        prop_assert_eq!(out.len(), top_k.min(12));
        for w in out.windows(2) {
            prop_assert!(w[0].1 >= w[1].1);
        }
        for (_, s) in &out {
            prop_assert!((0.0..=1.0).contains(s));
        }
        prop_assert_eq!(&out, &p.full_pipeline(&query, top_k).unwrap());
    }
}
