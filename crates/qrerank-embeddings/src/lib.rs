//! # qrerank-embeddings
//!
//! Text → dense vector encoding for queries and corpus records.
//! The provider is fixed at startup: queries must be embedded by the same
//! model that produced the corpus index.

pub mod cache;
pub mod engine;
pub mod normalize;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use providers::{HashingProvider, OnnxProvider};
