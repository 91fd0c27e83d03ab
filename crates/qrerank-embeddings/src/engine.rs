//! EmbeddingEngine: the main entry point for qrerank-embeddings.
//!
//! Owns the configured provider and the L1 query cache, validates input,
//! and returns unit-normalized vectors. Implements `IEmbeddingProvider`.

use std::sync::Arc;

use qrerank_core::config::EmbeddingConfig;
use qrerank_core::errors::{EmbeddingError, QrerankResult};
use qrerank_core::traits::IEmbeddingProvider;
use qrerank_observability::embedding_span;
use tracing::{debug, info};

use crate::cache::{self, L1MemoryCache};
use crate::normalize::{l2_norm, l2_normalize};
use crate::providers;

/// The embedding engine shared by all request workers.
///
/// Every method takes `&self`; the cache is internally concurrent and the
/// provider is read-only after construction.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine with the provider named in `config`.
    ///
    /// # Errors
    /// Fails if the provider cannot be constructed (e.g. the ONNX model is
    /// missing). Callers treat that as fatal at startup.
    pub fn new(config: EmbeddingConfig) -> QrerankResult<Self> {
        let provider = providers::create_provider(&config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create an engine around an already-built provider.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: EmbeddingConfig) -> Self {
        let cache = L1MemoryCache::new(config.l1_cache_size);

        info!(
            provider = provider.name(),
            dims = config.dimensions,
            cache_size = config.l1_cache_size,
            "EmbeddingEngine initialized"
        );

        Self {
            provider,
            cache,
            config,
        }
    }

    /// Embed a query: validate, check the cache, embed, normalize.
    ///
    /// # Errors
    /// `EmbeddingError::EmptyInput` for empty or whitespace-only text, and
    /// for text that embeds to the zero vector.
    pub fn embed_query(&self, query: &str) -> QrerankResult<Vec<f32>> {
        Self::reject_empty(query)?;

        let key = cache::text_key(query);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "query embedding cache hit");
            return Ok(hit.to_vec());
        }

        let embedding = self.encode(query)?;
        self.cache.insert(key, Arc::from(embedding.as_slice()));
        Ok(embedding)
    }

    /// Embed corpus texts for offline index building. Bypasses the cache.
    pub fn embed_corpus(&self, texts: &[String]) -> QrerankResult<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.batch_size.max(1)) {
            for text in chunk {
                Self::reject_empty(text)?;
            }
            for mut v in self.provider.embed_batch(chunk)? {
                self.check_dimensions(&v)?;
                Self::reject_contentless(&v)?;
                l2_normalize(&mut v);
                out.push(v);
            }
        }
        Ok(out)
    }

    /// Active provider name.
    pub fn active_provider(&self) -> &str {
        self.provider.name()
    }

    /// Configured embedding dimensions.
    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn encode(&self, text: &str) -> QrerankResult<Vec<f32>> {
        let span = embedding_span!(self.provider.name(), self.config.dimensions);
        let _guard = span.enter();

        let mut v = self.provider.embed(text)?;
        self.check_dimensions(&v)?;
        Self::reject_contentless(&v)?;
        l2_normalize(&mut v);
        Ok(v)
    }

    fn reject_empty(text: &str) -> QrerankResult<()> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }
        Ok(())
    }

    /// A zero vector has no direction to compare, so text the provider found
    /// nothing in (punctuation, stray symbols) is rejected like empty text.
    fn reject_contentless(v: &[f32]) -> QrerankResult<()> {
        if !(l2_norm(v) > 0.0) {
            return Err(EmbeddingError::EmptyInput.into());
        }
        Ok(())
    }

    fn check_dimensions(&self, v: &[f32]) -> QrerankResult<()> {
        if v.len() != self.config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: v.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> QrerankResult<Vec<f32>> {
        self.embed_query(text)
    }

    fn embed_batch(&self, texts: &[String]) -> QrerankResult<Vec<Vec<f32>>> {
        self.embed_corpus(texts)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "qrerank-embedding-engine"
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
