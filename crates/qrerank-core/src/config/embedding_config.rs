use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "onnx" or "hashing".
    pub provider: String,
    /// Path to the ONNX model file. Required when `provider = "onnx"`.
    pub model_path: Option<String>,
    /// Path to the model's `tokenizer.json`. Defaults to the file of that
    /// name beside `model_path`.
    pub tokenizer_path: Option<String>,
    /// Embedding dimensions. Must match the corpus index.
    pub dimensions: usize,
    /// Batch size for offline embedding.
    pub batch_size: usize,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model_path: None,
            tokenizer_path: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}
