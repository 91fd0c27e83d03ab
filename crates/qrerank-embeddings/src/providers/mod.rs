//! Embedding providers and startup selection.

pub mod hashing_provider;
pub mod onnx_provider;

pub use hashing_provider::HashingProvider;
pub use onnx_provider::OnnxProvider;

use qrerank_core::config::EmbeddingConfig;
use qrerank_core::errors::{EmbeddingError, QrerankResult};
use qrerank_core::traits::IEmbeddingProvider;

/// Build the configured provider.
///
/// There is no fallback: the corpus index was built with one model, and a
/// query embedded by any other lives in a different space.
pub fn create_provider(config: &EmbeddingConfig) -> QrerankResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "hashing" => Ok(Box::new(HashingProvider::new(config.dimensions))),
        "onnx" => {
            let path = config.model_path.as_deref().ok_or_else(|| {
                EmbeddingError::ModelLoadFailed {
                    path: String::new(),
                    reason: "embedding.model_path is not set".to_string(),
                }
            })?;
            Ok(Box::new(OnnxProvider::load(
                path,
                config.tokenizer_path.as_deref(),
                config.dimensions,
            )?))
        }
        other => Err(EmbeddingError::ProviderUnavailable {
            provider: other.to_string(),
        }
        .into()),
    }
}
