use super::{ArtifactError, EmbeddingError, QuantumError, RetrievalError};

/// Crate-wide error type. Subsystem errors convert into it with `?`.
#[derive(Debug, thiserror::Error)]
pub enum QrerankError {
    #[error("invalid request: {reason}")]
    Validation { reason: String },

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("quantum engine error: {0}")]
    QuantumError(#[from] QuantumError),

    #[error("fatal initialization error: {0}")]
    FatalInitialization(#[from] ArtifactError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl QrerankError {
    /// Whether the caller can fix the request and try again.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::EmbeddingError(EmbeddingError::EmptyInput)
        )
    }

    /// Whether the process must not serve requests after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalInitialization(_) | Self::ConfigError(_))
    }
}

/// Convenience alias used across the workspace.
pub type QrerankResult<T> = Result<T, QrerankError>;
