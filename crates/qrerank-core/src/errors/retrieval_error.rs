/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("ANN index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    #[error("query dimension mismatch: index has {expected}, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("index build failed: {reason}")]
    IndexBuildFailed { reason: String },
}
