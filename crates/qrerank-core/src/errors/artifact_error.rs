/// Offline artifact loading errors. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact missing: {path}")]
    Missing { path: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("artifact {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("checksum mismatch on {path}: manifest {expected}, file {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("shape mismatch: {what} expected {expected}, found {actual}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },
}
