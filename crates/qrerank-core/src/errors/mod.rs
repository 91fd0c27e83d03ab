mod artifact_error;
mod embedding_error;
mod qrerank_error;
mod quantum_error;
mod retrieval_error;

pub use artifact_error::ArtifactError;
pub use embedding_error::EmbeddingError;
pub use qrerank_error::{QrerankError, QrerankResult};
pub use quantum_error::QuantumError;
pub use retrieval_error::RetrievalError;
