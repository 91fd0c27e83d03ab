//! Span definitions per operation: retrieval, embedding, simulation.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query_len:expr, $top_k:expr) => {
        tracing::info_span!("qrerank.retrieval", query_len = $query_len, top_k = $top_k)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::info_span!("qrerank.embedding", provider = %$provider, dimension = $dimension)
    };
}

/// Create a simulation span.
#[macro_export]
macro_rules! simulation_span {
    ($backend:expr, $num_qubits:expr, $candidates:expr) => {
        tracing::debug_span!(
            "qrerank.simulation",
            backend = %$backend,
            num_qubits = $num_qubits,
            candidates = $candidates
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "qrerank.retrieval";
    pub const EMBEDDING: &str = "qrerank.embedding";
    pub const SIMULATION: &str = "qrerank.simulation";
}
