// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384; // all-MiniLM-L6-v2
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// --- Retrieval ---
pub const DEFAULT_SHORTLIST_SIZE: usize = 20;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_STATEVECTOR_NORM_TOLERANCE: f64 = 1e-6;

// --- Quantum ---
pub const DEFAULT_NUM_QUBITS: usize = 6;
pub const DEFAULT_DEGENERATE_RANGE_EPSILON: f64 = 1e-12;

// --- Artifacts ---
pub const DEFAULT_ARTIFACT_DIR: &str = "data";
pub const DEFAULT_VERIFY_CHECKSUMS: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
