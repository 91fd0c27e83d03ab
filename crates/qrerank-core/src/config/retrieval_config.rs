use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of ANN candidates handed to the reranker (`top_n`).
    /// Raised to `top_k` for a request that asks for more.
    pub shortlist_size: usize,
    /// Result count used when the caller does not pass one.
    pub default_top_k: usize,
    /// Allowed deviation from unit norm for a stored candidate statevector.
    pub statevector_norm_tolerance: f64,
}

impl RetrievalConfig {
    /// Shortlist size for a request, keeping `top_n >= top_k`.
    pub fn effective_shortlist(&self, top_k: usize) -> usize {
        self.shortlist_size.max(top_k)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            shortlist_size: defaults::DEFAULT_SHORTLIST_SIZE,
            default_top_k: defaults::DEFAULT_TOP_K,
            statevector_norm_tolerance: defaults::DEFAULT_STATEVECTOR_NORM_TOLERANCE,
        }
    }
}
