use serde::{Deserialize, Serialize};

/// Stable identifier of a corpus record.
pub type RecordId = u64;

/// One ANN search hit. Position in the returned list is the ANN rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnHit {
    pub id: RecordId,
    /// Normalized inner product (cosine similarity) with the query.
    pub similarity: f32,
}
