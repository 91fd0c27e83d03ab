use serde::{Deserialize, Serialize};

use super::RecordId;

/// A reranked source passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPassage {
    pub id: RecordId,
    pub text: String,
    /// State fidelity with the query, in [0, 1].
    pub score: f64,
    /// Position the candidate held in the ANN shortlist.
    pub ann_rank: usize,
}

impl RankedPassage {
    /// The public `(text, score)` pair.
    pub fn into_pair(self) -> (String, f64) {
        (self.text, self.score)
    }
}
