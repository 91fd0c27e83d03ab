use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{RankedPassage, RecordId};

/// Why a shortlisted candidate was dropped before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The ANN index returned an id the corpus table does not have.
    UnknownId,
    /// The stored statevector failed its load-time integrity check.
    CorruptStatevector,
    /// The stored statevector has the wrong number of amplitudes.
    StateDimensionMismatch,
}

/// A candidate the pipeline skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub id: RecordId,
    pub reason: SkipReason,
}

/// Full result of one pipeline call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Ranked passages, best first, at most `top_k`.
    pub passages: Vec<RankedPassage>,
    /// Number of ANN candidates considered.
    pub shortlist_len: usize,
    /// Candidates dropped because of data inconsistencies.
    pub skipped: Vec<SkippedCandidate>,
    pub elapsed: Duration,
}

impl PipelineOutcome {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Consume into the public `(text, score)` list.
    pub fn into_pairs(self) -> Vec<(String, f64)> {
        self.passages
            .into_iter()
            .map(RankedPassage::into_pair)
            .collect()
    }
}
