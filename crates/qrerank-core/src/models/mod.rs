mod ann_hit;
mod pipeline_outcome;
mod ranked_passage;

pub use ann_hit::{AnnHit, RecordId};
pub use pipeline_outcome::{PipelineOutcome, SkipReason, SkippedCandidate};
pub use ranked_passage::RankedPassage;
