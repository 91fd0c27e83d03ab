//! # qrerank-core
//!
//! Foundation crate for the qrerank retrieval pipeline.
//! Defines the shared config, errors, models, traits, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::QrerankConfig;
pub use errors::{QrerankError, QrerankResult};
pub use models::{AnnHit, PipelineOutcome, RankedPassage, RecordId};
