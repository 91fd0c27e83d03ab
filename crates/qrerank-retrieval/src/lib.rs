//! # qrerank-retrieval
//!
//! Two-stage retrieval: an exact inner-product shortlist over corpus
//! embeddings, then reranking by simulated state fidelity against each
//! record's precomputed reference state. Also owns the artifact format and
//! the offline builder that produces it.

pub mod artifacts;
pub mod builder;
pub mod context;
pub mod corpus;
pub mod pipeline;
pub mod ranking;
pub mod search;

pub use artifacts::{load_artifacts, ArtifactManifest, ArtifactWriter, LoadedArtifacts};
pub use builder::{BuiltCorpus, CorpusBuilder};
pub use context::RetrievalContext;
pub use corpus::{CorpusLine, CorpusRecord, CorpusStore};
pub use pipeline::RetrievalPipeline;
pub use search::FlatIpIndex;
