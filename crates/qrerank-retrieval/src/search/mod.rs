//! First-stage candidate search.

pub mod flat_index;

pub use flat_index::FlatIpIndex;
