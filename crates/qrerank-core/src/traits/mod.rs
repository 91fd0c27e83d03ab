mod ann_index;
mod embedding;

pub use ann_index::IAnnIndex;
pub use embedding::IEmbeddingProvider;
