use crate::errors::QrerankResult;
use crate::models::AnnHit;

/// Immutable nearest-neighbor index over corpus embeddings.
pub trait IAnnIndex: Send + Sync {
    /// Return up to `n` hits for a unit-normalized query, best first.
    ///
    /// `n` is clamped to the corpus size. Equal similarities keep
    /// insertion order. An empty index yields an empty list.
    fn search(&self, query: &[f32], n: usize) -> QrerankResult<Vec<AnnHit>>;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of indexed vectors.
    fn dimensions(&self) -> usize;

    /// Whether the index can serve searches.
    fn is_available(&self) -> bool;
}
