//! Exact inner-product index.
//!
//! Vectors are unit-normalized on insert, so inner product equals cosine
//! similarity. Scoring fans out over rayon; selection and ordering are
//! sequential and deterministic.

use std::cmp::Ordering;

use qrerank_core::errors::{QrerankResult, RetrievalError};
use qrerank_core::models::{AnnHit, RecordId};
use qrerank_core::traits::IAnnIndex;
use qrerank_embeddings::normalize::{dot, l2_normalize};
use rayon::prelude::*;

/// Flat (brute-force) inner-product index. Immutable once shared.
#[derive(Debug, Clone)]
pub struct FlatIpIndex {
    dims: usize,
    ids: Vec<RecordId>,
    /// Row-major, one row of `dims` per id.
    vectors: Vec<f32>,
}

impl FlatIpIndex {
    /// An empty index over `dims`-dimensional vectors.
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            ids: Vec::new(),
            vectors: Vec::new(),
        }
    }

    /// Build from `(id, vector)` rows in insertion order.
    pub fn from_rows<I>(dims: usize, rows: I) -> QrerankResult<Self>
    where
        I: IntoIterator<Item = (RecordId, Vec<f32>)>,
    {
        let mut index = Self::new(dims);
        for (id, vector) in rows {
            index.add(id, vector)?;
        }
        Ok(index)
    }

    /// Append one vector. Insertion order breaks similarity ties.
    pub fn add(&mut self, id: RecordId, mut vector: Vec<f32>) -> QrerankResult<()> {
        if self.dims == 0 {
            return Err(RetrievalError::IndexBuildFailed {
                reason: "index dimensionality is zero".into(),
            }
            .into());
        }
        if vector.len() != self.dims {
            return Err(RetrievalError::IndexBuildFailed {
                reason: format!(
                    "vector for id {id} has {} dims, index has {}",
                    vector.len(),
                    self.dims
                ),
            }
            .into());
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(RetrievalError::IndexBuildFailed {
                reason: format!("vector for id {id} has non-finite components"),
            }
            .into());
        }
        l2_normalize(&mut vector);
        self.ids.push(id);
        self.vectors.extend_from_slice(&vector);
        Ok(())
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }

    /// Stored (normalized) vector at `position`.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dims)?;
        self.vectors.get(start..start + self.dims)
    }
}

/// Best first; equal scores keep insertion order.
fn by_score_then_position(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

impl IAnnIndex for FlatIpIndex {
    fn search(&self, query: &[f32], n: usize) -> QrerankResult<Vec<AnnHit>> {
        if !self.is_available() {
            return Err(RetrievalError::IndexUnavailable {
                reason: "index has no dimensionality".into(),
            }
            .into());
        }
        if query.len() != self.dims {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dims,
                actual: query.len(),
            }
            .into());
        }

        let n = n.min(self.ids.len());
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .par_chunks_exact(self.dims)
            .enumerate()
            .map(|(pos, row)| {
                let s = dot(query, row);
                (pos, if s.is_finite() { s } else { f32::NEG_INFINITY })
            })
            .collect();

        if n < scored.len() {
            scored.select_nth_unstable_by(n - 1, by_score_then_position);
            scored.truncate(n);
        }
        scored.sort_by(by_score_then_position);

        Ok(scored
            .into_iter()
            .map(|(pos, similarity)| AnnHit {
                id: self.ids[pos],
                similarity,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn is_available(&self) -> bool {
        self.dims > 0
    }
}
