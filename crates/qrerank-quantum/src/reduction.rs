//! Fixed linear projection from embedding space to `k` dimensions.
//!
//! `reduce(e) = (e - mean)ᵀ · P`, with `P` of shape `embedding_dim × k` and
//! `mean` defaulting to zero. Parameters come from an offline artifact and
//! never change after construction.

use qrerank_core::errors::{QrerankResult, QuantumError};
use serde::{Deserialize, Serialize};

/// Serialized form of a reduction model (the `reduction.json` artifact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionModelSpec {
    pub embedding_dim: usize,
    pub components: usize,
    /// Centering vector, length `embedding_dim`. Absent means zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<Vec<f64>>,
    /// Rows indexed by embedding dimension, columns by component.
    pub projection: Vec<Vec<f64>>,
    pub mins: Vec<f64>,
    pub maxs: Vec<f64>,
}

/// Validated, immutable reduction model.
#[derive(Debug, Clone)]
pub struct ReductionModel {
    embedding_dim: usize,
    components: usize,
    mean: Vec<f64>,
    /// Row-major `embedding_dim × components`.
    projection: Vec<f64>,
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl ReductionModel {
    /// Validate a serialized model and build it.
    ///
    /// # Errors
    /// `InvalidReductionModel` on inconsistent shapes, non-finite values, or
    /// any `maxs[i] < mins[i]`. Equal bounds are allowed (degenerate range).
    pub fn from_spec(spec: ReductionModelSpec) -> QrerankResult<Self> {
        let invalid = |reason: String| QuantumError::InvalidReductionModel { reason };

        if spec.embedding_dim == 0 || spec.components == 0 {
            return Err(invalid("embedding_dim and components must be non-zero".into()).into());
        }
        if spec.projection.len() != spec.embedding_dim {
            return Err(invalid(format!(
                "projection has {} rows, expected {}",
                spec.projection.len(),
                spec.embedding_dim
            ))
            .into());
        }
        if let Some(row) = spec
            .projection
            .iter()
            .position(|r| r.len() != spec.components)
        {
            return Err(invalid(format!(
                "projection row {row} has {} columns, expected {}",
                spec.projection[row].len(),
                spec.components
            ))
            .into());
        }
        if spec.mins.len() != spec.components || spec.maxs.len() != spec.components {
            return Err(invalid(format!(
                "bounds have {}/{} entries, expected {}",
                spec.mins.len(),
                spec.maxs.len(),
                spec.components
            ))
            .into());
        }
        let mean = spec.mean.unwrap_or_else(|| vec![0.0; spec.embedding_dim]);
        if mean.len() != spec.embedding_dim {
            return Err(invalid(format!(
                "mean has {} entries, expected {}",
                mean.len(),
                spec.embedding_dim
            ))
            .into());
        }

        let projection: Vec<f64> = spec.projection.into_iter().flatten().collect();
        let all_finite = projection
            .iter()
            .chain(&mean)
            .chain(&spec.mins)
            .chain(&spec.maxs)
            .all(|x| x.is_finite());
        if !all_finite {
            return Err(invalid("non-finite parameter".into()).into());
        }
        if let Some(i) = (0..spec.components).find(|&i| spec.maxs[i] < spec.mins[i]) {
            return Err(invalid(format!(
                "component {i}: max {} is below min {}",
                spec.maxs[i], spec.mins[i]
            ))
            .into());
        }

        Ok(Self {
            embedding_dim: spec.embedding_dim,
            components: spec.components,
            mean,
            projection,
            mins: spec.mins,
            maxs: spec.maxs,
        })
    }

    /// Project an embedding to `components` dimensions.
    pub fn reduce(&self, embedding: &[f32]) -> QrerankResult<Vec<f64>> {
        if embedding.len() != self.embedding_dim {
            return Err(QuantumError::DimensionMismatch {
                context: "reduction input",
                expected: self.embedding_dim,
                actual: embedding.len(),
            }
            .into());
        }

        let mut out = vec![0.0f64; self.components];
        for (d, (&x, &mu)) in embedding.iter().zip(&self.mean).enumerate() {
            let centered = x as f64 - mu;
            if centered == 0.0 {
                continue;
            }
            let row = &self.projection[d * self.components..(d + 1) * self.components];
            for (acc, &w) in out.iter_mut().zip(row) {
                *acc += centered * w;
            }
        }
        Ok(out)
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn mins(&self) -> &[f64] {
        &self.mins
    }

    pub fn maxs(&self) -> &[f64] {
        &self.maxs
    }

    /// Back to the serialized form.
    pub fn to_spec(&self) -> ReductionModelSpec {
        ReductionModelSpec {
            embedding_dim: self.embedding_dim,
            components: self.components,
            mean: Some(self.mean.clone()),
            projection: self
                .projection
                .chunks(self.components)
                .map(<[f64]>::to_vec)
                .collect(),
            mins: self.mins.clone(),
            maxs: self.maxs.clone(),
        }
    }
}
