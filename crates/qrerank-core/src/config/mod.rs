//! Layered configuration: compiled defaults, overridden by a TOML document.

pub mod artifact_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod quantum_config;
pub mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use artifact_config::ArtifactConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use quantum_config::QuantumConfig;
pub use retrieval_config::RetrievalConfig;

use crate::constants::MAX_QUBITS;
use crate::errors::{QrerankError, QrerankResult};

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrerankConfig {
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub quantum: QuantumConfig,
    pub artifacts: ArtifactConfig,
    pub observability: ObservabilityConfig,
}

impl QrerankConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read, parse, and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> QrerankResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QrerankError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config =
            Self::from_toml(&raw).map_err(|e| QrerankError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> QrerankResult<()> {
        if self.quantum.num_qubits == 0 || self.quantum.num_qubits > MAX_QUBITS {
            return Err(QrerankError::ConfigError(format!(
                "quantum.num_qubits must be in 1..={MAX_QUBITS}, got {}",
                self.quantum.num_qubits
            )));
        }
        if !(self.quantum.degenerate_range_epsilon > 0.0) {
            return Err(QrerankError::ConfigError(
                "quantum.degenerate_range_epsilon must be positive".to_string(),
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(QrerankError::ConfigError(
                "embedding.dimensions must be non-zero".to_string(),
            ));
        }
        if self.retrieval.shortlist_size == 0 {
            return Err(QrerankError::ConfigError(
                "retrieval.shortlist_size must be non-zero".to_string(),
            ));
        }
        if self.retrieval.default_top_k == 0 {
            return Err(QrerankError::ConfigError(
                "retrieval.default_top_k must be non-zero".to_string(),
            ));
        }
        let tolerance = self.retrieval.statevector_norm_tolerance;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(QrerankError::ConfigError(format!(
                "retrieval.statevector_norm_tolerance must be finite and non-negative, got {tolerance}"
            )));
        }
        match self.embedding.provider.as_str() {
            "hashing" => {}
            "onnx" if self.embedding.model_path.is_some() => {}
            "onnx" => {
                return Err(QrerankError::ConfigError(
                    "embedding.model_path is required for the onnx provider".to_string(),
                ))
            }
            other => {
                return Err(QrerankError::ConfigError(format!(
                    "unknown embedding provider: {other}"
                )))
            }
        }
        Ok(())
    }
}
