//! QrerankRuntime: owns the shared retrieval context and observability.
//!
//! Constructed explicitly and passed to whoever serves requests; there is no
//! process-global instance.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use qrerank_core::config::QrerankConfig;
use qrerank_core::errors::{QrerankError, QrerankResult};
use qrerank_core::models::PipelineOutcome;
use qrerank_embeddings::EmbeddingEngine;
use qrerank_observability::{init_tracing_from_config, ObservabilityEngine};
use qrerank_retrieval::{load_artifacts, RetrievalContext, RetrievalPipeline};
use tracing::info;

/// Options for initializing the runtime.
#[derive(Debug, Default)]
pub struct RuntimeOptions {
    /// Artifact directory. If None, uses `artifacts.dir` from config.
    pub artifact_dir: Option<PathBuf>,
    /// TOML configuration string. Takes precedence over `config_path`.
    pub config_toml: Option<String>,
    /// TOML configuration file.
    pub config_path: Option<PathBuf>,
    /// Install the global tracing subscriber from `[observability]`.
    pub init_tracing: bool,
}

/// The loaded, ready-to-serve process state.
pub struct QrerankRuntime {
    pipeline: RetrievalPipeline,
    observability: Mutex<ObservabilityEngine>,
    config: QrerankConfig,
}

impl QrerankRuntime {
    /// Load everything needed to serve queries.
    ///
    /// # Errors
    /// Any configuration, embedding-model, or artifact failure. All of them
    /// are fatal: the process must not serve with partial state.
    pub fn initialize(opts: RuntimeOptions) -> QrerankResult<Self> {
        let config = match (&opts.config_toml, &opts.config_path) {
            (Some(toml_str), _) => {
                let config = QrerankConfig::from_toml(toml_str)
                    .map_err(|e| QrerankError::ConfigError(e.to_string()))?;
                config.validate()?;
                config
            }
            (None, Some(path)) => QrerankConfig::from_file(path)?,
            (None, None) => QrerankConfig::default(),
        };

        if opts.init_tracing {
            init_tracing_from_config(&config.observability);
        }

        let dir = opts
            .artifact_dir
            .unwrap_or_else(|| PathBuf::from(&config.artifacts.dir));

        let embedder = EmbeddingEngine::new(config.embedding.clone())?;
        let loaded = load_artifacts(&dir, &config)?;
        let context = RetrievalContext::from_artifacts(loaded, embedder, &config)?;

        info!(
            dir = %dir.display(),
            records = context.corpus.len(),
            provider = context.embedder.active_provider(),
            num_qubits = context.quantum.num_qubits(),
            "runtime initialized"
        );

        Ok(Self {
            pipeline: RetrievalPipeline::new(Arc::new(context)),
            observability: Mutex::new(ObservabilityEngine::from_config(&config.observability)),
            config,
        })
    }

    /// Ranked `(text, score)` pairs for `query`, recorded in the query log.
    pub fn full_pipeline(&self, query: &str, top_k: usize) -> QrerankResult<Vec<(String, f64)>> {
        Ok(self.run(query, top_k)?.into_pairs())
    }

    /// Full outcome, recorded in the query log.
    pub fn run(&self, query: &str, top_k: usize) -> QrerankResult<PipelineOutcome> {
        let start = Instant::now();
        let result = self.pipeline.run(query, top_k);

        let mut obs = self.observability();
        match &result {
            Ok(outcome) => obs.record_outcome(query, top_k, outcome),
            Err(e) => obs.record_failure(query, top_k, start.elapsed(), e),
        }
        result
    }

    /// A cheap handle for request workers; it bypasses the query log.
    pub fn pipeline(&self) -> RetrievalPipeline {
        self.pipeline.clone()
    }

    pub fn config(&self) -> &QrerankConfig {
        &self.config
    }

    /// JSON snapshot of metrics and query log summary.
    pub fn metrics_snapshot(&self) -> QrerankResult<serde_json::Value> {
        self.observability().metrics_snapshot()
    }

    /// Number of retained query log entries.
    pub fn logged_queries(&self) -> usize {
        self.observability().query_log.count()
    }

    fn observability(&self) -> MutexGuard<'_, ObservabilityEngine> {
        // A panic while holding the lock leaves only counters half-updated.
        self.observability
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
