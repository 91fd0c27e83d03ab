//! Write a built corpus as an artifact directory.

use std::path::{Path, PathBuf};

use qrerank_core::constants::ARTIFACT_FORMAT_VERSION;
use qrerank_core::errors::{ArtifactError, QrerankResult};
use tracing::info;

use super::blob::{encode_embeddings, encode_statevectors};
use super::manifest::{ArtifactManifest, FileEntry, ManifestFiles};
use super::{write_file, CORPUS_FILE, EMBEDDINGS_FILE, REDUCTION_FILE, STATEVECTORS_FILE};
use crate::builder::BuiltCorpus;

pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write all files, then the manifest last so a partial write never
    /// leaves a loadable directory behind.
    pub fn write(&self, built: &BuiltCorpus) -> QrerankResult<ArtifactManifest> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::Io {
            path: self.dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut corpus = Vec::new();
        for line in &built.lines {
            serde_json::to_writer(&mut corpus, line)?;
            corpus.push(b'\n');
        }
        let embeddings = encode_embeddings(&built.embeddings, built.embedding_dim);
        let state_rows: Vec<_> = built.statevectors.iter().map(|s| s.amplitudes()).collect();
        let statevectors = encode_statevectors(&state_rows, 1usize << built.num_qubits);
        let reduction = serde_json::to_vec_pretty(&built.reduction)?;

        let files = ManifestFiles {
            corpus: self.put(CORPUS_FILE, &corpus)?,
            embeddings: self.put(EMBEDDINGS_FILE, &embeddings)?,
            statevectors: self.put(STATEVECTORS_FILE, &statevectors)?,
            reduction: self.put(REDUCTION_FILE, &reduction)?,
        };

        let manifest = ArtifactManifest {
            format_version: ARTIFACT_FORMAT_VERSION,
            num_qubits: built.num_qubits,
            embedding_dim: built.embedding_dim,
            record_count: built.len(),
            files,
        };
        manifest.write(&self.dir)?;

        info!(
            dir = %self.dir.display(),
            records = manifest.record_count,
            "artifacts written"
        );
        Ok(manifest)
    }

    fn put(&self, name: &str, bytes: &[u8]) -> Result<FileEntry, ArtifactError> {
        write_file(&self.dir.join(name), bytes)?;
        Ok(FileEntry::for_bytes(name, bytes))
    }
}
