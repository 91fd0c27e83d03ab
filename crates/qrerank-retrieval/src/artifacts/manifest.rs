//! `manifest.json`: format version, shapes, and per-file checksums.

use std::path::Path;

use qrerank_core::constants::ARTIFACT_FORMAT_VERSION;
use qrerank_core::errors::ArtifactError;
use serde::{Deserialize, Serialize};

use super::{checksum, read_file, write_file};

pub const MANIFEST_FILE: &str = "manifest.json";

/// A file in the artifact directory and its expected blake3 digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Relative to the artifact directory.
    pub path: String,
    pub blake3: String,
}

impl FileEntry {
    pub fn for_bytes(path: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            path: path.into(),
            blake3: checksum(bytes),
        }
    }

    /// Read the file under `dir`, optionally verifying its digest.
    pub fn read(&self, dir: &Path, verify: bool) -> Result<Vec<u8>, ArtifactError> {
        let path = dir.join(&self.path);
        let bytes = read_file(&path)?;
        if verify {
            let actual = checksum(&bytes);
            if actual != self.blake3 {
                return Err(ArtifactError::ChecksumMismatch {
                    path: path.display().to_string(),
                    expected: self.blake3.clone(),
                    actual,
                });
            }
        }
        Ok(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFiles {
    pub corpus: FileEntry,
    pub embeddings: FileEntry,
    pub statevectors: FileEntry,
    pub reduction: FileEntry,
}

/// Top-level description of an artifact directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub format_version: u32,
    pub num_qubits: usize,
    pub embedding_dim: usize,
    pub record_count: usize,
    pub files: ManifestFiles,
}

impl ArtifactManifest {
    /// Read and parse `dir/manifest.json`, rejecting unknown format versions.
    pub fn read(dir: &Path) -> Result<Self, ArtifactError> {
        let path = dir.join(MANIFEST_FILE);
        let bytes = read_file(&path)?;
        let manifest: Self = serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if manifest.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::Corrupt {
                path: path.display().to_string(),
                reason: format!(
                    "unsupported format version {} (expected {})",
                    manifest.format_version, ARTIFACT_FORMAT_VERSION
                ),
            });
        }
        Ok(manifest)
    }

    pub fn write(&self, dir: &Path) -> Result<(), ArtifactError> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_vec_pretty(self).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        write_file(&path, &json)
    }
}
