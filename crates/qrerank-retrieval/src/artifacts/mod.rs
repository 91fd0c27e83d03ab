//! Offline artifact directory: manifest, corpus lines, embedding and
//! statevector blobs, and the reduction model.
//!
//! Loading is all-or-nothing. Any missing file, checksum mismatch, or shape
//! disagreement is an `ArtifactError`, which surfaces as
//! `QrerankError::FatalInitialization`.

pub mod blob;
pub mod loader;
pub mod manifest;
pub mod writer;

pub use loader::{load_artifacts, LoadedArtifacts};
pub use manifest::{ArtifactManifest, FileEntry, ManifestFiles, MANIFEST_FILE};
pub use writer::ArtifactWriter;

use std::path::Path;

use qrerank_core::errors::ArtifactError;

pub const CORPUS_FILE: &str = "corpus.jsonl";
pub const EMBEDDINGS_FILE: &str = "embeddings.bin";
pub const STATEVECTORS_FILE: &str = "statevectors.bin";
pub const REDUCTION_FILE: &str = "reduction.json";

/// Read a whole file, mapping absence and I/O failures to artifact errors.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ArtifactError::Missing {
            path: path.display().to_string(),
        },
        _ => ArtifactError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    std::fs::write(path, bytes).map_err(|e| ArtifactError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Hex blake3 digest used for manifest checksums.
pub fn checksum(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
