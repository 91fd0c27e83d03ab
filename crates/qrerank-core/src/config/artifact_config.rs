use serde::{Deserialize, Serialize};

use super::defaults;

/// Offline artifact location and load policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory containing `manifest.json` and the files it lists.
    pub dir: String,
    /// Verify blake3 checksums from the manifest before use.
    pub verify_checksums: bool,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: defaults::DEFAULT_ARTIFACT_DIR.to_string(),
            verify_checksums: defaults::DEFAULT_VERIFY_CHECKSUMS,
        }
    }
}
