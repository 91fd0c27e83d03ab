//! Shared fixtures for qrerank tests and benches.
//!
//! A small agricultural advisory corpus plus deterministic projection
//! matrices, so every crate builds the same artifacts without model weights.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// One fixture passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub id: u64,
    pub text: String,
}

/// The advisory corpus, in index order.
pub fn advisory_corpus() -> Vec<FixtureRecord> {
    load_fixture("advisory_corpus.json")
}

/// `(id, text)` pairs ready for a corpus builder.
pub fn advisory_pairs() -> Vec<(u64, String)> {
    advisory_corpus()
        .into_iter()
        .map(|r| (r.id, r.text))
        .collect()
}

/// Deterministic `embedding_dim × components` projection.
///
/// Entries are pseudo-random in [-1, 1] from a fixed LCG seed, so columns are
/// close to orthogonal in high dimensions and identical across runs.
pub fn fixture_projection(embedding_dim: usize, components: usize) -> Vec<Vec<f64>> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..embedding_dim)
        .map(|_| {
            (0..components)
                .map(|_| {
                    state = state
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1_442_695_040_888_963_407);
                    ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
                })
                .collect()
        })
        .collect()
}

/// Per-component bounds valid for any unit-norm input.
///
/// `|e · p_j| <= ||p_j||` by Cauchy-Schwarz, so `±||p_j||` bounds component
/// `j` without looking at data.
pub fn projection_bounds(projection: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let components = projection.first().map_or(0, Vec::len);
    let maxs: Vec<f64> = (0..components)
        .map(|j| projection.iter().map(|row| row[j] * row[j]).sum::<f64>().sqrt())
        .collect();
    let mins = maxs.iter().map(|m| -m).collect();
    (mins, maxs)
}
