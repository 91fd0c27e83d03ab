//! L1 in-memory cache using moka.
//!
//! TinyLFU admission, bounded entry count, idle TTL. Safe to share across
//! request threads through `&self`.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

/// L1 in-memory embedding cache.
///
/// Keys are blake3 hashes of the embedded text. Values are shared so a hit
/// does not copy the vector until the caller needs an owned one.
pub struct L1MemoryCache {
    cache: Cache<String, Arc<[f32]>>,
}

impl L1MemoryCache {
    /// Create a new L1 cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Arc<[f32]>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Arc<[f32]>) {
        self.cache.insert(key, embedding);
    }
}
