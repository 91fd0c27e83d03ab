//! Query performance log: query text, top_k, latency, result and skip counts.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub top_k: usize,
    pub latency: Duration,
    pub result_count: usize,
    pub skipped: usize,
    /// Set when the call failed; counts are zero then.
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        query: impl Into<String>,
        top_k: usize,
        latency: Duration,
        result_count: usize,
        skipped: usize,
    ) -> Self {
        Self {
            query: query.into(),
            top_k,
            latency,
            result_count,
            skipped,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Entry for a call that returned an error.
    pub fn failed(
        query: impl Into<String>,
        top_k: usize,
        latency: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(query, top_k, latency, 0, 0)
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Bounded query log; the oldest entries are evicted first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query_len = entry.query.len(),
            top_k = entry.top_k,
            latency_us = entry.latency.as_micros() as u64,
            result_count = entry.result_count,
            skipped = entry.skipped,
            failed = entry.is_failure(),
            "query logged"
        );

        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    /// Average latency across retained queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let p = p.clamp(0.0, 1.0);
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}
