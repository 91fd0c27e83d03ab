//! Corpus table: id → passage text and precomputed reference state.
//!
//! Statevectors are never recomputed at query time. A record whose stored
//! state failed the integrity check keeps its text but has no usable state,
//! and lookups report it so the pipeline can skip it.

use std::collections::HashMap;

use qrerank_core::errors::{QrerankResult, RetrievalError};
use qrerank_core::models::{RecordId, SkipReason};
use qrerank_observability::tracing_setup::events;
use qrerank_quantum::Statevector;
use serde::{Deserialize, Serialize};

/// One line of the corpus JSONL artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusLine {
    pub id: RecordId,
    pub text: String,
}

/// A loaded corpus record.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    pub id: RecordId,
    pub text: String,
    /// `None` for a corrupt slot.
    pub statevector: Option<Statevector>,
}

/// Immutable corpus table keyed by record id.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    records: Vec<CorpusRecord>,
    by_id: HashMap<RecordId, usize>,
    state_dim: usize,
}

impl CorpusStore {
    /// An empty store for states of `state_dim` amplitudes.
    pub fn new(state_dim: usize) -> Self {
        Self {
            records: Vec::new(),
            by_id: HashMap::new(),
            state_dim,
        }
    }

    /// Build from parallel lines and states, marking states that are
    /// non-finite or off unit norm by more than `norm_tolerance` as corrupt.
    pub fn from_parts(
        lines: Vec<CorpusLine>,
        states: Vec<Statevector>,
        state_dim: usize,
        norm_tolerance: f64,
    ) -> QrerankResult<Self> {
        if lines.len() != states.len() {
            return Err(RetrievalError::IndexBuildFailed {
                reason: format!(
                    "{} corpus lines but {} statevectors",
                    lines.len(),
                    states.len()
                ),
            }
            .into());
        }

        let mut store = Self::new(state_dim);
        for (line, state) in lines.into_iter().zip(states) {
            let statevector = if state.is_valid(norm_tolerance) {
                Some(state)
            } else {
                events::corrupt_statevector(line.id, state.norm());
                None
            };
            store.insert(CorpusRecord {
                id: line.id,
                text: line.text,
                statevector,
            })?;
        }
        Ok(store)
    }

    /// Add a record. Ids must be unique.
    pub fn insert(&mut self, record: CorpusRecord) -> QrerankResult<()> {
        if self.by_id.contains_key(&record.id) {
            return Err(RetrievalError::IndexBuildFailed {
                reason: format!("duplicate record id {}", record.id),
            }
            .into());
        }
        self.by_id.insert(record.id, self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: RecordId) -> Option<&CorpusRecord> {
        self.by_id.get(&id).map(|&i| &self.records[i])
    }

    /// Text and usable reference state for `id`, or why there is none.
    pub fn lookup(&self, id: RecordId) -> Result<(&str, &Statevector), SkipReason> {
        let record = self.get(id).ok_or(SkipReason::UnknownId)?;
        let state = record
            .statevector
            .as_ref()
            .ok_or(SkipReason::CorruptStatevector)?;
        if state.len() != self.state_dim {
            return Err(SkipReason::StateDimensionMismatch);
        }
        Ok((&record.text, state))
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CorpusRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of slots with no usable state.
    pub fn corrupt_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.statevector.is_none())
            .count()
    }

    pub fn state_dimension(&self) -> usize {
        self.state_dim
    }
}
