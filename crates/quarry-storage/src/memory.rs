//! In-memory snapshot store.

use std::collections::BTreeMap;

use quarry_core::errors::StorageError;
use quarry_core::traits::SnapshotStore;
use quarry_core::types::{SnapshotRecord, SnapshotSummary};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Keeps every record in a `BTreeMap` keyed by round.
#[derive(Debug, Clone)]
pub struct MemorySnapshotStore<S> {
    records: BTreeMap<usize, SnapshotRecord<S>>,
}

impl<S> MemorySnapshotStore<S> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<S> Default for MemorySnapshotStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SnapshotStore<S> for MemorySnapshotStore<S>
where
    S: Clone + Serialize + DeserializeOwned,
{
    fn save(&mut self, record: &SnapshotRecord<S>) -> Result<(), StorageError> {
        self.records.insert(record.round, record.clone());
        Ok(())
    }

    fn load(&self, round: usize) -> Result<SnapshotRecord<S>, StorageError> {
        self.records
            .get(&round)
            .cloned()
            .ok_or(StorageError::SnapshotNotFound { round })
    }

    fn summaries(&self) -> Vec<SnapshotSummary> {
        self.records.values().map(SnapshotRecord::summary).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_replaces_same_round() {
        let mut store = MemorySnapshotStore::new();
        store.save(&SnapshotRecord::new(0, 3, 0.5, vec![1.0])).unwrap();
        store.save(&SnapshotRecord::new(0, 2, 0.4, vec![2.0])).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(0).unwrap().snapshot, vec![2.0]);
    }

    #[test]
    fn empty_store_has_no_best() {
        let store: MemorySnapshotStore<Vec<f64>> = MemorySnapshotStore::new();
        assert!(store.is_empty());
        assert!(store.best().is_none());
        assert!(matches!(store.load_best(), Err(StorageError::EmptyStore)));
        assert!(matches!(
            store.load(4),
            Err(StorageError::SnapshotNotFound { round: 4 })
        ));
    }
}
