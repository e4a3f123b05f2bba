use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StorageError;
use crate::types::{SnapshotRecord, SnapshotSummary};

/// Versioned store of classifier snapshots, keyed by round index.
///
/// Saving a record for a round that already has one replaces it. The best
/// snapshot across the whole run is a reduction over the stored summaries.
pub trait SnapshotStore<S>
where
    S: Serialize + DeserializeOwned,
{
    /// Persist `record`, replacing any earlier record for the same round.
    fn save(&mut self, record: &SnapshotRecord<S>) -> Result<(), StorageError>;

    /// Load the record stored for `round`.
    fn load(&self, round: usize) -> Result<SnapshotRecord<S>, StorageError>;

    /// Summaries of every stored record, ordered by round.
    fn summaries(&self) -> Vec<SnapshotSummary>;

    /// Summary of the record with the lowest validation loss.
    fn best(&self) -> Option<SnapshotSummary> {
        SnapshotSummary::best_of(&self.summaries())
    }

    /// Load the record with the lowest validation loss.
    fn load_best(&self) -> Result<SnapshotRecord<S>, StorageError> {
        let best = self.best().ok_or(StorageError::EmptyStore)?;
        self.load(best.round)
    }

    /// Load the lowest-loss record among rounds `0..=last_round`. Records
    /// for later rounds are ignored.
    fn load_best_through(&self, last_round: usize) -> Result<SnapshotRecord<S>, StorageError> {
        let summaries = self.summaries();
        let best = SnapshotSummary::best_of(summaries.iter().filter(|s| s.round <= last_round))
            .ok_or(StorageError::EmptyStore)?;
        self.load(best.round)
    }

    fn len(&self) -> usize {
        self.summaries().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
