//! Persisted classifier snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot stored under the index of the round whose `fit` produced it.
///
/// Round 0 is the initial fit; round `i` is the retrain after the `i`-th
/// sampling step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord<S> {
    pub round: usize,
    pub epoch: usize,
    pub validation_loss: f64,
    pub saved_at: DateTime<Utc>,
    pub snapshot: S,
}

impl<S> SnapshotRecord<S> {
    pub fn new(round: usize, epoch: usize, validation_loss: f64, snapshot: S) -> Self {
        Self {
            round,
            epoch,
            validation_loss,
            saved_at: Utc::now(),
            snapshot,
        }
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            round: self.round,
            epoch: self.epoch,
            validation_loss: self.validation_loss,
            saved_at: self.saved_at,
        }
    }
}

/// Metadata of a stored snapshot, without the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub round: usize,
    pub epoch: usize,
    pub validation_loss: f64,
    pub saved_at: DateTime<Utc>,
}

impl SnapshotSummary {
    /// The summary with the lowest validation loss; ties go to the
    /// earliest round.
    pub fn best_of<'a, I>(summaries: I) -> Option<SnapshotSummary>
    where
        I: IntoIterator<Item = &'a SnapshotSummary>,
    {
        summaries.into_iter().copied().fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                if candidate.validation_loss < current.validation_loss
                    || (candidate.validation_loss == current.validation_loss
                        && candidate.round < current.round)
                {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        })
    }
}
