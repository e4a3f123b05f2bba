//! Per-round summaries and the final run report.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use quarry_core::errors::StorageError;
use quarry_core::types::Evaluation;
use serde::{Deserialize, Serialize};

use crate::metrics::{create_parent, io_error};

/// The evaluate + sample step that followed a round's fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingStep {
    pub evaluation: Evaluation,
    pub ratio_positive: f64,
    pub ratio_negative: f64,
    /// True when the 0.5 / 0.5 fallback was used.
    pub degenerate: bool,
    pub requested_positive: usize,
    pub drawn_positive: usize,
    pub requested_negative: usize,
    pub drawn_negative: usize,
}

impl SamplingStep {
    pub fn drawn(&self) -> usize {
        self.drawn_positive + self.drawn_negative
    }
}

/// One `fit` call and, unless it was the last round, the sampling step it
/// informed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: usize,
    pub train_size: usize,
    pub epochs_run: usize,
    pub best_epoch: usize,
    pub best_validation_loss: f64,
    pub stopped_early: bool,
    pub sampling: Option<SamplingStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub rounds: Vec<RoundSummary>,
    /// Round whose snapshot was restored for the final evaluation.
    pub best_round: usize,
    pub best_validation_loss: f64,
    /// Test-set evaluation of the restored best snapshot.
    pub final_evaluation: Evaluation,
    pub final_train_size: usize,
    pub reservoir_remaining_positive: usize,
    pub reservoir_remaining_negative: usize,
    pub completed_at: DateTime<Utc>,
}

impl RunReport {
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self).map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })
    }

    pub fn write_json(&self, path: &Path) -> Result<(), StorageError> {
        let json = self.to_json()?;
        create_parent(path)?;
        fs::write(path, json).map_err(|e| io_error(path, e))
    }
}
