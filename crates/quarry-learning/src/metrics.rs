//! Per-epoch metrics accumulated across every round, and sinks that export
//! them for plotting.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use quarry_core::errors::StorageError;
use quarry_core::types::EpochMetrics;
use serde::{Deserialize, Serialize};

/// One epoch of one `fit` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub round: usize,
    pub epoch: usize,
    pub loss: f64,
    pub validation_loss: f64,
    pub accuracy: f64,
    pub validation_accuracy: f64,
}

impl EpochRecord {
    pub fn new(round: usize, metrics: &EpochMetrics) -> Self {
        Self {
            round,
            epoch: metrics.epoch,
            loss: metrics.loss,
            validation_loss: metrics.validation_loss,
            accuracy: metrics.accuracy,
            validation_accuracy: metrics.validation_accuracy,
        }
    }
}

/// Append-only history, concatenated across rounds in the order the
/// epochs ran. Never reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsLog {
    records: Vec<EpochRecord>,
}

impl MetricsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `fit` call's history under `round`.
    pub fn extend_round(&mut self, round: usize, history: &[EpochMetrics]) {
        self.records
            .extend(history.iter().map(|m| EpochRecord::new(round, m)));
    }

    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn for_round(&self, round: usize) -> impl Iterator<Item = &EpochRecord> + '_ {
        self.records.iter().filter(move |r| r.round == round)
    }
}

/// A consumer of the finished metrics log.
pub trait MetricsSink {
    fn write(&mut self, log: &MetricsLog) -> Result<(), StorageError>;
}

/// Writes the log as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsSink for JsonFileSink {
    fn write(&mut self, log: &MetricsLog) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(log.records()).map_err(|e| {
            StorageError::Serialization {
                message: e.to_string(),
            }
        })?;
        create_parent(&self.path)?;
        fs::write(&self.path, json).map_err(|e| io_error(&self.path, e))
    }
}

/// Writes the log as CSV with a header row, one row per epoch.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub const HEADER: &'static str = "round,epoch,loss,validation_loss,accuracy,validation_accuracy";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsSink for CsvFileSink {
    fn write(&mut self, log: &MetricsLog) -> Result<(), StorageError> {
        let mut out = Vec::new();
        let io = |e| io_error(&self.path, e);
        writeln!(out, "{}", Self::HEADER).map_err(io)?;
        for r in log.records() {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                r.round, r.epoch, r.loss, r.validation_loss, r.accuracy, r.validation_accuracy
            )
            .map_err(io)?;
        }
        create_parent(&self.path)?;
        fs::write(&self.path, out).map_err(io)
    }
}

/// Pick a sink by file extension: `.csv` gets CSV, anything else JSON.
pub fn sink_for_path(path: impl Into<PathBuf>) -> Box<dyn MetricsSink> {
    let path = path.into();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Box::new(CsvFileSink::new(path)),
        _ => Box::new(JsonFileSink::new(path)),
    }
}

pub(crate) fn create_parent(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))
        }
        _ => Ok(()),
    }
}

pub(crate) fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
