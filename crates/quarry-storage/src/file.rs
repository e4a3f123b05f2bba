//! File-backed snapshot store.
//!
//! Layout under the store directory:
//!
//! ```text
//! manifest.json     summaries of every stored round
//! round-000.json    initial fit
//! round-001.json    retrain after the first sampling step
//! ...
//! ```
//!
//! Every file is written to a temporary file in the same directory and
//! then renamed into place, so a crash never leaves a torn snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use quarry_core::errors::StorageError;
use quarry_core::traits::SnapshotStore;
use quarry_core::types::{SnapshotRecord, SnapshotSummary};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const MANIFEST_FILENAME: &str = "manifest.json";
const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    version: u32,
    snapshots: Vec<SnapshotSummary>,
}

/// One JSON file per round plus a manifest.
#[derive(Debug)]
pub struct FileSnapshotStore<S> {
    dir: PathBuf,
    summaries: BTreeMap<usize, SnapshotSummary>,
    _snapshot: PhantomData<fn() -> S>,
}

impl<S> FileSnapshotStore<S> {
    /// Open (creating if needed) a store rooted at `dir`. An existing
    /// manifest is reloaded, so a store survives process restarts.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let manifest_path = dir.join(MANIFEST_FILENAME);
        let summaries = if manifest_path.exists() {
            let content = fs::read_to_string(&manifest_path).map_err(|e| io_error(&manifest_path, e))?;
            let manifest: Manifest = serde_json::from_str(&content).map_err(serialization_error)?;
            manifest.snapshots.into_iter().map(|s| (s.round, s)).collect()
        } else {
            BTreeMap::new()
        };

        info!(dir = %dir.display(), snapshots = summaries.len(), "opened snapshot store");
        Ok(Self {
            dir,
            summaries,
            _snapshot: PhantomData,
        })
    }

    /// Start an empty store at `dir` for a new run. The manifest and round
    /// files of an earlier run in the same directory are removed; other
    /// files are left alone.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let mut removed = 0usize;
        for entry in fs::read_dir(&dir).map_err(|e| io_error(&dir, e))? {
            let entry = entry.map_err(|e| io_error(&dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name == MANIFEST_FILENAME || is_round_file(name) {
                let path = entry.path();
                fs::remove_file(&path).map_err(|e| io_error(&path, e))?;
                removed += 1;
            }
        }

        info!(dir = %dir.display(), removed, "created snapshot store");
        Ok(Self {
            dir,
            summaries: BTreeMap::new(),
            _snapshot: PhantomData,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `round`.
    pub fn round_path(&self, round: usize) -> PathBuf {
        self.dir.join(format!("round-{round:03}.json"))
    }

    fn write_manifest(&self) -> Result<(), StorageError> {
        let manifest = Manifest {
            version: MANIFEST_VERSION,
            snapshots: self.summaries.values().copied().collect(),
        };
        let bytes = serde_json::to_vec_pretty(&manifest).map_err(serialization_error)?;
        write_atomic(&self.dir, &self.dir.join(MANIFEST_FILENAME), &bytes)
    }
}

impl<S> SnapshotStore<S> for FileSnapshotStore<S>
where
    S: Serialize + DeserializeOwned,
{
    fn save(&mut self, record: &SnapshotRecord<S>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(record).map_err(serialization_error)?;
        let path = self.round_path(record.round);
        write_atomic(&self.dir, &path, &bytes)?;

        self.summaries.insert(record.round, record.summary());
        self.write_manifest()?;
        debug!(
            round = record.round,
            epoch = record.epoch,
            validation_loss = record.validation_loss,
            path = %path.display(),
            "snapshot written"
        );
        Ok(())
    }

    fn load(&self, round: usize) -> Result<SnapshotRecord<S>, StorageError> {
        if !self.summaries.contains_key(&round) {
            return Err(StorageError::SnapshotNotFound { round });
        }
        let path = self.round_path(round);
        let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        serde_json::from_str(&content).map_err(serialization_error)
    }

    fn summaries(&self) -> Vec<SnapshotSummary> {
        self.summaries.values().copied().collect()
    }

    fn len(&self) -> usize {
        self.summaries.len()
    }
}

fn is_round_file(name: &str) -> bool {
    name.strip_prefix("round-")
        .and_then(|rest| rest.strip_suffix(".json"))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
    tmp.write_all(bytes).map_err(|e| io_error(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| io_error(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| io_error(path, e.error))?;
    Ok(())
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn serialization_error(err: serde_json::Error) -> StorageError {
    StorageError::Serialization {
        message: err.to_string(),
    }
}
