//! Snapshot storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Directory holding one snapshot file per round. Default: `checkpoints`.
    pub dir: Option<String>,
    /// Keep snapshots in memory instead of on disk. Default: false.
    pub in_memory: Option<bool>,
}

impl CheckpointConfig {
    pub fn effective_dir(&self) -> PathBuf {
        PathBuf::from(
            self.dir
                .as_deref()
                .unwrap_or(defaults::DEFAULT_CHECKPOINT_DIR),
        )
    }

    pub fn effective_in_memory(&self) -> bool {
        self.in_memory
            .unwrap_or(defaults::DEFAULT_IN_MEMORY_CHECKPOINTS)
    }
}
