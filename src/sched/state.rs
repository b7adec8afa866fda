// src/sched/state.rs

//! The persisted execution state: pending and completed task pools.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::model::WorkflowFile;
use crate::errors::{FlowdagError, Result};
use crate::fs::FileSystem;
use crate::sched::task::TaskRecord;
use crate::types::TaskId;

/// The two task pools, keyed by task id.
///
/// A task lives in exactly one pool at a time; `execute_task` moves it from
/// `pending` to `completed` on success. The whole struct is what gets
/// serialized to the state file after every completed task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionState {
    #[serde(default)]
    pub completed: BTreeMap<TaskId, TaskRecord>,

    #[serde(default)]
    pub pending: BTreeMap<TaskId, TaskRecord>,
}

impl ExecutionState {
    /// Fresh state with every task of every phase pending.
    ///
    /// Phase grouping is discarded here; scheduling is driven purely by each
    /// task's dependency list.
    pub fn seed_from(workflow: &WorkflowFile) -> Self {
        let pending = workflow
            .tasks()
            .map(|cfg| (cfg.id.clone(), TaskRecord::from_config(cfg)))
            .collect();

        Self {
            completed: BTreeMap::new(),
            pending,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Store for [`ExecutionState`], JSON on the injected filesystem.
///
/// Writes go through the filesystem's atomic-replace `write`, so a crash
/// mid-save leaves either the previous snapshot or the new one on disk,
/// never a torn file.
#[derive(Debug, Clone)]
pub struct ExecutionStateStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl ExecutionStateStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load a prior state snapshot.
    ///
    /// Returns `Ok(None)` when no state file exists (fresh run). A file that
    /// exists but cannot be read or parsed is a construction-time error, not
    /// something to silently reinitialize over.
    pub fn load(&self) -> Result<Option<ExecutionState>> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }

        let contents =
            self.fs
                .read_to_string(&self.path)
                .map_err(|e| FlowdagError::PersistedState {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })?;

        let state: ExecutionState =
            serde_json::from_str(&contents).map_err(|e| FlowdagError::PersistedState {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            path = %self.path.display(),
            completed = state.completed.len(),
            pending = state.pending.len(),
            "loaded prior execution state"
        );
        Ok(Some(state))
    }

    pub fn save(&self, state: &ExecutionState) -> Result<()> {
        let contents = serde_json::to_vec_pretty(state)?;
        self.fs.write(&self.path, &contents)?;
        Ok(())
    }

    /// Delete the state file, forcing the next construction to start fresh.
    pub fn clear(&self) -> Result<()> {
        if self.fs.exists(&self.path) {
            self.fs.remove_file(&self.path)?;
        }
        Ok(())
    }
}
