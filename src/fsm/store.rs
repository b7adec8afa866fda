// src/fsm/store.rs

//! Persisted record for the state machine.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FlowdagError, Result};
use crate::fs::FileSystem;

/// What gets written to disk after every committed transition.
///
/// The timestamp is advisory: it records when the last transition happened
/// and nothing consults it programmatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    pub current_state: String,
    pub timestamp: DateTime<Utc>,
}

impl StateRecord {
    pub fn now(state: impl Into<String>) -> Self {
        Self {
            current_state: state.into(),
            timestamp: Utc::now(),
        }
    }
}

/// JSON store for [`StateRecord`], same atomic-write path as the executor's
/// state store.
#[derive(Debug, Clone)]
pub struct StateStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl StateStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been persisted yet; an existing but
    /// unparsable file is a hard error.
    pub fn load(&self) -> Result<Option<StateRecord>> {
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

        let record: StateRecord =
            serde_json::from_str(&contents).map_err(|e| FlowdagError::PersistedState {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some(record))
    }

    pub fn save(&self, record: &StateRecord) -> Result<()> {
        let contents = serde_json::to_vec_pretty(record)?;
        self.fs.write(&self.path, &contents)?;
        Ok(())
    }
}
