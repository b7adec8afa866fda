// src/sched/task.rs

//! Task metadata as scheduled and persisted by the executor.

use serde::{Deserialize, Serialize};

use crate::config::model::TaskConfig;
use crate::sched::duration::parse_estimate;
use crate::types::TaskId;

/// A task flattened out of the workflow definition.
///
/// This is both the scheduling unit and the shape persisted in the
/// execution-state file, so it derives serde both ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub name: String,

    /// Ids of tasks that must be in the completed pool before this one is
    /// ready.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    /// Advisory duration estimate as written in the definition.
    #[serde(default)]
    pub estimated_duration: Option<String>,
}

impl TaskRecord {
    pub fn from_config(cfg: &TaskConfig) -> Self {
        Self {
            id: cfg.id.clone(),
            name: cfg.name.clone(),
            dependencies: cfg.dependencies.clone(),
            estimated_duration: cfg.estimated_duration.clone(),
        }
    }

    /// The estimate in seconds, applying the parsing defaults.
    ///
    /// Advisory only: runners may use it as a simulation bound or a timeout
    /// hint, the scheduler never enforces it.
    pub fn estimated_secs(&self) -> u64 {
        parse_estimate(self.estimated_duration.as_deref())
    }
}
