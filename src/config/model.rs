// src/config/model.rs

use serde::Deserialize;

/// Top-level workflow definition as read from a TOML file.
///
/// This is a direct mapping of the definition format:
///
/// ```toml
/// name = "site-launch"
///
/// [[phase]]
/// name = "content"
///
///   [[phase.task]]
///   id = "outline"
///   name = "Draft the outline"
///   dependencies = []
///   estimated_duration = "30m"
/// ```
///
/// Phases are a source-organisation convenience only: the executor flattens
/// every task in every phase into one pool, and scheduling is driven purely
/// by each task's `dependencies`. A phase boundary is not an execution
/// barrier.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowFile {
    /// Optional human-readable workflow name.
    #[serde(default)]
    pub name: Option<String>,

    /// All phases, in declaration order.
    #[serde(default)]
    pub phase: Vec<PhaseSection>,
}

impl WorkflowFile {
    /// Iterate over every task in every phase, in declaration order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskConfig> {
        self.phase.iter().flat_map(|p| p.task.iter())
    }

    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.tasks().count()
    }
}

/// A single `[[phase]]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhaseSection {
    /// Optional phase label, for operators reading the definition.
    #[serde(default)]
    pub name: Option<String>,

    /// Tasks declared in this phase.
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// A single `[[phase.task]]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Unique task id; dependency lists refer to these.
    pub id: String,

    /// Human-readable label.
    pub name: String,

    /// Ids of tasks that must complete before this one may run.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Advisory duration estimate, e.g. `"2h"` or `"30m"`.
    ///
    /// Only used to bound the simulated task body; never enforced as a
    /// timeout. Absent means the 60-second default applies.
    #[serde(default)]
    pub estimated_duration: Option<String>,
}
