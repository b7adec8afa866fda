// src/sched/executor.rs

//! The fixed-point scheduling loop.
//!
//! `execute()` repeatedly scans the pending pool for tasks whose dependencies
//! are all completed and runs them. Each pass re-evaluates readiness against
//! whatever is already completed, including tasks completed in a previous
//! process lifetime, which is what makes crash-resume trivial: no
//! precomputed order to re-derive, just the persisted pools.
//!
//! Cost is O(passes x pending); fine for workflows in the tens of tasks,
//! not meant for thousands.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::loader::default_state_path;
use crate::config::loader::load_and_validate;
use crate::config::model::WorkflowFile;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::sched::runner::TaskRunner;
use crate::sched::state::{ExecutionState, ExecutionStateStore};
use crate::sched::task::TaskRecord;
use crate::types::{RetryPolicy, TaskId};

/// Knobs for the scheduling loop.
#[derive(Debug, Clone, Default)]
pub struct ExecutorOptions {
    /// Attempt budget per failing task, per `execute()` call.
    pub retry: RetryPolicy,
}

/// Outcome summary of one `execute()` call.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// Ids of tasks completed during this call, in completion order.
    pub completed_this_run: Vec<TaskId>,

    /// Number of tasks still pending when the loop stopped.
    pub remaining: usize,

    /// True when the loop stopped because a full pass made no progress
    /// (dependency cycle, or all remaining ready tasks kept failing).
    pub stalled: bool,
}

/// Dependency-resolving task scheduler with persisted, resumable state.
pub struct WorkflowExecutor {
    state: ExecutionState,
    store: ExecutionStateStore,
    runner: Box<dyn TaskRunner>,
    options: ExecutorOptions,
}

impl WorkflowExecutor {
    /// Build an executor for a parsed workflow.
    ///
    /// If the store holds a prior snapshot the run resumes from it; the
    /// definition's task list is only consulted when starting fresh.
    /// Deleting the state file (see [`ExecutionStateStore::clear`]) is the
    /// way to force a clean restart.
    pub fn new(
        workflow: &WorkflowFile,
        store: ExecutionStateStore,
        runner: Box<dyn TaskRunner>,
        options: ExecutorOptions,
    ) -> Result<Self> {
        let (state, resumed) = match store.load()? {
            Some(state) => (state, true),
            None => (ExecutionState::seed_from(workflow), false),
        };

        info!(
            workflow = workflow.name.as_deref().unwrap_or("unnamed"),
            tasks = state.completed.len() + state.pending.len(),
            completed = state.completed.len(),
            pending = state.pending.len(),
            resumed,
            "workflow loaded"
        );

        Ok(Self {
            state,
            store,
            runner,
            options,
        })
    }

    /// Convenience constructor: load and validate the definition at `path`,
    /// keeping execution state next to it as `<stem>.state.json`.
    pub fn from_path(
        fs: Arc<dyn FileSystem>,
        path: impl AsRef<Path>,
        runner: Box<dyn TaskRunner>,
        options: ExecutorOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let workflow = load_and_validate(fs.as_ref(), path)?;
        let store = ExecutionStateStore::new(fs, default_state_path(path));
        Self::new(&workflow, store, runner, options)
    }

    /// Run the scheduling loop to a fixed point.
    ///
    /// Repeats passes over the pending pool until it drains or a pass
    /// completes nothing. A task failure is recovered locally: the task is
    /// logged and left pending, and the loop moves on to the next ready
    /// task. Only persistence errors propagate out.
    pub fn execute(&mut self) -> Result<ExecutionReport> {
        let mut completed_this_run = Vec::new();
        let mut attempts: HashMap<TaskId, u32> = HashMap::new();
        let mut stalled = false;

        while !self.state.pending.is_empty() {
            let mut progress_made = false;

            // Snapshot the pending ids; completing a task mutates the pool
            // mid-iteration.
            let snapshot: Vec<TaskId> = self.state.pending.keys().cloned().collect();

            for id in snapshot {
                let Some(task) = self.state.pending.get(&id) else {
                    continue;
                };
                if !self.deps_satisfied(task) {
                    continue;
                }

                let prior_attempts = attempts.get(&id).copied().unwrap_or(0);
                if !self.options.retry.allows(prior_attempts) {
                    debug!(task = %id, attempts = prior_attempts, "attempt budget exhausted; skipping");
                    continue;
                }

                let task = task.clone();
                if self.execute_task(&task)? {
                    completed_this_run.push(id);
                    progress_made = true;
                } else {
                    *attempts.entry(id).or_insert(0) += 1;
                }
            }

            if !progress_made {
                warn!(
                    pending = self.state.pending.len(),
                    "no tasks ready for execution; possible circular dependency"
                );
                stalled = true;
                break;
            }
        }

        info!(
            completed_this_run = completed_this_run.len(),
            remaining = self.state.pending.len(),
            stalled,
            "workflow execution completed"
        );

        Ok(ExecutionReport {
            completed_this_run,
            remaining: self.state.pending.len(),
            stalled,
        })
    }

    /// Run one task body and record the outcome.
    ///
    /// On success the task moves from pending to completed and the full
    /// state is persisted before anything else happens, so a crash right
    /// after loses at most the one in-flight task. On failure the task stays
    /// pending; returns whether the task completed.
    fn execute_task(&mut self, task: &TaskRecord) -> Result<bool> {
        info!(task = %task.id, name = %task.name, "executing task");

        match self.runner.run(task) {
            Ok(()) => {
                self.state.pending.remove(&task.id);
                self.state.completed.insert(task.id.clone(), task.clone());
                self.store.save(&self.state)?;
                info!(task = %task.id, "task completed");
                Ok(true)
            }
            Err(err) => {
                warn!(task = %task.id, error = %err, "task failed; leaving in pending pool");
                Ok(false)
            }
        }
    }

    fn deps_satisfied(&self, task: &TaskRecord) -> bool {
        task.dependencies
            .iter()
            .all(|dep| self.state.completed.contains_key(dep))
    }

    /// Current pools, for diagnostics and tests.
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// True once every task has completed.
    pub fn is_drained(&self) -> bool {
        self.state.is_drained()
    }
}
