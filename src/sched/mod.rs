// src/sched/mod.rs

//! The workflow executor: a dependency-resolving task scheduler.
//!
//! - [`task`] defines the task record the executor schedules and persists.
//! - [`duration`] parses advisory duration estimates.
//! - [`state`] holds the pending/completed pools and their persisted store.
//! - [`runner`] is the pluggable task-body abstraction.
//! - [`executor`] contains the fixed-point scheduling loop.

pub mod duration;
pub mod executor;
pub mod runner;
pub mod state;
pub mod task;

pub use executor::{ExecutionReport, ExecutorOptions, WorkflowExecutor};
pub use runner::{SimulatedRunner, TaskRunner};
pub use state::{ExecutionState, ExecutionStateStore};
pub use task::TaskRecord;
