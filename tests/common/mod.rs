#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use flowdag::config::WorkflowFile;
use flowdag::fs::MockFileSystem;
use flowdag::sched::{ExecutionStateStore, ExecutorOptions, TaskRunner, WorkflowExecutor};

pub const STATE_PATH: &str = "wf.state.json";

pub fn state_store(fs: &MockFileSystem) -> ExecutionStateStore {
    ExecutionStateStore::new(Arc::new(fs.clone()), PathBuf::from(STATE_PATH))
}

/// Executor over the in-memory filesystem with default options.
pub fn executor_for(
    workflow: &WorkflowFile,
    fs: &MockFileSystem,
    runner: impl TaskRunner + 'static,
) -> WorkflowExecutor {
    executor_with_options(workflow, fs, runner, ExecutorOptions::default())
}

pub fn executor_with_options(
    workflow: &WorkflowFile,
    fs: &MockFileSystem,
    runner: impl TaskRunner + 'static,
    options: ExecutorOptions,
) -> WorkflowExecutor {
    WorkflowExecutor::new(workflow, state_store(fs), Box::new(runner), options)
        .expect("executor construction")
}
