// tests/definition_loading.rs

//! Loading and validating workflow definitions from disk, and the
//! `from_path` convenience that keeps state next to the definition.

use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;

use flowdag::config::{default_state_path, load_and_validate};
use flowdag::errors::FlowdagError;
use flowdag::fs::{FileSystem, RealFileSystem};
use flowdag::sched::{ExecutorOptions, WorkflowExecutor};
use flowdag_test_utils::fake_runner::FakeRunner;
use flowdag_test_utils::init_tracing;

const SITE_LAUNCH: &str = r#"
name = "site-launch"

[[phase]]
name = "content"

  [[phase.task]]
  id = "outline"
  name = "Draft the outline"
  estimated_duration = "30m"

  [[phase.task]]
  id = "write"
  name = "Write the copy"
  dependencies = ["outline"]
  estimated_duration = "2h"

[[phase]]
name = "publish"

  [[phase.task]]
  id = "publish"
  name = "Publish the site"
  dependencies = ["write"]
"#;

fn write_definition(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("Workflow.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{contents}").unwrap();
    path
}

#[test]
fn definition_parses_with_phases_and_durations() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, SITE_LAUNCH);

    let workflow = load_and_validate(&RealFileSystem, &path).unwrap();

    assert_eq!(workflow.name.as_deref(), Some("site-launch"));
    assert_eq!(workflow.phase.len(), 2);
    assert_eq!(workflow.task_count(), 3);

    let write_task = workflow.tasks().find(|t| t.id == "write").unwrap();
    assert_eq!(write_task.dependencies, vec!["outline".to_string()]);
    assert_eq!(write_task.estimated_duration.as_deref(), Some("2h"));
}

#[test]
fn missing_definition_is_fatal() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let result = load_and_validate(&RealFileSystem, dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn malformed_toml_is_fatal() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, "[[phase]\nbroken");

    let result = load_and_validate(&RealFileSystem, &path);
    assert!(result.is_err());
}

#[test]
fn unknown_dependency_is_a_definition_error() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let path = write_definition(
        &dir,
        r#"
[[phase]]

  [[phase.task]]
  id = "a"
  name = "A"
  dependencies = ["ghost"]
"#,
    );

    match load_and_validate(&RealFileSystem, &path) {
        Err(FlowdagError::Definition(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("ghost"));
        }
        other => panic!("expected Definition error, got {other:?}"),
    }
}

#[test]
fn from_path_runs_and_persists_next_to_the_definition() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let path = write_definition(&dir, SITE_LAUNCH);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let runner = FakeRunner::new();
    let mut executor = WorkflowExecutor::from_path(
        fs.clone(),
        &path,
        Box::new(runner.clone()),
        ExecutorOptions::default(),
    )
    .unwrap();

    let report = executor.execute().unwrap();
    assert!(!report.stalled);
    assert_eq!(
        runner.execution_log(),
        vec!["outline", "write", "publish"]
    );

    let state_path = default_state_path(&path);
    assert_eq!(state_path, dir.path().join("Workflow.state.json"));
    assert!(state_path.exists());

    // A second executor over the same definition resumes drained.
    let second = WorkflowExecutor::from_path(
        fs,
        &path,
        Box::new(FakeRunner::new()),
        ExecutorOptions::default(),
    )
    .unwrap();
    assert!(second.is_drained());
}
