// tests/persistence.rs

//! The persistence contract: state is flushed after every completed task,
//! through the atomic-replace write path.

mod common;

use flowdag::fs::MockFileSystem;
use flowdag::sched::ExecutionState;
use flowdag_test_utils::builders::{TaskConfigBuilder, WorkflowFileBuilder};
use flowdag_test_utils::fake_runner::FakeRunner;
use flowdag_test_utils::init_tracing;

#[test]
fn state_is_written_after_every_completed_task() {
    init_tracing();

    let workflow = WorkflowFileBuilder::new()
        .with_task(TaskConfigBuilder::new("a").build())
        .with_task(TaskConfigBuilder::new("b").depends_on("a").build())
        .with_task(TaskConfigBuilder::new("c").depends_on("b").build())
        .build();

    let fs = MockFileSystem::new();
    let mut executor = common::executor_for(&workflow, &fs, FakeRunner::new());
    executor.execute().unwrap();

    // One write per completed task, no extras for passes or loop exit.
    assert_eq!(fs.write_count(), 3);
}

#[test]
fn failed_attempts_do_not_persist() {
    init_tracing();

    let workflow = WorkflowFileBuilder::new()
        .with_task(TaskConfigBuilder::new("bad").build())
        .build();

    let fs = MockFileSystem::new();
    let runner = FakeRunner::new();
    runner.fail_always("bad");

    let mut executor = common::executor_for(&workflow, &fs, runner);
    let report = executor.execute().unwrap();

    assert!(report.stalled);
    // The task record never moved, so nothing was written at all.
    assert_eq!(fs.write_count(), 0);
    assert!(fs.contents_of(common::STATE_PATH).is_none());
}

#[test]
fn snapshot_on_disk_matches_the_pools_mid_run() {
    init_tracing();

    let workflow = WorkflowFileBuilder::new()
        .with_task(TaskConfigBuilder::new("done").build())
        .with_task(TaskConfigBuilder::new("stuck").depends_on("missing_dep_free").build())
        .with_task(TaskConfigBuilder::new("missing_dep_free").build())
        .build();

    let fs = MockFileSystem::new();
    let runner = FakeRunner::new();
    runner.fail_always("missing_dep_free");

    let mut executor = common::executor_for(&workflow, &fs, runner);
    executor.execute().unwrap();

    let raw = fs.contents_of(common::STATE_PATH).expect("state file written");
    let persisted: ExecutionState = serde_json::from_str(&raw).unwrap();

    assert!(persisted.completed.contains_key("done"));
    assert!(persisted.pending.contains_key("stuck"));
    assert!(persisted.pending.contains_key("missing_dep_free"));
    // Dependency lists survive the roundtrip; a resume needs them.
    assert_eq!(
        persisted.pending["stuck"].dependencies,
        vec!["missing_dep_free".to_string()]
    );
}

#[test]
fn fresh_construction_seeds_pending_from_every_phase() {
    init_tracing();

    let workflow = WorkflowFileBuilder::new()
        .with_phase("draft")
        .with_task(TaskConfigBuilder::new("outline").estimated("30m").build())
        .with_phase("publish")
        .with_task(TaskConfigBuilder::new("review").depends_on("outline").build())
        .build();

    let fs = MockFileSystem::new();
    let executor = common::executor_for(&workflow, &fs, FakeRunner::new());

    assert_eq!(executor.state().pending.len(), 2);
    assert!(executor.state().completed.is_empty());
    assert_eq!(
        executor.state().pending["outline"].estimated_duration.as_deref(),
        Some("30m")
    );
}
