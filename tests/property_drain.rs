// tests/property_drain.rs

//! Property: every acyclic dependency graph drains completely, whatever its
//! shape.

mod common;

use proptest::prelude::*;

use flowdag::config::WorkflowFile;
use flowdag::fs::MockFileSystem;
use flowdag_test_utils::builders::{TaskConfigBuilder, WorkflowFileBuilder};
use flowdag_test_utils::fake_runner::FakeRunner;

/// Generate a valid acyclic workflow: task N may only depend on tasks
/// 0..N-1, so cycles are impossible by construction.
fn acyclic_workflow_strategy(max_tasks: usize) -> impl Strategy<Value = WorkflowFile> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks),
            num_tasks,
        );

        deps_strat.prop_map(move |raw_deps| {
            let mut builder = WorkflowFileBuilder::new();
            for (i, potential_deps) in raw_deps.into_iter().enumerate() {
                let name = format!("task_{i:02}");
                let mut task = TaskConfigBuilder::new(&name);

                // Sanitize: map arbitrary indices into 0..i.
                let mut seen = std::collections::HashSet::new();
                for dep_idx in potential_deps {
                    if i > 0 && seen.insert(dep_idx % i) {
                        task = task.depends_on(&format!("task_{:02}", dep_idx % i));
                    }
                }
                builder = builder.with_task(task.build());
            }
            builder.build()
        })
    })
}

proptest! {
    #[test]
    fn acyclic_workflows_always_drain(workflow in acyclic_workflow_strategy(12)) {
        let fs = MockFileSystem::new();
        let runner = FakeRunner::new();
        let total = workflow.task_count();

        let mut executor = common::executor_for(&workflow, &fs, runner.clone());
        let report = executor.execute().unwrap();

        prop_assert!(!report.stalled);
        prop_assert!(executor.is_drained());
        prop_assert_eq!(report.completed_this_run.len(), total);
        // Exactly one attempt per task: nothing failed, nothing re-ran.
        prop_assert_eq!(runner.execution_log().len(), total);
    }

    #[test]
    fn completion_order_respects_dependencies(workflow in acyclic_workflow_strategy(10)) {
        let fs = MockFileSystem::new();
        let mut executor = common::executor_for(&workflow, &fs, FakeRunner::new());
        let report = executor.execute().unwrap();

        let position: std::collections::HashMap<&str, usize> = report
            .completed_this_run
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.as_str(), idx))
            .collect();

        for task in workflow.tasks() {
            for dep in task.dependencies.iter() {
                prop_assert!(position[dep.as_str()] < position[task.id.as_str()]);
            }
        }
    }
}
