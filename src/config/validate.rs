// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::WorkflowFile;
use crate::errors::{FlowdagError, Result};

/// Run semantic validation against a loaded workflow definition.
///
/// Fatal checks:
/// - there is at least one task across all phases
/// - task ids are unique across phases
/// - every dependency refers to an existing task id
/// - no task depends on itself
///
/// Cycles in the dependency graph are **not** fatal here: the scheduler
/// detects them at runtime as a pass that makes no progress, and leaves the
/// cyclic tasks pending for an operator to untangle. Validation still runs a
/// toposort so the problem is visible in the log before execution starts.
pub fn validate_workflow(workflow: &WorkflowFile) -> Result<()> {
    ensure_has_tasks(workflow)?;
    ensure_unique_ids(workflow)?;
    validate_dependencies(workflow)?;
    warn_on_cycles(workflow);
    Ok(())
}

fn ensure_has_tasks(workflow: &WorkflowFile) -> Result<()> {
    if workflow.task_count() == 0 {
        return Err(FlowdagError::Definition(
            "workflow must contain at least one [[phase.task]]".to_string(),
        ));
    }
    Ok(())
}

fn ensure_unique_ids(workflow: &WorkflowFile) -> Result<()> {
    let mut seen = HashSet::new();
    for task in workflow.tasks() {
        if !seen.insert(task.id.as_str()) {
            return Err(FlowdagError::Definition(format!(
                "duplicate task id '{}' (ids must be unique across phases)",
                task.id
            )));
        }
    }
    Ok(())
}

fn validate_dependencies(workflow: &WorkflowFile) -> Result<()> {
    let ids: HashSet<&str> = workflow.tasks().map(|t| t.id.as_str()).collect();

    for task in workflow.tasks() {
        for dep in task.dependencies.iter() {
            if !ids.contains(dep.as_str()) {
                return Err(FlowdagError::Definition(format!(
                    "task '{}' has unknown dependency '{}'",
                    task.id, dep
                )));
            }
            if dep == &task.id {
                return Err(FlowdagError::Definition(format!(
                    "task '{}' cannot depend on itself",
                    task.id
                )));
            }
        }
    }
    Ok(())
}

fn warn_on_cycles(workflow: &WorkflowFile) {
    // Edge direction: dep -> task. A toposort failure pinpoints a task on a
    // cycle.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in workflow.tasks() {
        graph.add_node(task.id.as_str());
    }

    for task in workflow.tasks() {
        for dep in task.dependencies.iter() {
            graph.add_edge(dep.as_str(), task.id.as_str(), ());
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        warn!(
            task = %cycle.node_id(),
            "dependency cycle in workflow definition; the tasks on it will never become ready"
        );
    }
}
