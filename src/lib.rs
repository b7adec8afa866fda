// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod fsm;
pub mod logging;
pub mod sched;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::{default_state_path, default_status_path, load_and_validate};
use crate::config::model::WorkflowFile;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::fsm::{StateManager, StateStore};
use crate::sched::{
    ExecutionStateStore, ExecutorOptions, SimulatedRunner, WorkflowExecutor,
};
use crate::types::RetryPolicy;

/// States of the run-status machine kept alongside the execution state.
///
/// The executor and the state machine are independent components; this is
/// the caller-side composition: the binary drives the workflow instance
/// through `idle -> running -> {completed, stalled}`, with both outcomes
/// allowed back into `running` for a re-run.
const RUN_STATES: [&str; 4] = ["idle", "running", "completed", "stalled"];

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - definition loading + validation
/// - the run-status state machine
/// - the executor with the simulated task runner
pub fn run(args: CliArgs) -> Result<()> {
    let workflow_path = PathBuf::from(&args.workflow);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let workflow = load_and_validate(fs.as_ref(), &workflow_path)?;

    if args.dry_run {
        print_dry_run(&workflow);
        return Ok(());
    }

    let state_path = args
        .state
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_state_path(&workflow_path));
    let store = ExecutionStateStore::new(fs.clone(), state_path);

    if args.fresh {
        store.clear()?;
        debug!("cleared persisted execution state for a fresh run");
    }

    let mut status = run_status_machine(fs.clone(), &workflow_path)?;
    let started = status.transition_to("running")?;
    if !started.is_completed() {
        debug!(
            outcome = ?started,
            current = status.current_state(),
            "run status did not move to running"
        );
    }

    let options = ExecutorOptions {
        retry: match args.max_attempts {
            Some(n) => RetryPolicy::Limited(n),
            None => RetryPolicy::Unlimited,
        },
    };

    let mut executor = WorkflowExecutor::new(
        &workflow,
        store,
        Box::new(SimulatedRunner::default()),
        options,
    )?;
    let report = executor.execute()?;

    let outcome = if report.stalled { "stalled" } else { "completed" };
    let finished = status.transition_to(outcome)?;
    if !finished.is_completed() {
        debug!(
            outcome = ?finished,
            current = status.current_state(),
            requested = outcome,
            "run status did not move to the final state"
        );
    }

    print_summary(&workflow, &report);
    Ok(())
}

/// Build the run-status machine with its transition rules.
///
/// The handlers here approve unconditionally; an embedding CMS would hang
/// approval checks or notifications on them.
fn run_status_machine(fs: Arc<dyn FileSystem>, workflow_path: &std::path::Path) -> Result<StateManager> {
    let store = StateStore::new(fs, default_status_path(workflow_path));
    let mut machine = StateManager::new(
        store,
        RUN_STATES.iter().map(|s| s.to_string()).collect(),
    )?;

    let approve = |_: &str, _: &str| true;
    machine.add_transition_rule("idle", "running", approve)?;
    machine.add_transition_rule("running", "completed", approve)?;
    machine.add_transition_rule("running", "stalled", approve)?;
    machine.add_transition_rule("completed", "running", approve)?;
    machine.add_transition_rule("stalled", "running", approve)?;

    Ok(machine)
}

/// Simple dry-run output: print phases, tasks and dependencies.
fn print_dry_run(workflow: &WorkflowFile) {
    println!("flowdag dry-run");
    if let Some(ref name) = workflow.name {
        println!("  workflow: {name}");
    }
    println!();

    println!("phases ({}):", workflow.phase.len());
    for (idx, phase) in workflow.phase.iter().enumerate() {
        match phase.name {
            Some(ref name) => println!("  - {name}"),
            None => println!("  - phase {}", idx + 1),
        }
        for task in phase.task.iter() {
            println!("      {} ({})", task.id, task.name);
            if !task.dependencies.is_empty() {
                println!("        dependencies: {:?}", task.dependencies);
            }
            if let Some(ref est) = task.estimated_duration {
                println!("        estimated_duration: {est}");
            }
        }
    }

    debug!("dry-run complete (no execution)");
}

fn print_summary(workflow: &WorkflowFile, report: &sched::ExecutionReport) {
    let name = workflow.name.as_deref().unwrap_or("workflow");
    if report.stalled {
        println!(
            "{name}: stalled with {} task(s) still pending ({} completed this run)",
            report.remaining,
            report.completed_this_run.len()
        );
        println!("pending tasks are kept in the state file for a future resume");
    } else {
        println!(
            "{name}: all tasks completed ({} this run)",
            report.completed_this_run.len()
        );
    }
}
