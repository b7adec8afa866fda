// src/sched/runner.rs

//! Pluggable task-body abstraction.
//!
//! The executor talks to a `TaskRunner` instead of executing anything
//! directly. Production embedders inject a runner that dispatches on the task
//! id or type; tests use a fake that scripts outcomes; the bundled
//! [`SimulatedRunner`] just sleeps for a bounded slice of the estimate.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::sched::task::TaskRecord;

/// Trait abstracting how a single task body is executed.
///
/// The call blocks until the task finishes; an `Err` is the task's failure
/// signal and is recovered by the scheduling loop, never propagated out of
/// `execute()`.
pub trait TaskRunner: Send {
    fn run(&mut self, task: &TaskRecord) -> Result<()>;
}

/// Default runner: simulates work by sleeping.
///
/// The sleep is the task's estimate clamped to `max_delay` (one second by
/// default), so the estimate shapes relative timing without ever stalling a
/// run for hours.
#[derive(Debug, Clone)]
pub struct SimulatedRunner {
    max_delay: Duration,
}

impl SimulatedRunner {
    pub fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }
}

impl Default for SimulatedRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TaskRunner for SimulatedRunner {
    fn run(&mut self, task: &TaskRecord) -> Result<()> {
        let estimate = Duration::from_secs(task.estimated_secs());
        thread::sleep(estimate.min(self.max_delay));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn simulated_runner_clamps_the_estimate() {
        let task = TaskRecord {
            id: "slow".to_string(),
            name: "Slow".to_string(),
            dependencies: vec![],
            estimated_duration: Some("2h".to_string()),
        };

        let mut runner = SimulatedRunner::new(Duration::from_millis(10));
        let started = Instant::now();
        runner.run(&task).unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
