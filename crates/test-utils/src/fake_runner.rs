#![allow(dead_code)]

//! Scripted task runner for tests.
//!
//! Replaces the production runner so tests can dictate per-task outcomes and
//! inspect exactly what was executed, in which order, how many times.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use flowdag::sched::{TaskRecord, TaskRunner};

#[derive(Debug, Default)]
struct Inner {
    /// Execution log: one entry per `run` call, in order.
    log: Vec<String>,
    /// Attempt counts per task id.
    attempts: HashMap<String, u32>,
    /// Tasks that fail forever.
    fail_always: HashMap<String, ()>,
    /// Tasks that fail the first N attempts, then succeed.
    fail_first: HashMap<String, u32>,
}

/// The runner half, handed to the executor.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    inner: Arc<Mutex<Inner>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` fail on every attempt.
    pub fn fail_always(&self, id: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_always
            .insert(id.to_string(), ());
    }

    /// Make `id` fail its first `n` attempts, then succeed.
    pub fn fail_first(&self, id: &str, n: u32) {
        self.inner
            .lock()
            .unwrap()
            .fail_first
            .insert(id.to_string(), n);
    }

    /// Ids in the order they were attempted (including failed attempts).
    pub fn execution_log(&self) -> Vec<String> {
        self.inner.lock().unwrap().log.clone()
    }

    /// How many times `id` was attempted.
    pub fn attempts(&self, id: &str) -> u32 {
        self.inner
            .lock()
            .unwrap()
            .attempts
            .get(id)
            .copied()
            .unwrap_or(0)
    }
}

impl TaskRunner for FakeRunner {
    fn run(&mut self, task: &TaskRecord) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.log.push(task.id.clone());
        let attempt = {
            let count = inner.attempts.entry(task.id.clone()).or_insert(0);
            *count += 1;
            *count
        };

        if inner.fail_always.contains_key(&task.id) {
            return Err(anyhow!("task '{}' scripted to always fail", task.id));
        }
        if let Some(&n) = inner.fail_first.get(&task.id) {
            if attempt <= n {
                return Err(anyhow!(
                    "task '{}' scripted to fail attempt {attempt} of {n}",
                    task.id
                ));
            }
        }
        Ok(())
    }
}
