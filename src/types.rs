// src/types.rs

/// Identifier of a task within a workflow definition.
///
/// Task ids are the graph-node keys: dependency lists refer to these, and the
/// pending/completed pools are keyed by them.
pub type TaskId = String;

/// How many times the executor may re-attempt a failing task within a single
/// `execute()` call.
///
/// - `Unlimited` (default): a failed task is re-attempted on every later pass
///   for as long as other tasks keep making progress. This matches the
///   original behaviour: keep trying until a transient failure clears.
/// - `Limited(n)`: after `n` failed attempts the task is skipped for the rest
///   of this `execute()` call. It stays in the pending pool, so a future
///   resume starts with a fresh attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    Unlimited,
    Limited(u32),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Unlimited
    }
}

impl RetryPolicy {
    /// Whether a task with `attempts` failed attempts so far may be tried again.
    pub fn allows(&self, attempts: u32) -> bool {
        match self {
            RetryPolicy::Unlimited => true,
            RetryPolicy::Limited(max) => attempts < *max,
        }
    }
}
