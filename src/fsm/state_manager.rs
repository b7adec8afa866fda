// src/fsm/state_manager.rs

//! The transition-rule state machine engine.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::errors::{FlowdagError, Result};
use crate::fsm::store::{StateRecord, StateStore};

/// Caller-supplied handler bound to one `(from, to)` transition rule.
///
/// The boolean result is authoritative: `true` commits the transition,
/// `false` vetoes it even though the rule exists, letting a handler reject a
/// structurally-legal transition on runtime conditions (e.g. "approval
/// requires two signers").
pub trait TransitionHandler: Send {
    fn on_transition(&mut self, from: &str, to: &str) -> bool;
}

impl<F> TransitionHandler for F
where
    F: FnMut(&str, &str) -> bool + Send,
{
    fn on_transition(&mut self, from: &str, to: &str) -> bool {
        self(from, to)
    }
}

/// Outcome of a [`StateManager::transition_to`] request.
///
/// `NotAllowed` and `Rejected` are normal negative results, not errors;
/// callers probe legality by checking the returned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A rule matched, its handler approved, and the new state is committed
    /// and persisted.
    Completed,
    /// No rule is registered for `(current, requested)`; nothing changed.
    NotAllowed,
    /// A rule matched but its handler returned false; nothing changed.
    Rejected,
}

impl Transition {
    pub fn is_completed(&self) -> bool {
        matches!(self, Transition::Completed)
    }
}

/// A generic, reusable finite-state machine.
///
/// Holds the current state, the fixed set of valid states, and a table of
/// permitted `(from, to)` transitions each bound to a handler. The current
/// state is persisted after every committed transition. A state with no
/// outgoing rules is de facto terminal; nothing here special-cases that.
pub struct StateManager {
    valid_states: Vec<String>,
    current: String,
    rules: HashMap<(String, String), Box<dyn TransitionHandler>>,
    store: StateStore,
}

impl StateManager {
    /// Build a machine over `valid_states`, loading the current state from
    /// the store if one was persisted.
    ///
    /// Falls back to the first declared valid state when nothing is
    /// persisted. Fails if `valid_states` is empty, if the stored file
    /// exists but cannot be parsed, or if the stored state is not a declared
    /// valid state (fail closed rather than run in an unknown state).
    pub fn new(store: StateStore, valid_states: Vec<String>) -> Result<Self> {
        let Some(first) = valid_states.first().cloned() else {
            return Err(FlowdagError::Definition(
                "state machine needs at least one valid state".to_string(),
            ));
        };

        let current = match store.load()? {
            Some(record) => {
                if !valid_states.contains(&record.current_state) {
                    return Err(FlowdagError::PersistedState {
                        path: store.path().display().to_string(),
                        reason: format!(
                            "stored state '{}' is not a declared valid state",
                            record.current_state
                        ),
                    });
                }
                debug!(state = %record.current_state, "resuming from persisted state");
                record.current_state
            }
            None => first,
        };

        Ok(Self {
            valid_states,
            current,
            rules: HashMap::new(),
            store,
        })
    }

    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// Seed or override the current state, bypassing the rule table.
    ///
    /// Persists unconditionally; fails only when `state` is not a declared
    /// valid state.
    pub fn set_initial_state(&mut self, state: &str) -> Result<()> {
        self.ensure_valid(state)?;
        self.current = state.to_string();
        self.store.save(&StateRecord::now(state))?;
        info!(state = %state, "initial state set");
        Ok(())
    }

    /// Register `handler` for the ordered pair `(from, to)`.
    ///
    /// Registering the same pair twice overwrites the previous handler;
    /// callers must not rely on first-registration-wins. There is no removal
    /// API.
    pub fn add_transition_rule(
        &mut self,
        from: &str,
        to: &str,
        handler: impl TransitionHandler + 'static,
    ) -> Result<()> {
        self.ensure_valid(from)?;
        self.ensure_valid(to)?;
        self.rules
            .insert((from.to_string(), to.to_string()), Box::new(handler));
        Ok(())
    }

    /// Request a transition from the current state to `new_state`.
    ///
    /// Errors only on an unknown state name. A missing rule or a handler
    /// veto comes back as a [`Transition`] value with no side effects; only
    /// `Completed` changes and persists the current state.
    pub fn transition_to(&mut self, new_state: &str) -> Result<Transition> {
        self.ensure_valid(new_state)?;

        let key = (self.current.clone(), new_state.to_string());
        let Some(handler) = self.rules.get_mut(&key) else {
            debug!(from = %key.0, to = %key.1, "transition not allowed: no rule registered");
            return Ok(Transition::NotAllowed);
        };

        if !handler.on_transition(&key.0, &key.1) {
            warn!(from = %key.0, to = %key.1, "transition rejected by handler");
            return Ok(Transition::Rejected);
        }

        self.current = new_state.to_string();
        self.store.save(&StateRecord::now(new_state))?;
        info!(from = %key.0, to = %key.1, "transition completed");
        Ok(Transition::Completed)
    }

    fn ensure_valid(&self, state: &str) -> Result<()> {
        if self.valid_states.iter().any(|s| s == state) {
            Ok(())
        } else {
            Err(FlowdagError::UnknownState(state.to_string()))
        }
    }
}
