// src/fsm/mod.rs

//! Generic transition-rule state machine.
//!
//! - [`store`] persists the current state with an advisory timestamp.
//! - [`state_manager`] holds the valid-state set and the transition-rule
//!   table, and commits transitions through caller-supplied handlers.
//!
//! The machine has no built-in states: states and rules are supplied
//! entirely by the caller at setup time, making this a reusable engine
//! rather than a fixed workflow.

pub mod state_manager;
pub mod store;

pub use state_manager::{StateManager, Transition, TransitionHandler};
pub use store::{StateRecord, StateStore};
