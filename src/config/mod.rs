// src/config/mod.rs

//! Workflow definition loading and validation.
//!
//! - [`model`] maps the TOML definition format onto serde structs.
//! - [`loader`] reads and parses a definition from disk.
//! - [`validate`] runs the semantic checks (unique ids, known dependencies).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_state_path, default_status_path, load_and_validate, load_from_path};
pub use model::{PhaseSection, TaskConfig, WorkflowFile};
pub use validate::validate_workflow;
