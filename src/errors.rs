// src/errors.rs

//! Crate-wide error types and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowdagError {
    #[error("Workflow definition error: {0}")]
    Definition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("State serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persisted state at {path} could not be loaded: {reason}")]
    PersistedState { path: String, reason: String },

    #[error("Unknown state '{0}' (not in the declared valid states)")]
    UnknownState(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FlowdagError>;
