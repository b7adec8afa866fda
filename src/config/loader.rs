// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::WorkflowFile;
use crate::config::validate::validate_workflow;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a workflow definition from a given path and return the raw
/// `WorkflowFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
///
/// The filesystem is injected so tests can run against an in-memory fake.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<WorkflowFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;
    let workflow: WorkflowFile = toml::from_str(&contents)?;
    Ok(workflow)
}

/// Load a workflow definition from path and run semantic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for duplicate task ids, unknown dependency references and
///   self-dependencies.
/// - Warns (without failing) if the dependency graph contains a cycle; the
///   scheduler surfaces cycles at runtime as a stalled run.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<WorkflowFile> {
    let workflow = load_from_path(fs, &path)?;
    validate_workflow(&workflow)?;
    Ok(workflow)
}

/// Derive the execution-state file location from the definition's location:
/// same directory, `<stem>.state.json`.
pub fn default_state_path(workflow_path: &Path) -> PathBuf {
    sibling_with_suffix(workflow_path, "state.json")
}

/// Derive the run-status (state machine) file location from the definition's
/// location: same directory, `<stem>.status.json`.
pub fn default_status_path(workflow_path: &Path) -> PathBuf {
    sibling_with_suffix(workflow_path, "status.json")
}

fn sibling_with_suffix(workflow_path: &Path, suffix: &str) -> PathBuf {
    let stem = workflow_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("workflow");
    workflow_path.with_file_name(format!("{stem}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_path_sits_next_to_the_definition() {
        let path = Path::new("site/Workflow.toml");
        assert_eq!(
            default_state_path(path),
            PathBuf::from("site/Workflow.state.json")
        );
        assert_eq!(
            default_status_path(path),
            PathBuf::from("site/Workflow.status.json")
        );
    }
}
