#![allow(dead_code)]

use flowdag::config::{PhaseSection, TaskConfig, WorkflowFile};

/// Builder for `WorkflowFile` to simplify test setup.
///
/// Tasks added with [`with_task`](Self::with_task) land in the most recently
/// opened phase; a default phase is opened implicitly when none exists.
pub struct WorkflowFileBuilder {
    workflow: WorkflowFile,
}

impl WorkflowFileBuilder {
    pub fn new() -> Self {
        Self {
            workflow: WorkflowFile {
                name: None,
                phase: Vec::new(),
            },
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.workflow.name = Some(name.to_string());
        self
    }

    pub fn with_phase(mut self, name: &str) -> Self {
        self.workflow.phase.push(PhaseSection {
            name: Some(name.to_string()),
            task: Vec::new(),
        });
        self
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        if self.workflow.phase.is_empty() {
            self.workflow.phase.push(PhaseSection::default());
        }
        self.workflow
            .phase
            .last_mut()
            .expect("phase exists")
            .task
            .push(task);
        self
    }

    pub fn build(self) -> WorkflowFile {
        self.workflow
    }
}

impl Default for WorkflowFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: TaskConfig {
                id: id.to_string(),
                name: id.to_string(),
                dependencies: vec![],
                estimated_duration: None,
            },
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.task.name = name.to_string();
        self
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.task.dependencies.push(dep.to_string());
        self
    }

    pub fn estimated(mut self, duration: &str) -> Self {
        self.task.estimated_duration = Some(duration.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
