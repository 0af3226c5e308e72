//! Run request DTOs

use serde::{Deserialize, Serialize};

/// Request to start one task run on a specific container instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub cluster: String,
    pub container_instance: String,
    pub task_definition: String,
    pub container_overrides: Vec<ContainerOverride>,
}

impl RunRequest {
    /// Build a request overriding the command of a single container
    pub fn new(
        cluster: impl Into<String>,
        container_instance: impl Into<String>,
        task_definition: impl Into<String>,
        container_override: ContainerOverride,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            container_instance: container_instance.into(),
            task_definition: task_definition.into(),
            container_overrides: vec![container_override],
        }
    }

    /// Look up the override for a container by name
    pub fn container_override(&self, name: &str) -> Option<&ContainerOverride> {
        self.container_overrides.iter().find(|o| o.name == name)
    }
}

/// Replacement command for one named container in the task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerOverride {
    pub name: String,
    pub command: Vec<String>,
}

impl ContainerOverride {
    pub fn new(name: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            name: name.into(),
            command,
        }
    }
}
