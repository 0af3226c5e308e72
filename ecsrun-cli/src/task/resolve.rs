//! Instance and task definition resolution
//!
//! Both resolvers take the first identifier the service returns. Ordering is
//! the service's: ACTIVE instances as listed, task definitions newest first.

use ecsrun_client::ClusterService;
use tracing::info;

use crate::error::RunError;

/// Finds the first ACTIVE container instance in a cluster
pub async fn find_instance(service: &dyn ClusterService, cluster: &str) -> Result<String, RunError> {
    let instances = service.list_container_instances(cluster).await?;
    let instance = first_instance(cluster, instances)?;

    info!("Selected container instance {}", instance);
    Ok(instance)
}

/// Finds the most recent ACTIVE task definition of a family
pub async fn find_task_definition(
    service: &dyn ClusterService,
    family: &str,
) -> Result<String, RunError> {
    let definitions = service.list_task_definitions(family).await?;
    let definition = first_task_definition(family, definitions)?;

    info!("Selected task definition {}", definition);
    Ok(definition)
}

fn first_instance(cluster: &str, instances: Vec<String>) -> Result<String, RunError> {
    instances
        .into_iter()
        .next()
        .ok_or_else(|| RunError::NoInstanceAvailable {
            cluster: cluster.to_string(),
        })
}

fn first_task_definition(family: &str, definitions: Vec<String>) -> Result<String, RunError> {
    definitions
        .into_iter()
        .next()
        .ok_or_else(|| RunError::NoTaskDefinitionAvailable {
            family: family.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecsrun_client::mock::{Call, MockClusterService};

    #[tokio::test]
    async fn test_first_instance_is_selected() {
        let mock = MockClusterService::new().with_instances(["i-1", "i-2"]);

        let instance = find_instance(&mock, "c1").await.unwrap();

        assert_eq!(instance, "i-1");
        assert_eq!(
            mock.calls(),
            vec![Call::ListContainerInstances {
                cluster: "c1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_no_instances() {
        let mock = MockClusterService::new();

        let err = find_instance(&mock, "c1").await.unwrap_err();

        assert!(matches!(err, RunError::NoInstanceAvailable { cluster } if cluster == "c1"));
    }

    #[tokio::test]
    async fn test_newest_task_definition_is_selected() {
        let mock = MockClusterService::new().with_task_definitions(["arn:td:3", "arn:td:2"]);

        let definition = find_task_definition(&mock, "my-task").await.unwrap();

        assert_eq!(definition, "arn:td:3");
    }

    #[tokio::test]
    async fn test_no_task_definitions() {
        let mock = MockClusterService::new();

        let err = find_task_definition(&mock, "my-task").await.unwrap_err();

        assert!(
            matches!(err, RunError::NoTaskDefinitionAvailable { family } if family == "my-task")
        );
    }
}
