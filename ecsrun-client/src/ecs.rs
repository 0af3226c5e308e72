//! ECS-backed cluster service

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecs::Client;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types::{
    ContainerInstanceStatus, ContainerOverride, SortOrder, TaskDefinitionStatus, TaskOverride,
};
use ecsrun_core::domain::task::TasksResponse;
use ecsrun_core::dto::run::RunRequest;
use tracing::debug;

use crate::ClusterService;
use crate::convert::tasks_response;
use crate::error::{ClientError, Result};

/// Cluster service backed by the AWS ECS API
///
/// Credentials come from the AWS default provider chain.
#[derive(Debug, Clone)]
pub struct EcsClusterService {
    client: Client,
}

impl EcsClusterService {
    /// Create a service from the ambient AWS configuration
    ///
    /// # Arguments
    /// * `region` - Region override; the provider chain decides when `None`
    /// * `profile` - Named profile from the shared config files
    pub async fn from_env(region: Option<String>, profile: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        Self::with_client(Client::new(&sdk_config))
    }

    /// Create a service around an already configured ECS client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterService for EcsClusterService {
    async fn list_container_instances(&self, cluster: &str) -> Result<Vec<String>> {
        debug!("ListContainerInstances cluster={}", cluster);

        let output = self
            .client
            .list_container_instances()
            .cluster(cluster)
            .status(ContainerInstanceStatus::Active)
            .send()
            .await
            .map_err(|e| {
                ClientError::service("ListContainerInstances", DisplayErrorContext(&e).to_string())
            })?;

        Ok(output.container_instance_arns.unwrap_or_default())
    }

    async fn list_task_definitions(&self, family: &str) -> Result<Vec<String>> {
        debug!("ListTaskDefinitions familyPrefix={}", family);

        let output = self
            .client
            .list_task_definitions()
            .family_prefix(family)
            .status(TaskDefinitionStatus::Active)
            .sort(SortOrder::Desc)
            .send()
            .await
            .map_err(|e| {
                ClientError::service("ListTaskDefinitions", DisplayErrorContext(&e).to_string())
            })?;

        Ok(output.task_definition_arns.unwrap_or_default())
    }

    async fn start_task(&self, request: &RunRequest) -> Result<TasksResponse> {
        debug!(
            "StartTask cluster={} instance={} definition={}",
            request.cluster, request.container_instance, request.task_definition
        );

        let overrides = request
            .container_overrides
            .iter()
            .fold(TaskOverride::builder(), |builder, o| {
                builder.container_overrides(
                    ContainerOverride::builder()
                        .name(&o.name)
                        .set_command(Some(o.command.clone()))
                        .build(),
                )
            })
            .build();

        let output = self
            .client
            .start_task()
            .cluster(&request.cluster)
            .container_instances(&request.container_instance)
            .task_definition(&request.task_definition)
            .overrides(overrides)
            .send()
            .await
            .map_err(|e| ClientError::service("StartTask", DisplayErrorContext(&e).to_string()))?;

        Ok(tasks_response(output.tasks, output.failures))
    }

    async fn describe_task(&self, cluster: &str, task_arn: &str) -> Result<TasksResponse> {
        debug!("DescribeTasks cluster={} task={}", cluster, task_arn);

        let output = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .tasks(task_arn)
            .send()
            .await
            .map_err(|e| {
                ClientError::service("DescribeTasks", DisplayErrorContext(&e).to_string())
            })?;

        Ok(tasks_response(output.tasks, output.failures))
    }
}
