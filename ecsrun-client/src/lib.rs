//! ecsrun Cluster Service Client
//!
//! The four cluster service operations ecsrun needs, behind one trait so the
//! task runner can be driven by the real ECS API or by a scripted fake.
//!
//! # Example
//!
//! ```no_run
//! use ecsrun_client::{ClusterService, EcsClusterService};
//!
//! #[tokio::main]
//! async fn main() -> ecsrun_client::Result<()> {
//!     let service = EcsClusterService::from_env(None, None).await;
//!
//!     let instances = service.list_container_instances("my-cluster").await?;
//!     println!("Active instances: {:?}", instances);
//!     Ok(())
//! }
//! ```

mod convert;
mod ecs;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use ecs::EcsClusterService;
pub use error::{ClientError, Result};

use async_trait::async_trait;
use ecsrun_core::domain::task::TasksResponse;
use ecsrun_core::dto::run::RunRequest;

/// Operations the task runner requires of a cluster service
#[async_trait]
pub trait ClusterService: Send + Sync {
    /// Lists ACTIVE container instances registered with a cluster
    ///
    /// An absent list in the service response is returned as empty.
    async fn list_container_instances(&self, cluster: &str) -> Result<Vec<String>>;

    /// Lists ACTIVE task definitions of a family, most recent first
    async fn list_task_definitions(&self, family: &str) -> Result<Vec<String>>;

    /// Starts one run of a task definition on a container instance
    ///
    /// Returns the full service response; the run list is not validated here.
    async fn start_task(&self, request: &RunRequest) -> Result<TasksResponse>;

    /// Describes a single run by handle within a cluster
    async fn describe_task(&self, cluster: &str, task_arn: &str) -> Result<TasksResponse>;
}
