//! Task submission and run handle extraction

use std::io::Write;

use ecsrun_client::ClusterService;
use ecsrun_core::domain::task::TasksResponse;
use ecsrun_core::dto::run::{ContainerOverride, RunRequest};
use tracing::{info, warn};

use crate::error::RunError;

/// Builds the run request for a resolved instance and task definition
///
/// The command replaces the default arguments of exactly one container.
pub fn build_request(
    cluster: &str,
    container: &str,
    instance: &str,
    task_definition: &str,
    command: &[String],
) -> RunRequest {
    RunRequest::new(
        cluster,
        instance,
        task_definition,
        ContainerOverride::new(container, command.to_vec()),
    )
}

/// Submits a run request once
pub async fn start_task(
    service: &dyn ClusterService,
    request: &RunRequest,
) -> Result<TasksResponse, RunError> {
    let response = service.start_task(request).await?;

    for failure in response.failures() {
        warn!(
            "StartTask failure for {}: {} {}",
            failure.arn.as_deref().unwrap_or("-"),
            failure.reason.as_deref().unwrap_or("-"),
            failure.detail.as_deref().unwrap_or("")
        );
    }

    Ok(response)
}

/// Extracts the run handle from a submission response
///
/// When the run list is empty the raw response is written to `out` before
/// failing, since the service usually explains why in `failures`.
pub fn extract_run_handle(
    response: &TasksResponse,
    out: &mut dyn Write,
) -> Result<String, RunError> {
    let tasks = response
        .tasks
        .as_ref()
        .ok_or_else(|| RunError::malformed("start task response has no task list"))?;

    let Some(task) = tasks.first() else {
        writeln!(out, "{}", serde_json::to_string_pretty(response)?)?;
        return Err(RunError::malformed("start task response has an empty task list"));
    };

    let handle = task
        .task_arn
        .clone()
        .ok_or_else(|| RunError::malformed("started task has no task ARN"))?;

    info!("Started task {}", handle);
    Ok(handle)
}
