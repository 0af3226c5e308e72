//! Run status poller
//!
//! Re-fetches the run's status from the service on every iteration until it
//! reports STOPPED. There is no timeout and no iteration cap.

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use colored::*;
use ecsrun_client::ClusterService;
use ecsrun_core::domain::status::RunStatus;
use ecsrun_core::domain::task::TasksResponse;
use tracing::debug;

use crate::error::RunError;

/// Polls one run within a cluster
pub struct StatusPoller<'a> {
    service: &'a dyn ClusterService,
    cluster: &'a str,
    interval: Duration,
}

impl<'a> StatusPoller<'a> {
    /// Creates a poller; a zero interval polls back-to-back
    pub fn new(service: &'a dyn ClusterService, cluster: &'a str, interval: Duration) -> Self {
        Self {
            service,
            cluster,
            interval,
        }
    }

    /// Polls until the run is STOPPED, then dumps the last response
    ///
    /// Writes one status line per poll, whether or not the status changed.
    pub async fn wait_until_stopped(
        &self,
        task_arn: &str,
        out: &mut dyn Write,
    ) -> Result<TasksResponse, RunError> {
        loop {
            let response = self.service.describe_task(self.cluster, task_arn).await?;
            let status = current_status(&response)?;

            writeln!(
                out,
                "Last status {} {}",
                colorize_status(&status),
                Utc::now().to_rfc3339()
            )?;

            if status.is_terminal() {
                writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
                return Ok(response);
            }

            if !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
        }
    }
}

/// Reads the status of the first run in a describe response
///
/// A run without a status is reported as `UNKNOWN` and is not terminal.
pub fn current_status(response: &TasksResponse) -> Result<RunStatus, RunError> {
    let tasks = response
        .tasks
        .as_ref()
        .ok_or_else(|| RunError::malformed("describe response has no task list"))?;
    let task = tasks
        .first()
        .ok_or_else(|| RunError::malformed("describe response has an empty task list"))?;

    Ok(match &task.last_status {
        Some(status) => status.clone(),
        None => {
            debug!("Task reported no last status");
            RunStatus::Other("UNKNOWN".to_string())
        }
    })
}

/// Colorize run status for display
fn colorize_status(status: &RunStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        RunStatus::Provisioning | RunStatus::Pending | RunStatus::Activating => {
            status_str.yellow()
        }
        RunStatus::Running => status_str.cyan(),
        RunStatus::Deactivating | RunStatus::Stopping | RunStatus::Deprovisioning => {
            status_str.magenta()
        }
        RunStatus::Stopped => status_str.green().bold(),
        RunStatus::Other(_) => status_str.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecsrun_client::ClientError;
    use ecsrun_client::mock::{Call, MockClusterService};
    use ecsrun_core::domain::task::Task;

    const ARN: &str = "arn:task:1";

    fn status_lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .filter(|l| l.starts_with("Last status "))
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_polls_until_stopped() {
        let mock = MockClusterService::new().with_statuses(ARN, &["PENDING", "RUNNING", "STOPPED"]);
        let poller = StatusPoller::new(&mock, "c1", Duration::ZERO);
        let mut out = Vec::new();

        let last = poller.wait_until_stopped(ARN, &mut out).await.unwrap();

        assert_eq!(mock.describe_calls(), 3);
        assert_eq!(
            mock.calls()[0],
            Call::DescribeTask {
                cluster: "c1".to_string(),
                task_arn: ARN.to_string()
            }
        );

        let lines = status_lines(&out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("PENDING"));
        assert!(lines[1].contains("RUNNING"));
        assert!(lines[2].contains("STOPPED"));

        assert_eq!(last.tasks.as_ref().unwrap()[0].last_status, Some(RunStatus::Stopped));
        let text = String::from_utf8_lossy(&out);
        let dump = text.split_once('{').map(|(_, rest)| format!("{{{}", rest)).unwrap();
        let dumped: TasksResponse = serde_json::from_str(&dump).unwrap();
        assert_eq!(dumped, last);
    }

    #[tokio::test]
    async fn test_repeated_status_is_logged_every_time() {
        let mock = MockClusterService::new().with_statuses(ARN, &["RUNNING", "RUNNING", "STOPPED"]);
        let poller = StatusPoller::new(&mock, "c1", Duration::ZERO);
        let mut out = Vec::new();

        poller.wait_until_stopped(ARN, &mut out).await.unwrap();

        assert_eq!(status_lines(&out).len(), 3);
    }

    #[tokio::test]
    async fn test_lowercase_stopped_is_not_terminal() {
        let mock = MockClusterService::new().with_statuses(ARN, &["stopped", "STOPPED"]);
        let poller = StatusPoller::new(&mock, "c1", Duration::ZERO);
        let mut out = Vec::new();

        poller.wait_until_stopped(ARN, &mut out).await.unwrap();

        assert_eq!(mock.describe_calls(), 2);
    }

    #[tokio::test]
    async fn test_paced_polling() {
        let mock = MockClusterService::new().with_statuses(ARN, &["PENDING", "STOPPED"]);
        let poller = StatusPoller::new(&mock, "c1", Duration::from_millis(10));
        let mut out = Vec::new();

        let started = std::time::Instant::now();
        poller.wait_until_stopped(ARN, &mut out).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(10));
        assert_eq!(mock.describe_calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_task_list_aborts() {
        let mock = MockClusterService::new()
            .with_statuses(ARN, &["PENDING"])
            .with_describe_response(Ok(TasksResponse {
                tasks: Some(vec![]),
                failures: None,
            }))
            .with_statuses(ARN, &["STOPPED"]);
        let poller = StatusPoller::new(&mock, "c1", Duration::ZERO);
        let mut out = Vec::new();

        let err = poller.wait_until_stopped(ARN, &mut out).await.unwrap_err();

        assert!(matches!(err, RunError::MalformedResponse(_)));
        assert_eq!(mock.describe_calls(), 2);
        assert_eq!(status_lines(&out).len(), 1);
    }

    #[tokio::test]
    async fn test_service_error_is_not_retried() {
        let mock = MockClusterService::new()
            .with_describe_response(Err(ClientError::service("DescribeTasks", "throttled")))
            .with_statuses(ARN, &["STOPPED"]);
        let poller = StatusPoller::new(&mock, "c1", Duration::ZERO);
        let mut out = Vec::new();

        let err = poller.wait_until_stopped(ARN, &mut out).await.unwrap_err();

        assert!(matches!(err, RunError::Service(_)));
        assert_eq!(mock.describe_calls(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_current_status_without_task_list() {
        let err = current_status(&TasksResponse::default()).unwrap_err();
        assert!(matches!(err, RunError::MalformedResponse(_)));
    }

    #[test]
    fn test_current_status_without_status() {
        let response = TasksResponse::single(Task {
            task_arn: Some(ARN.to_string()),
            ..Default::default()
        });

        let status = current_status(&response).unwrap();

        assert_eq!(status.as_str(), "UNKNOWN");
        assert!(!status.is_terminal());
    }
}
