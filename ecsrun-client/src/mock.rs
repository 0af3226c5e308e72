//! Scripted in-memory cluster service for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ecsrun_core::domain::status::RunStatus;
use ecsrun_core::domain::task::{Task, TasksResponse};
use ecsrun_core::dto::run::RunRequest;

use crate::ClusterService;
use crate::error::{ClientError, Result};

/// A call made against the mock, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListContainerInstances { cluster: String },
    ListTaskDefinitions { family: String },
    StartTask(RunRequest),
    DescribeTask { cluster: String, task_arn: String },
}

/// Cluster service returning preset responses and recording every call
///
/// Describe responses are consumed in order; describing past the end of the
/// script is a service error.
#[derive(Default)]
pub struct MockClusterService {
    instances: Vec<String>,
    task_definitions: Vec<String>,
    start_response: Mutex<Option<Result<TasksResponse>>>,
    describe_responses: Mutex<VecDeque<Result<TasksResponse>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockClusterService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instances<I, S>(mut self, instances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instances = instances.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_task_definitions<I, S>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task_definitions = definitions.into_iter().map(Into::into).collect();
        self
    }

    /// StartTask response
    pub fn with_start_response(self, response: Result<TasksResponse>) -> Self {
        *self.start_response.lock().unwrap() = Some(response);
        self
    }

    /// Queue one DescribeTasks response
    pub fn with_describe_response(self, response: Result<TasksResponse>) -> Self {
        self.describe_responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue one DescribeTasks response per status, all for the same task
    pub fn with_statuses(mut self, task_arn: &str, statuses: &[&str]) -> Self {
        for status in statuses {
            self = self.with_describe_response(Ok(TasksResponse::single(Task::new(
                task_arn,
                RunStatus::from(*status),
            ))));
        }
        self
    }

    /// All calls made so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of StartTask calls made so far
    pub fn start_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::StartTask(_)))
            .count()
    }

    /// Number of DescribeTasks calls made so far
    pub fn describe_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::DescribeTask { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ClusterService for MockClusterService {
    async fn list_container_instances(&self, cluster: &str) -> Result<Vec<String>> {
        self.record(Call::ListContainerInstances {
            cluster: cluster.to_string(),
        });
        Ok(self.instances.clone())
    }

    async fn list_task_definitions(&self, family: &str) -> Result<Vec<String>> {
        self.record(Call::ListTaskDefinitions {
            family: family.to_string(),
        });
        Ok(self.task_definitions.clone())
    }

    async fn start_task(&self, request: &RunRequest) -> Result<TasksResponse> {
        self.record(Call::StartTask(request.clone()));
        self.start_response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ClientError::service("StartTask", "no scripted response")))
    }

    async fn describe_task(&self, cluster: &str, task_arn: &str) -> Result<TasksResponse> {
        self.record(Call::DescribeTask {
            cluster: cluster.to_string(),
            task_arn: task_arn.to_string(),
        });
        self.describe_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::service("DescribeTasks", "no scripted response")))
    }
}
