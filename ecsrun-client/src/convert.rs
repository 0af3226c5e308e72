//! Conversions from ECS SDK shapes into ecsrun domain types

use aws_sdk_ecs::primitives::DateTime as SdkDateTime;
use aws_sdk_ecs::types as sdk;
use chrono::{DateTime, Utc};
use ecsrun_core::domain::status::RunStatus;
use ecsrun_core::domain::task::{Container, Failure, Task, TasksResponse};

/// Build a response, preserving the difference between an absent and an empty run list
pub(crate) fn tasks_response(
    tasks: Option<Vec<sdk::Task>>,
    failures: Option<Vec<sdk::Failure>>,
) -> TasksResponse {
    TasksResponse {
        tasks: tasks.map(|tasks| tasks.into_iter().map(task).collect()),
        failures: failures.map(|failures| failures.into_iter().map(failure).collect()),
    }
}

fn task(task: sdk::Task) -> Task {
    Task {
        task_arn: task.task_arn,
        task_definition_arn: task.task_definition_arn,
        cluster_arn: task.cluster_arn,
        container_instance_arn: task.container_instance_arn,
        last_status: task.last_status.as_deref().map(RunStatus::from),
        desired_status: task.desired_status.as_deref().map(RunStatus::from),
        stopped_reason: task.stopped_reason,
        stop_code: task.stop_code.map(|code| code.as_str().to_string()),
        created_at: task.created_at.as_ref().and_then(timestamp),
        started_at: task.started_at.as_ref().and_then(timestamp),
        stopped_at: task.stopped_at.as_ref().and_then(timestamp),
        containers: task
            .containers
            .unwrap_or_default()
            .into_iter()
            .map(container)
            .collect(),
    }
}

fn container(container: sdk::Container) -> Container {
    Container {
        name: container.name,
        container_arn: container.container_arn,
        last_status: container.last_status,
        exit_code: container.exit_code,
        reason: container.reason,
    }
}

fn failure(failure: sdk::Failure) -> Failure {
    Failure {
        arn: failure.arn,
        reason: failure.reason,
        detail: failure.detail,
    }
}

fn timestamp(value: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}
