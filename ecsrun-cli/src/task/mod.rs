//! Task runner
//!
//! Runs one task on a cluster and waits for it:
//! - resolve a container instance and the newest task definition
//! - submit a single run with the command override
//! - poll the run until the service reports STOPPED
//!
//! The cluster service is passed in, so the whole flow can run against the
//! real ECS API or a scripted fake.

mod poll;
mod resolve;
mod submit;

pub use poll::StatusPoller;

use std::io::Write;

use colored::*;
use ecsrun_client::ClusterService;
use ecsrun_core::domain::task::TasksResponse;

use crate::config::Config;
use crate::error::RunError;

/// Runs a configured task to completion
pub struct TaskRunner<'a> {
    service: &'a dyn ClusterService,
    config: &'a Config,
}

impl<'a> TaskRunner<'a> {
    pub fn new(service: &'a dyn ClusterService, config: &'a Config) -> Self {
        Self { service, config }
    }

    /// Resolves, submits and polls; returns the final describe response
    ///
    /// Any error ends the run. Nothing is retried.
    pub async fn run(&self, out: &mut dyn Write) -> Result<TasksResponse, RunError> {
        let config = self.config;

        writeln!(out, "Starting task {}", config.task.bold())?;

        let instance = resolve::find_instance(self.service, &config.cluster).await?;
        let task_definition = resolve::find_task_definition(self.service, &config.task).await?;

        let request = submit::build_request(
            &config.cluster,
            &config.container,
            &instance,
            &task_definition,
            &config.command,
        );
        let response = submit::start_task(self.service, &request).await?;
        let task_arn = submit::extract_run_handle(&response, out)?;

        StatusPoller::new(self.service, &config.cluster, config.poll_interval)
            .wait_until_stopped(&task_arn, out)
            .await
    }
}
