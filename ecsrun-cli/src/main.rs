//! ecsrun
//!
//! Runs a single AWS ECS task on a cluster and monitors it until STOPPED.

mod config;
mod error;
mod task;

use std::process::ExitCode;

use clap::Parser;
use colored::*;
use ecsrun_client::EcsClusterService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Args, Config};
use crate::error::RunError;
use crate::task::TaskRunner;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout is reserved for progress and the final dump
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecsrun=info,ecsrun_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Validates arguments, builds the one service client and runs the task
async fn run(args: Args) -> Result<(), RunError> {
    let config = Config::from_args(args)?;

    let service = EcsClusterService::from_env(config.region.clone(), config.profile.clone()).await;
    info!("ECS client initialized");

    let mut stdout = std::io::stdout();
    TaskRunner::new(&service, &config).run(&mut stdout).await?;

    Ok(())
}
