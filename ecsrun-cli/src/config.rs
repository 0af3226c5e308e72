//! Configuration module
//!
//! Command-line arguments and the validated configuration built from them.

use clap::Parser;
use std::time::Duration;

use crate::error::RunError;

/// Command run inside the container when none is given after `--`
pub const DEFAULT_COMMAND: [&str; 4] = ["node", "dist/index", "--ci", "login-client"];

/// Raw command-line arguments
#[derive(Parser, Debug)]
#[command(name = "ecsrun")]
#[command(about = "Runs an AWS ECS task and monitors it until STOPPED", long_about = None)]
#[command(override_usage = "ecsrun --task my-task --cluster my-cluster [-- <COMMAND>...]")]
pub struct Args {
    /// Name of the ECS cluster that contains the task definition
    #[arg(long, env = "ECSRUN_CLUSTER")]
    pub cluster: Option<String>,

    /// Name of the task
    #[arg(long, env = "ECSRUN_TASK")]
    pub task: Option<String>,

    /// Container whose command is overridden (defaults to the task name)
    #[arg(long)]
    pub container: Option<String>,

    /// Delay between status polls in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub poll_interval: u64,

    /// AWS region (defaults to the provider chain)
    #[arg(long)]
    pub region: Option<String>,

    /// AWS shared config profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Command override for the container
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Validated configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Cluster to run in
    pub cluster: String,
    /// Task definition family
    pub task: String,
    /// Container receiving the command override
    pub container: String,
    /// Command override
    pub command: Vec<String>,
    /// Pause between polls; zero polls back-to-back
    pub poll_interval: Duration,
    pub region: Option<String>,
    pub profile: Option<String>,
}

impl Config {
    /// Validates arguments, checking `task` before `cluster`
    pub fn from_args(args: Args) -> Result<Self, RunError> {
        let task = non_empty(args.task).ok_or(RunError::MissingArgument("task"))?;
        let cluster = non_empty(args.cluster).ok_or(RunError::MissingArgument("cluster"))?;

        let container = non_empty(args.container).unwrap_or_else(|| task.clone());
        let command = if args.command.is_empty() {
            DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect()
        } else {
            args.command
        };

        Ok(Self {
            cluster,
            task,
            container,
            command,
            poll_interval: Duration::from_millis(args.poll_interval),
            region: non_empty(args.region),
            profile: non_empty(args.profile),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Config, RunError> {
        let mut argv = vec!["ecsrun"];
        argv.extend_from_slice(args);
        Config::from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--cluster", "c1", "--task", "my-task"]).unwrap();

        assert_eq!(config.cluster, "c1");
        assert_eq!(config.task, "my-task");
        assert_eq!(config.container, "my-task");
        assert_eq!(config.command, DEFAULT_COMMAND);
        assert_eq!(config.poll_interval, Duration::ZERO);
        assert!(config.region.is_none());
    }

    #[test]
    fn test_task_is_checked_before_cluster() {
        let err = parse(&[]).unwrap_err();
        assert!(matches!(err, RunError::MissingArgument("task")));
        assert_eq!(err.to_string(), "task is required");
    }

    #[test]
    fn test_missing_cluster() {
        let err = parse(&["--task", "my-task"]).unwrap_err();
        assert!(matches!(err, RunError::MissingArgument("cluster")));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = parse(&["--task", "", "--cluster", "c1"]).unwrap_err();
        assert!(matches!(err, RunError::MissingArgument("task")));
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "--cluster",
            "c1",
            "--task",
            "my-task",
            "--container",
            "app",
            "--poll-interval",
            "1500",
            "--region",
            "eu-west-1",
            "--",
            "echo",
            "hello",
        ])
        .unwrap();

        assert_eq!(config.container, "app");
        assert_eq!(config.command, vec!["echo", "hello"]);
        assert_eq!(config.poll_interval, Duration::from_millis(1500));
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_help_stops_before_configuration() {
        let err = Args::try_parse_from(["ecsrun", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["ecsrun", "--cluster", "c1", "--task", "t", "--help"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_help_describes_both_flags() {
        let err = Args::try_parse_from(["ecsrun", "--help"]).unwrap_err();
        let usage = err.to_string();

        assert!(usage.contains("--cluster"));
        assert!(usage.contains("--task"));
        assert!(usage.contains("until STOPPED"));
    }
}
