//! Task runner error types
//!
//! Every variant is fatal. Nothing in the run flow retries or falls back.

use ecsrun_client::ClientError;
use thiserror::Error;

/// Errors that end an ecsrun invocation
#[derive(Debug, Error)]
pub enum RunError {
    /// A required flag was not given
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// The cluster has no ACTIVE container instances
    #[error("No container instances available in cluster {cluster}")]
    NoInstanceAvailable { cluster: String },

    /// The family has no ACTIVE task definitions
    #[error("No task definitions available for {family}")]
    NoTaskDefinitionAvailable { family: String },

    /// The service returned a structurally incomplete payload
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Transport or service-side failure, propagated unchanged
    #[error(transparent)]
    Service(#[from] ClientError),

    /// Writing progress output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Rendering a response dump failed
    #[error("Failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

impl RunError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
