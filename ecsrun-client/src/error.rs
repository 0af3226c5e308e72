//! Error types for the cluster service client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the cluster service
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service call failed in transport or on the service side
    #[error("{operation} failed: {message}")]
    Service {
        /// API operation name (e.g. "DescribeTasks")
        operation: &'static str,
        /// Full error context reported by the SDK
        message: String,
    },
}

impl ClientError {
    /// Create a service error for an operation
    pub fn service(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            message: message.into(),
        }
    }

    /// Name of the API operation that failed
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Service { operation, .. } => operation,
        }
    }
}
