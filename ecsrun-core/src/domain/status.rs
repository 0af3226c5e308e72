//! Run status domain type

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a task run, as reported by the cluster service
///
/// The service owns this state. Values ecsrun does not recognise are kept
/// verbatim in `Other` so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
    Other(String),
}

impl RunStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Provisioning => "PROVISIONING",
            RunStatus::Pending => "PENDING",
            RunStatus::Activating => "ACTIVATING",
            RunStatus::Running => "RUNNING",
            RunStatus::Deactivating => "DEACTIVATING",
            RunStatus::Stopping => "STOPPING",
            RunStatus::Deprovisioning => "DEPROVISIONING",
            RunStatus::Stopped => "STOPPED",
            RunStatus::Other(raw) => raw,
        }
    }

    /// Whether no further transitions can occur
    ///
    /// Only the exact value `STOPPED` is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Stopped)
    }
}

impl FromStr for RunStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PROVISIONING" => RunStatus::Provisioning,
            "PENDING" => RunStatus::Pending,
            "ACTIVATING" => RunStatus::Activating,
            "RUNNING" => RunStatus::Running,
            "DEACTIVATING" => RunStatus::Deactivating,
            "STOPPING" => RunStatus::Stopping,
            "DEPROVISIONING" => RunStatus::Deprovisioning,
            "STOPPED" => RunStatus::Stopped,
            other => RunStatus::Other(other.to_string()),
        })
    }
}

impl From<&str> for RunStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RunStatus::from(raw.as_str()))
    }
}
