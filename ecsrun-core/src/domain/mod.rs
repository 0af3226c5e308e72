//! Core domain types
//!
//! These types mirror the shape of the cluster service's task responses.
//! They are owned by the service; ecsrun only reads and displays them.

pub mod status;
pub mod task;
