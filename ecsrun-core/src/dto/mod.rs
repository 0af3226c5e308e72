//! Data Transfer Objects sent to the cluster service

pub mod run;
