//! ecsrun Core
//!
//! Core types shared by the ecsrun client and CLI.
//!
//! This crate contains:
//! - Domain types: tasks, containers and run status as reported by the cluster service
//! - DTOs: the run request submitted to the cluster service

pub mod domain;
pub mod dto;
