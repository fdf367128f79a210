//! Shared building blocks for the perf benchmark services.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
