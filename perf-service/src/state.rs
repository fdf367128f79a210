//! Application state for perf service.

use std::sync::Arc;

use common::config::AppConfig;
use crate::store::PerfStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn PerfStore>,
}

impl AppState {
    /// Creates a new application state around an already opened store.
    pub fn new(config: AppConfig, store: Arc<dyn PerfStore>) -> Self {
        Self { config, store }
    }
}
