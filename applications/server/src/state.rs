/// Shared application state
use crate::config::Environment;
use std::sync::Arc;
use std::time::Instant;
use users_core::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub environment: Environment,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, environment: Environment) -> Self {
        Self {
            store,
            environment,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was built
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
