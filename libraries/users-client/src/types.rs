//! Types exchanged with the users API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use users_core::User;

/// Where and how to reach the API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:3001`
    pub url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3001")
    }
}

/// `data` of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database_connected: bool,
    #[serde(default)]
    pub uptime: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// `GET /users` result
#[derive(Debug, Clone, PartialEq)]
pub struct UserList {
    pub users: Vec<User>,
    pub total: usize,
}
