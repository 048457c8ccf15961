/// Health check API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use users_core::Envelope;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
    pub database_connected: bool,
    pub backend: String,
    pub uptime: String,
    pub uptime_seconds: f64,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub version: String,
}

/// GET /health - API and store health
///
/// An unreachable store is still a 200 with `database_connected = false`.
/// Only a fault in the check task itself yields 503.
pub async fn health(State(app_state): State<AppState>) -> Result<Json<Envelope<HealthReport>>> {
    let store = Arc::clone(&app_state.store);
    let connected = tokio::spawn(async move { store.ping().await })
        .await
        .map_err(|e| ServerError::Unavailable(format!("Health check failed: {}", e)))?;

    if !connected {
        tracing::warn!("Health check: store unreachable");
    }

    let uptime_seconds = app_state.uptime_secs();
    let report = HealthReport {
        status: "OK".to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        database_connected: connected,
        backend: app_state.store.backend().to_string(),
        uptime: format!("{:.2}s", uptime_seconds),
        uptime_seconds,
        timestamp: Utc::now(),
        environment: app_state.environment.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(Json(Envelope::ok("API is running", report)))
}
