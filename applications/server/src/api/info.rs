/// Service description and the catch-all route
use crate::error::ServerError;
use axum::{http::Uri, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use users_core::Envelope;

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub documentation: String,
}

/// GET / - Service description and endpoint list
pub async fn info() -> Json<Envelope<ApiInfo>> {
    let endpoints = BTreeMap::from([
        ("health", "GET /health"),
        ("list_users", "GET /users"),
        ("get_user", "GET /users/:id"),
        ("create_user", "POST /users"),
        ("update_user", "PUT /users/:id"),
        ("delete_user", "DELETE /users/:id"),
    ]);

    Json(Envelope::ok(
        "Users REST API",
        ApiInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            endpoints,
            documentation: "Open /index.html for the web interface".to_string(),
        },
    ))
}

/// Fallback for every unmatched route; echoes the requested path
pub async fn not_found(uri: Uri) -> ServerError {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    ServerError::RouteNotFound(path)
}
