//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use users_core::{Result, User, UserFields, UserId, UserStore, UsersError};
use users_server::{config::ServerSettings, create_router, AppState, Environment, ServerConfig};
use users_storage::{create_pool, ensure_schema, PoolSettings, SqliteUserStore};

/// Router over a real `SQLite` file; keep the `TempDir` alive for the test
pub async fn sqlite_app() -> (Router, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("users.db").display());

    let pool = create_pool(&db_url, &PoolSettings::default())
        .await
        .expect("Failed to create pool");
    ensure_schema(&pool).await.expect("Failed to create schema");

    let app = app_with_store(Arc::new(SqliteUserStore::new(pool)), Environment::Development);
    (app, temp_dir)
}

/// Router over any store, without static file serving
pub fn app_with_store(store: Arc<dyn UserStore>, environment: Environment) -> Router {
    create_router(AppState::new(store, environment), &test_settings())
        .expect("Failed to build router")
}

pub fn test_settings() -> ServerSettings {
    let mut settings = ServerConfig::default().server;
    settings.web_dir = None;
    settings
}

/// Send a request and decode the JSON response body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };

    (status, json)
}

/// Store whose every call fails, for exercising the 500 paths
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn ping(&self) -> bool {
        false
    }

    async fn list(&self) -> Result<Vec<User>> {
        Err(UsersError::Database("connection refused".to_string()))
    }

    async fn get(&self, _id: UserId) -> Result<Option<User>> {
        Err(UsersError::Database("connection refused".to_string()))
    }

    async fn create(&self, _fields: &UserFields) -> Result<User> {
        Err(UsersError::Database("connection refused".to_string()))
    }

    async fn update(&self, _id: UserId, _fields: &UserFields) -> Result<Option<User>> {
        Err(UsersError::Database("connection refused".to_string()))
    }

    async fn delete(&self, _id: UserId) -> Result<Option<User>> {
        Err(UsersError::Database("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
