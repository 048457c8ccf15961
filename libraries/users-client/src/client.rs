//! HTTP client for the users API.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, HealthStatus, UserList};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;
use users_core::{Envelope, User, UserId, UserInput};

/// Client for the users REST API.
///
/// Every call is a single attempt; failures are returned to the caller
/// as they happen.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("users-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Base URL without trailing slash
    pub fn url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthStatus> {
        let envelope = self.send(self.http.get(self.endpoint("/health"))).await?;
        required_data(envelope)
    }

    /// GET /users
    pub async fn list_users(&self) -> Result<UserList> {
        let envelope: Envelope<Vec<User>> =
            self.send(self.http.get(self.endpoint("/users"))).await?;
        let total = envelope.total;
        let users = required_data(envelope)?;
        Ok(UserList {
            total: total.unwrap_or(users.len()),
            users,
        })
    }

    /// GET /users/:id
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        let envelope = self
            .send(self.http.get(self.endpoint(&format!("/users/{}", id))))
            .await?;
        required_data(envelope)
    }

    /// POST /users
    pub async fn create_user(&self, input: &UserInput) -> Result<User> {
        let envelope = self
            .send(self.http.post(self.endpoint("/users")).json(input))
            .await?;
        required_data(envelope)
    }

    /// PUT /users/:id
    pub async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User> {
        let envelope = self
            .send(
                self.http
                    .put(self.endpoint(&format!("/users/{}", id)))
                    .json(input),
            )
            .await?;
        required_data(envelope)
    }

    /// DELETE /users/:id, returning the removed user
    pub async fn delete_user(&self, id: UserId) -> Result<User> {
        let envelope = self
            .send(self.http.delete(self.endpoint(&format!("/users/{}", id))))
            .await?;
        required_data(envelope)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::Unreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await?;
        debug!(url = %url, status = status.as_u16(), "Response received");

        if status.is_success() {
            return serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::Parse(format!("{} from {}", e, url)));
        }

        let (message, errors) = match serde_json::from_slice::<Envelope<serde_json::Value>>(&bytes)
        {
            Ok(envelope) => (envelope.message, envelope.errors.unwrap_or_default()),
            Err(_) => (format!("Error {}", status.as_u16()), Vec::new()),
        };
        warn!(url = %url, status = status.as_u16(), message = %message, "Request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            errors,
        })
    }
}

fn required_data<T>(envelope: Envelope<T>) -> Result<T> {
    envelope
        .data
        .ok_or_else(|| ClientError::Parse("response has no data".into()))
}
