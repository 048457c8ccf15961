/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use users_core::{Envelope, UsersError, ValidationErrors};

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message sent with every 500 response
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Text sent in place of fault detail outside development
pub const REDACTED_DETAIL: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid data: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[source] UsersError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<UsersError> for ServerError {
    fn from(err: UsersError) -> Self {
        match err {
            UsersError::DuplicateEmail(_) => {
                ServerError::Conflict("Email already registered".to_string())
            }
            other => ServerError::Store(other),
        }
    }
}

impl From<ValidationErrors> for ServerError {
    fn from(err: ValidationErrors) -> Self {
        ServerError::Validation(err)
    }
}

/// Fault detail attached to 5xx responses.
///
/// The body always carries the redacted text; `middleware::expose_error_detail`
/// swaps the detail in when running in development.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: &'static str,
    pub detail: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) | ServerError::InvalidId(_) | ServerError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NotFound(_) | ServerError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Store(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (body, detail) = match self {
            ServerError::Validation(ref errors) => {
                tracing::warn!("Validation failed: {}", errors);
                (
                    Envelope::<()>::failure("Invalid data").with_errors(errors.messages()),
                    None,
                )
            }
            ServerError::InvalidId(ref raw) => {
                tracing::warn!("Invalid id: {:?}", raw);
                (
                    Envelope::failure("ID must be a valid positive integer"),
                    None,
                )
            }
            ServerError::BadRequest(ref msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    Envelope::failure("Invalid request body").with_errors(vec![msg.clone()]),
                    None,
                )
            }
            ServerError::NotFound(ref msg) => {
                tracing::info!("Not found: {}", msg);
                (Envelope::failure(msg.clone()), None)
            }
            ServerError::RouteNotFound(ref path) => {
                tracing::info!("Route not found: {}", path);
                (Envelope::failure("Route not found").with_path(path.clone()), None)
            }
            ServerError::Conflict(ref msg) => {
                tracing::warn!("Conflict: {}", msg);
                (Envelope::failure(msg.clone()), None)
            }
            ServerError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    Envelope::failure(INTERNAL_MESSAGE).with_error(REDACTED_DETAIL),
                    Some(ErrorDetail {
                        message: INTERNAL_MESSAGE,
                        detail: e.to_string(),
                    }),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    Envelope::failure(INTERNAL_MESSAGE).with_error(REDACTED_DETAIL),
                    Some(ErrorDetail {
                        message: INTERNAL_MESSAGE,
                        detail: msg.clone(),
                    }),
                )
            }
            ServerError::Unavailable(ref msg) => {
                tracing::error!("Service unavailable: {}", msg);
                (
                    Envelope::failure("Service unavailable").with_error(REDACTED_DETAIL),
                    Some(ErrorDetail {
                        message: "Service unavailable",
                        detail: msg.clone(),
                    }),
                )
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(detail) = detail {
            response.extensions_mut().insert(detail);
        }
        response
    }
}
