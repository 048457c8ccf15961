/// Development-only exposure of internal fault detail
use crate::{config::Environment, error::ErrorDetail};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use users_core::Envelope;

/// Rewrite 5xx bodies to include the fault detail when running in
/// development. In production the redacted body produced by
/// `ServerError::into_response` is sent unchanged.
pub async fn expose_error_detail(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetail { message, detail }) = response.extensions_mut().remove::<ErrorDetail>()
    else {
        return response;
    };

    if !environment.is_development() {
        return response;
    }

    let status = response.status();
    let body = Envelope::<()>::failure(message).with_error(detail);
    (status, Json(body)).into_response()
}
