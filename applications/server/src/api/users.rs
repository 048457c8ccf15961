/// Users API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use users_core::{validate, Envelope, User, UserFields, UserId, UserInput};

fn not_found() -> ServerError {
    ServerError::NotFound("User not found".to_string())
}

/// Parse a path segment as a positive user id
pub fn parse_id(raw: &str) -> Result<UserId> {
    raw.parse::<UserId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServerError::InvalidId(raw.to_string()))
}

/// Unwrap the path segment and parse it as an id.
///
/// A segment that cannot even be extracted (e.g. invalid UTF-8) is reported
/// like any other malformed id.
fn path_id(segment: std::result::Result<Path<String>, PathRejection>) -> Result<UserId> {
    let Path(raw) = segment.map_err(|rejection| ServerError::InvalidId(rejection.body_text()))?;
    parse_id(&raw)
}

/// Unwrap the JSON body and validate it
fn validated(payload: std::result::Result<Json<UserInput>, JsonRejection>) -> Result<UserFields> {
    let Json(input) = payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    Ok(validate(&input)?)
}

/// GET /users
/// List every user, newest first
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Envelope<Vec<User>>>> {
    tracing::debug!("Listing users");

    let users = app_state.store.list().await?;
    let total = users.len();

    Ok(Json(
        Envelope::ok("Users retrieved successfully", users).with_total(total),
    ))
}

/// GET /users/:id
pub async fn get_user(
    id: std::result::Result<Path<String>, PathRejection>,
    State(app_state): State<AppState>,
) -> Result<Json<Envelope<User>>> {
    let id = path_id(id)?;
    tracing::debug!(id, "Fetching user");

    let user = app_state.store.get(id).await?.ok_or_else(not_found)?;

    Ok(Json(Envelope::ok("User found", user)))
}

/// POST /users
/// Validation happens before the store is touched
pub async fn create_user(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<UserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<User>>)> {
    let fields = validated(payload)?;

    let user = app_state.store.create(&fields).await?;
    tracing::info!(id = user.id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("User created successfully", user)),
    ))
}

/// PUT /users/:id
/// A missing id is 404 whatever the payload holds, so existence is
/// checked before the body is validated.
pub async fn update_user(
    id: std::result::Result<Path<String>, PathRejection>,
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<Envelope<User>>> {
    let id = path_id(id)?;

    if app_state.store.get(id).await?.is_none() {
        return Err(not_found());
    }

    let fields = validated(payload)?;

    // The row can still vanish between the check and the write
    let user = app_state
        .store
        .update(id, &fields)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id, "User updated");

    Ok(Json(Envelope::ok("User updated successfully", user)))
}

/// DELETE /users/:id
/// Responds with the user as it was before deletion
pub async fn delete_user(
    id: std::result::Result<Path<String>, PathRejection>,
    State(app_state): State<AppState>,
) -> Result<Json<Envelope<User>>> {
    let id = path_id(id)?;

    let user = app_state.store.delete(id).await?.ok_or_else(not_found)?;
    tracing::info!(id, "User deleted");

    Ok(Json(Envelope::ok("User removed successfully", user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("999999").unwrap(), 999_999);

        for raw in ["0", "-1", "abc", "1.5", "", "12abc", " 3"] {
            assert!(
                matches!(parse_id(raw), Err(ServerError::InvalidId(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
