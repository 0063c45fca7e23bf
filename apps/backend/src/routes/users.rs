//! User registration and profile endpoints

use axum::{body::Bytes, extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{CurrentUserResponse, RegisterUserRequest, RegisterUserResponse};
use crate::routes::auth::{generate_token, hash_token, AuthenticatedUser};
use crate::AppState;

/// POST /api/users/register
/// Creates a user and returns its bearer token. The token is not retrievable later.
/// The body is optional; when present it must be JSON (`{}`, `null` or a request).
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegisterUserResponse>> {
    let display_name = parse_register_body(&body)?
        .and_then(|p| p.display_name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let token = generate_token();
    let user = state
        .db
        .create_user(&hash_token(&token), display_name.as_deref())
        .await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterUserResponse {
        user_id: user.id,
        token,
    }))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<CurrentUserResponse>> {
    let user = state
        .db
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(CurrentUserResponse {
        user_id: user.id,
        display_name: user.display_name,
        created_at: user.created_at,
        last_seen_at: user.last_seen_at,
    }))
}

/// An empty body registers without a display name.
fn parse_register_body(body: &[u8]) -> Result<Option<RegisterUserRequest>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}
