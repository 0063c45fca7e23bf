//! Progress persistence endpoint

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{SaveProgressRequest, SuccessResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/progress
/// Merges `statsPatch` into the caller's progress for `itemId`.
pub async fn save(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SaveProgressRequest>,
) -> Result<Json<SuccessResponse>> {
    if !state.db.item_owned_by(payload.item_id, auth.user_id).await? {
        return Err(ApiError::NotFound("Item not found".to_string()));
    }

    state
        .db
        .save_progress(payload.item_id, auth.user_id, &payload.stats_patch)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
