//! Item endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/subjects/:slug/items
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
    Json(payload): Json<ItemPayload>,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let input = payload.into_input().into_valid()?;
    let subject = state.db.require_subject(auth.user_id, &slug).await?;

    let item = state.db.create_item(subject.id, auth.user_id, &input).await?;

    tracing::debug!("Created item {} in subject {}", item.id(), subject.slug);

    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

/// PATCH /api/subjects/:slug/items/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((slug, item_id)): Path<(String, Uuid)>,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<ItemResponse>> {
    let input = payload.into_input().into_valid()?;
    let subject = state.db.require_subject(auth.user_id, &slug).await?;

    if !state.db.update_item(subject.id, item_id, &input).await? {
        return Err(ApiError::NotFound("Item not found".to_string()));
    }

    let item = state
        .db
        .get_item_with_progress(subject.id, item_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    Ok(Json(ItemResponse { item }))
}

/// DELETE /api/subjects/:slug/items/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((slug, item_id)): Path<(String, Uuid)>,
) -> Result<Json<SuccessResponse>> {
    let subject = state.db.require_subject(auth.user_id, &slug).await?;

    if !state.db.delete_item(subject.id, item_id).await? {
        return Err(ApiError::NotFound("Item not found".to_string()));
    }

    Ok(Json(SuccessResponse::ok()))
}
