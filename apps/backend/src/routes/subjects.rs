//! Subject endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use study_core::{slugify, validate_subject_name, SubjectStats};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/subjects
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<SubjectListResponse>> {
    let subjects = state.db.list_subjects(auth.user_id).await?;
    Ok(Json(SubjectListResponse {
        subjects: subjects.iter().map(DbSubject::to_api_subject).collect(),
    }))
}

/// POST /api/subjects
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<CreateSubjectResponse>)> {
    let name = validate_subject_name(&payload.name)?;
    let slug = slugify(&name);

    let subject = state.db.create_subject(auth.user_id, &name, &slug).await?;

    tracing::info!("Created subject {} for user {}", subject.slug, auth.user_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateSubjectResponse { slug: subject.slug }),
    ))
}

/// GET /api/subjects/:slug
pub async fn detail(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
) -> Result<Json<SubjectDetailResponse>> {
    let subject = state.db.require_subject(auth.user_id, &slug).await?;
    let items = state
        .db
        .list_items_with_progress(subject.id, auth.user_id)
        .await?;

    let stats = SubjectStats::from_items(&items, state.scheduler.now());

    let mut subject = subject.to_api_subject();
    subject.item_count = items.len();

    Ok(Json(SubjectDetailResponse {
        detail: SubjectDetail { subject, items },
        stats,
    }))
}

/// DELETE /api/subjects/:slug
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
) -> Result<Json<SuccessResponse>> {
    if !state.db.delete_subject(auth.user_id, &slug).await? {
        return Err(ApiError::NotFound("Subject not found".to_string()));
    }

    tracing::info!("Deleted subject {} for user {}", slug, auth.user_id);

    Ok(Json(SuccessResponse::ok()))
}
