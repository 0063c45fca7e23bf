//! Study endpoints: flashcard and quiz sessions driven by the review scheduler

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use study_core::{build_quiz_card, due_count};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/subjects/:slug/study/next
pub async fn next(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
) -> Result<Json<NextItemResponse>> {
    let subject = state.db.require_subject(auth.user_id, &slug).await?;
    let items = state
        .db
        .list_items_with_progress(subject.id, auth.user_id)
        .await?;

    let item = state.scheduler.next(&items, &mut rand::rng()).cloned();

    Ok(Json(NextItemResponse {
        item,
        due_count: due_count(&items, state.scheduler.now()),
        total: items.len(),
    }))
}

/// GET /api/subjects/:slug/quiz/next
pub async fn quiz_next(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
) -> Result<Json<NextQuizResponse>> {
    let subject = state.db.require_subject(auth.user_id, &slug).await?;
    let items = state
        .db
        .list_items_with_progress(subject.id, auth.user_id)
        .await?;

    let (item, card) = {
        let mut rng = rand::rng();
        match state.scheduler.next(&items, &mut rng) {
            Some(item) => {
                let card = build_quiz_card(item, &items, &mut rng);
                (Some(item.clone()), Some(card))
            }
            None => (None, None),
        }
    };

    Ok(Json(NextQuizResponse {
        card,
        item,
        due_count: due_count(&items, state.scheduler.now()),
        total: items.len(),
    }))
}

/// POST /api/subjects/:slug/study/review
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Evaluation>> {
    let grade: EvaluationLevel = payload.grade.parse()?;
    record_review(&state, &auth, &slug, payload.item_id, grade).await
}

/// POST /api/subjects/:slug/quiz/answer
pub async fn quiz_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
    Json(payload): Json<QuizAnswerRequest>,
) -> Result<Json<Evaluation>> {
    let grade = EvaluationLevel::from_quiz_answer(payload.correct);
    record_review(&state, &auth, &slug, payload.item_id, grade).await
}

/// Grade an item and persist the resulting progress.
async fn record_review(
    state: &AppState,
    auth: &AuthenticatedUser,
    slug: &str,
    item_id: Uuid,
    grade: EvaluationLevel,
) -> Result<Json<Evaluation>> {
    let subject = state.db.require_subject(auth.user_id, slug).await?;
    let item = state
        .db
        .get_item_with_progress(subject.id, item_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    let evaluation = state.scheduler.evaluate(&item, grade, &mut rand::rng());

    state
        .db
        .save_progress(item_id, auth.user_id, &evaluation.to_patch())
        .await?;

    tracing::debug!(
        "Recorded {} review for item {} (next due {:?}, queue offset {})",
        grade,
        item_id,
        evaluation.progress.next_due,
        evaluation.queue_offset
    );

    Ok(Json(evaluation))
}
