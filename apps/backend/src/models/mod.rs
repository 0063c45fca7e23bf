//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{ApiError, Result};

// Re-export shared types from study-core
pub use study_core::types::{
    EvaluationLevel, ItemWithProgress, ProgressPatch, StudyItem, StudyItemProgress, Subject,
    SubjectDetail,
};
pub use study_core::{Evaluation, ItemInput, QuizCard, SubjectStats};

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub token_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Subject row with its item count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubject {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_count: i64,
}

impl DbSubject {
    /// Convert to API subject type
    pub fn to_api_subject(&self) -> Subject {
        Subject {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            item_count: usize::try_from(self.item_count).unwrap_or(0),
        }
    }
}

/// Item joined with the requesting user's progress row (if any)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbItemWithProgress {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub term: String,
    pub definition: String,
    pub question: Option<String>,
    pub choices: Vec<String>,
    pub answer_index: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_result: Option<String>,
    pub times_seen: Option<i32>,
    pub easy_count: Option<i32>,
    pub medium_count: Option<i32>,
    pub hard_count: Option<i32>,
    pub next_due: Option<DateTime<Utc>>,
}

impl DbItemWithProgress {
    /// Convert to study-core ItemWithProgress. A missing progress row reads as all zero/null.
    pub fn to_core_item(&self) -> ItemWithProgress {
        ItemWithProgress {
            item: StudyItem {
                id: self.id,
                subject_id: self.subject_id,
                term: self.term.clone(),
                definition: self.definition.clone(),
                question: self.question.clone(),
                choices: self.choices.clone(),
                answer_index: self.answer_index.and_then(|i| u32::try_from(i).ok()),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            progress: StudyItemProgress {
                last_seen: self.last_seen,
                last_result: self.last_result.as_deref().and_then(|r| r.parse().ok()),
                times_seen: count(self.times_seen),
                easy_count: count(self.easy_count),
                medium_count: count(self.medium_count),
                hard_count: count(self.hard_count),
                next_due: self.next_due,
            },
        }
    }
}

/// Progress row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbItemProgress {
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_result: Option<String>,
    pub times_seen: i32,
    pub easy_count: i32,
    pub medium_count: i32,
    pub hard_count: i32,
    pub next_due: Option<DateTime<Utc>>,
}

impl DbItemProgress {
    /// Create from study-core StudyItemProgress.
    /// Counters above `i32::MAX` do not fit their columns and are rejected.
    pub fn from_core_progress(
        item_id: Uuid,
        user_id: Uuid,
        progress: &StudyItemProgress,
    ) -> Result<Self> {
        Ok(Self {
            item_id,
            user_id,
            last_seen: progress.last_seen,
            last_result: progress.last_result.map(|r| r.as_str().to_string()),
            times_seen: column("timesSeen", progress.times_seen)?,
            easy_count: column("easyCount", progress.easy_count)?,
            medium_count: column("mediumCount", progress.medium_count)?,
            hard_count: column("hardCount", progress.hard_count)?,
            next_due: progress.next_due,
        })
    }

    /// Convert to study-core StudyItemProgress
    pub fn to_core_progress(&self) -> StudyItemProgress {
        StudyItemProgress {
            last_seen: self.last_seen,
            last_result: self.last_result.as_deref().and_then(|r| r.parse().ok()),
            times_seen: count(Some(self.times_seen)),
            easy_count: count(Some(self.easy_count)),
            medium_count: count(Some(self.medium_count)),
            hard_count: count(Some(self.hard_count)),
            next_due: self.next_due,
        }
    }
}

fn count(value: Option<i32>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

fn column(field: &str, value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| ApiError::BadRequest(format!("{} is out of range: {}", field, value)))
}

// === API Request/Response Types ===

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// Subject types
#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectListResponse {
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSubjectResponse {
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectDetailResponse {
    #[serde(flatten)]
    pub detail: SubjectDetail,
    pub stats: SubjectStats,
}

// Item types

/// Item body, accepted either bare or wrapped as `{ "item": { ... } }`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemPayload {
    Wrapped { item: ItemInput },
    Bare(ItemInput),
}

impl ItemPayload {
    pub fn into_input(self) -> ItemInput {
        match self {
            ItemPayload::Wrapped { item } => item,
            ItemPayload::Bare(item) => item,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: ItemWithProgress,
}

// Progress types
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    pub item_id: Uuid,
    pub stats_patch: ProgressPatch,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextItemResponse {
    pub item: Option<ItemWithProgress>,
    pub due_count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuizResponse {
    pub card: Option<QuizCard>,
    pub item: Option<ItemWithProgress>,
    pub due_count: usize,
    pub total: usize,
}

/// Grade as submitted; parsed into `EvaluationLevel` by the handler.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub item_id: Uuid,
    pub grade: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswerRequest {
    pub item_id: Uuid,
    pub correct: bool,
}
