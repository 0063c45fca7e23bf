//! Core types for subjects, study items and their review progress.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::UnknownEvaluationLevel;

/// Self-reported recall difficulty for a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationLevel {
    Easy,
    Medium,
    Hard,
}

impl EvaluationLevel {
    pub const ALL: [EvaluationLevel; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Wire and database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Map a quiz answer onto a grade.
    /// Correct -> Easy, wrong -> Hard
    pub fn from_quiz_answer(correct: bool) -> Self {
        if correct { Self::Easy } else { Self::Hard }
    }
}

impl fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationLevel {
    type Err = UnknownEvaluationLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(UnknownEvaluationLevel(other.to_string())),
        }
    }
}

/// Subject summary as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_count: usize,
}

/// Term/definition content of an item. Immutable from the scheduler's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyItem {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub term: String,
    pub definition: String,
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    pub answer_index: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudyItem {
    /// True when the item carries its own multiple-choice answers.
    pub fn has_choices(&self) -> bool {
        self.choices.len() >= 2 && self.answer_index.is_some()
    }
}

/// Per-(item, user) review state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyItemProgress {
    pub last_seen: Option<DateTime<Utc>>,
    pub last_result: Option<EvaluationLevel>,
    pub times_seen: u32,
    pub easy_count: u32,
    pub medium_count: u32,
    pub hard_count: u32,
    pub next_due: Option<DateTime<Utc>>,
}

impl StudyItemProgress {
    /// Whether the item may be presented at `now`.
    ///
    /// A never-reviewed item counts as due at the Unix epoch.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        let due = self.next_due.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        due <= now
    }
}

/// A study item paired with the current user's progress on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemWithProgress {
    #[serde(flatten)]
    pub item: StudyItem,
    #[serde(default)]
    pub progress: StudyItemProgress,
}

impl ItemWithProgress {
    pub fn new(item: StudyItem, progress: StudyItemProgress) -> Self {
        Self { item, progress }
    }

    pub fn id(&self) -> Uuid {
        self.item.id
    }
}

/// A subject together with every item it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub items: Vec<ItemWithProgress>,
}

/// Partial progress update handed to persistence.
///
/// Absent fields are left untouched. For the nullable fields, `Some(None)`
/// is an explicit null that overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPatch {
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_result: Option<Option<EvaluationLevel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times_seen: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easy_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_count: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_due: Option<Option<DateTime<Utc>>>,
}

impl ProgressPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.last_seen.is_none()
            && self.last_result.is_none()
            && self.times_seen.is_none()
            && self.easy_count.is_none()
            && self.medium_count.is_none()
            && self.hard_count.is_none()
            && self.next_due.is_none()
    }

    /// Merge present fields into `progress`.
    pub fn apply_to(&self, progress: &mut StudyItemProgress) {
        if let Some(last_seen) = self.last_seen {
            progress.last_seen = last_seen;
        }
        if let Some(last_result) = self.last_result {
            progress.last_result = last_result;
        }
        if let Some(times_seen) = self.times_seen {
            progress.times_seen = times_seen;
        }
        if let Some(easy_count) = self.easy_count {
            progress.easy_count = easy_count;
        }
        if let Some(medium_count) = self.medium_count {
            progress.medium_count = medium_count;
        }
        if let Some(hard_count) = self.hard_count {
            progress.hard_count = hard_count;
        }
        if let Some(next_due) = self.next_due {
            progress.next_due = next_due;
        }
    }
}

impl From<&StudyItemProgress> for ProgressPatch {
    fn from(progress: &StudyItemProgress) -> Self {
        Self {
            last_seen: Some(progress.last_seen),
            last_result: Some(progress.last_result),
            times_seen: Some(progress.times_seen),
            easy_count: Some(progress.easy_count),
            medium_count: Some(progress.medium_count),
            hard_count: Some(progress.hard_count),
            next_due: Some(progress.next_due),
        }
    }
}

// A present key (even `null`) becomes `Some(..)`; a missing key falls back to `default`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
