//! Applies a grade to an item's progress.
//!
//! Three fixed buckets, no interval growth:
//!
//! | grade  | next due  | queue offset |
//! |--------|-----------|--------------|
//! | hard   | +1 min    | 2..=4        |
//! | medium | +15 min   | 6..=10       |
//! | easy   | +60 min   | 12..=20      |

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::Evaluation;
use crate::types::{EvaluationLevel, ItemWithProgress};

impl EvaluationLevel {
    /// Time until the item becomes due again.
    pub fn review_delay(self) -> Duration {
        match self {
            Self::Hard => Duration::minutes(1),
            Self::Medium => Duration::minutes(15),
            Self::Easy => Duration::minutes(60),
        }
    }

    /// Inclusive bounds for the advisory queue offset.
    pub fn queue_offset_range(self) -> RangeInclusive<u32> {
        match self {
            Self::Hard => 2..=4,
            Self::Medium => 6..=10,
            Self::Easy => 12..=20,
        }
    }
}

/// Record a review of `item` graded `grade` at `now`.
///
/// Returns a new progress record; `item` is left untouched. `next_due` is
/// strictly after `now` unless `now` is within one delay of `DateTime::MAX_UTC`,
/// where it is clamped to that maximum.
pub fn apply_evaluation<R: Rng + ?Sized>(
    item: &ItemWithProgress,
    grade: EvaluationLevel,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Evaluation {
    let mut progress = item.progress.clone();

    progress.last_seen = Some(now);
    progress.last_result = Some(grade);
    progress.times_seen = progress.times_seen.saturating_add(1);

    let bucket = match grade {
        EvaluationLevel::Easy => &mut progress.easy_count,
        EvaluationLevel::Medium => &mut progress.medium_count,
        EvaluationLevel::Hard => &mut progress.hard_count,
    };
    *bucket = bucket.saturating_add(1);

    // Saturates at the largest representable instant.
    let next_due = now
        .checked_add_signed(grade.review_delay())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    progress.next_due = Some(next_due);

    Evaluation {
        progress,
        queue_offset: rng.random_range(grade.queue_offset_range()),
    }
}
