//! Aggregate review statistics for a subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ItemWithProgress;

/// Totals across every item of a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub item_count: usize,
    pub due_now: usize,
    pub seen: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub easy_percent: u32,
    pub medium_percent: u32,
    pub hard_percent: u32,
    pub last_studied: Option<DateTime<Utc>>,
}

impl SubjectStats {
    pub fn from_items(items: &[ItemWithProgress], now: DateTime<Utc>) -> Self {
        let mut stats = items.iter().fold(Self::default(), |mut acc, item| {
            let progress = &item.progress;
            acc.item_count += 1;
            acc.seen += u64::from(progress.times_seen);
            acc.easy += u64::from(progress.easy_count);
            acc.medium += u64::from(progress.medium_count);
            acc.hard += u64::from(progress.hard_count);
            if progress.is_due(now) {
                acc.due_now += 1;
            }
            acc.last_studied = acc.last_studied.max(progress.last_seen);
            acc
        });

        stats.easy_percent = percent(stats.easy, stats.seen);
        stats.medium_percent = percent(stats.medium, stats.seen);
        stats.hard_percent = percent(stats.hard, stats.seen);
        stats
    }
}

/// `part / total` as a whole percentage, rounded half up. Zero when `total` is zero.
pub fn percent(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EvaluationLevel, StudyItem, StudyItemProgress};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn item(progress: StudyItemProgress) -> ItemWithProgress {
        ItemWithProgress::new(
            StudyItem {
                id: Uuid::new_v4(),
                subject_id: Uuid::nil(),
                term: "t".to_string(),
                definition: "d".to_string(),
                question: None,
                choices: Vec::new(),
                answer_index: None,
                created_at: at(0),
                updated_at: at(0),
            },
            progress,
        )
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn empty_subject_has_zero_stats() {
        assert_eq!(SubjectStats::from_items(&[], at(0)), SubjectStats::default());
    }

    #[test]
    fn aggregates_counts_and_latest_review() {
        let items = vec![
            item(StudyItemProgress {
                last_seen: Some(at(2_000)),
                last_result: Some(EvaluationLevel::Easy),
                times_seen: 3,
                easy_count: 2,
                medium_count: 0,
                hard_count: 1,
                next_due: Some(at(3_602_000)),
            }),
            item(StudyItemProgress {
                last_seen: Some(at(5_000)),
                last_result: Some(EvaluationLevel::Hard),
                times_seen: 1,
                easy_count: 0,
                medium_count: 0,
                hard_count: 1,
                next_due: Some(at(65_000)),
            }),
            item(StudyItemProgress::default()),
        ];

        let stats = SubjectStats::from_items(&items, at(100_000));

        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.seen, 4);
        assert_eq!(stats.easy, 2);
        assert_eq!(stats.hard, 2);
        assert_eq!(stats.easy_percent, 50);
        assert_eq!(stats.hard_percent, 50);
        assert_eq!(stats.medium_percent, 0);
        assert_eq!(stats.due_now, 2);
        assert_eq!(stats.last_studied, Some(at(5_000)));
    }
}
