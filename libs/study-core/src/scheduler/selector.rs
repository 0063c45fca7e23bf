//! Picks the next item to present.
//!
//! Items that are due (`next_due <= now`, never-reviewed items counting as
//! due at the Unix epoch) are drawn uniformly at random so the presentation
//! order cannot be memorized. When nothing is due, the item that becomes due
//! soonest is returned instead.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::types::ItemWithProgress;

/// Select the item to study next, or `None` for an empty collection.
pub fn select_next<'a, R: Rng + ?Sized>(
    items: &'a [ItemWithProgress],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a ItemWithProgress> {
    if items.is_empty() {
        return None;
    }

    let due: Vec<&ItemWithProgress> = items
        .iter()
        .filter(|item| item.progress.is_due(now))
        .collect();

    if !due.is_empty() {
        let index = rng.random_range(0..due.len());
        return Some(due[index]);
    }

    earliest_due(items)
}

/// Number of items eligible for review at `now`.
pub fn due_count(items: &[ItemWithProgress], now: DateTime<Utc>) -> usize {
    items.iter().filter(|item| item.progress.is_due(now)).count()
}

/// Item with the smallest `next_due`. Missing due dates sort last; ties keep the first item.
fn earliest_due(items: &[ItemWithProgress]) -> Option<&ItemWithProgress> {
    items.iter().fold(None, |earliest, item| match earliest {
        None => Some(item),
        Some(current) if due_before(item.progress.next_due, current.progress.next_due) => {
            Some(item)
        }
        keep => keep,
    })
}

fn due_before(candidate: Option<DateTime<Utc>>, current: Option<DateTime<Utc>>) -> bool {
    match (candidate, current) {
        (Some(candidate), Some(current)) => candidate < current,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
