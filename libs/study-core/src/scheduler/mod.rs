//! Review scheduler: which item to show next and when it comes back.

pub mod clock;
pub mod evaluator;
pub mod selector;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{EvaluationLevel, ItemWithProgress, ProgressPatch, StudyItemProgress};

pub use clock::{Clock, FixedClock, SystemClock};
pub use evaluator::apply_evaluation;
pub use selector::{due_count, select_next};

/// Result of grading an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub progress: StudyItemProgress,
    /// How many items ahead the item should reappear in a linear queue.
    /// Advisory only, never persisted.
    pub queue_offset: u32,
}

impl Evaluation {
    /// Patch that overwrites every stored progress field.
    pub fn to_patch(&self) -> ProgressPatch {
        ProgressPatch::from(&self.progress)
    }
}

/// Scheduler bound to a clock, for callers that do not track `now` themselves.
#[derive(Clone)]
pub struct Scheduler {
    clock: Arc<dyn Clock>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.clock.now())
            .finish()
    }
}

impl Scheduler {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// See [`select_next`].
    pub fn next<'a, R: Rng + ?Sized>(
        &self,
        items: &'a [ItemWithProgress],
        rng: &mut R,
    ) -> Option<&'a ItemWithProgress> {
        select_next(items, self.now(), rng)
    }

    /// See [`apply_evaluation`].
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        item: &ItemWithProgress,
        grade: EvaluationLevel,
        rng: &mut R,
    ) -> Evaluation {
        apply_evaluation(item, grade, self.now(), rng)
    }
}
