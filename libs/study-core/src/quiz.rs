//! Multiple-choice quiz cards.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ItemWithProgress;

/// Definitions borrowed from other items when an item has no choices of its own.
pub const MAX_DISTRACTORS: usize = 3;

/// A question ready to present, with the index of the correct choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCard {
    pub item_id: Uuid,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
}

fn default_prompt(term: &str) -> String {
    format!("What does “{term}” mean?")
}

/// Build a quiz card for `item`.
///
/// Items with their own choices use them verbatim. Otherwise the item's
/// definition is mixed with up to [`MAX_DISTRACTORS`] definitions of other
/// items from `pool`, in random order.
pub fn build_quiz_card<R: Rng + ?Sized>(
    item: &ItemWithProgress,
    pool: &[ItemWithProgress],
    rng: &mut R,
) -> QuizCard {
    let study_item = &item.item;

    let own_answer = study_item.answer_index.filter(|_| study_item.has_choices());
    if let Some(answer_index) = own_answer {
        return QuizCard {
            item_id: study_item.id,
            prompt: study_item
                .question
                .clone()
                .unwrap_or_else(|| default_prompt(&study_item.term)),
            choices: study_item.choices.clone(),
            answer_index: answer_index as usize,
        };
    }

    let mut alternatives: Vec<&str> = pool
        .iter()
        .filter(|other| other.id() != study_item.id)
        .map(|other| other.item.definition.as_str())
        .filter(|definition| !definition.is_empty())
        .collect();
    alternatives.shuffle(rng);
    alternatives.truncate(MAX_DISTRACTORS);

    let mut choices: Vec<String> = std::iter::once(study_item.definition.as_str())
        .chain(alternatives)
        .map(str::to_string)
        .collect();
    choices.shuffle(rng);

    let answer_index = choices
        .iter()
        .position(|choice| *choice == study_item.definition)
        .unwrap_or(0);

    QuizCard {
        item_id: study_item.id,
        prompt: default_prompt(&study_item.term),
        choices,
        answer_index,
    }
}
