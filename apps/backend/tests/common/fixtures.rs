//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Create a subject request body.
pub fn create_subject_request(name: &str) -> serde_json::Value {
    json!({ "name": name })
}

/// Create a plain term/definition item body.
pub fn item_request(term: &str, definition: &str) -> serde_json::Value {
    json!({
        "item": {
            "term": term,
            "definition": definition,
        }
    })
}

/// Create an item body carrying its own multiple-choice answers.
pub fn item_with_choices_request(
    term: &str,
    definition: &str,
    question: &str,
    choices: &[&str],
    answer_index: u32,
) -> serde_json::Value {
    json!({
        "item": {
            "term": term,
            "definition": definition,
            "question": question,
            "choices": choices,
            "answerIndex": answer_index,
        }
    })
}

/// Create a review request body.
pub fn review_request(item_id: Uuid, grade: &str) -> serde_json::Value {
    json!({ "itemId": item_id, "grade": grade })
}

/// Create a quiz answer request body.
pub fn quiz_answer_request(item_id: Uuid, correct: bool) -> serde_json::Value {
    json!({ "itemId": item_id, "correct": correct })
}

/// Create a save progress request body.
pub fn save_progress_request(item_id: Uuid, stats_patch: serde_json::Value) -> serde_json::Value {
    json!({ "itemId": item_id, "statsPatch": stats_patch })
}

/// Generate a unique subject name to avoid slug collisions.
pub fn unique_subject_name(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}
