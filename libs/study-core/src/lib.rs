//! Core study library shared by the backend service.
//!
//! Provides:
//! - Review scheduler (next-item selection and difficulty-bucket evaluation)
//! - Shared types (StudyItem, StudyItemProgress, EvaluationLevel, etc.)
//! - Input validation and slugs for subjects and items
//! - Quiz card construction and subject statistics

pub mod error;
pub mod quiz;
pub mod scheduler;
pub mod stats;
pub mod types;
pub mod validation;

pub use error::{Result, UnknownEvaluationLevel, ValidationError};
pub use quiz::{build_quiz_card, QuizCard};
pub use scheduler::{
    apply_evaluation, due_count, select_next, Clock, Evaluation, FixedClock, Scheduler,
    SystemClock,
};
pub use stats::{percent, SubjectStats};
pub use types::{
    EvaluationLevel, ItemWithProgress, ProgressPatch, StudyItem, StudyItemProgress, Subject,
    SubjectDetail,
};
pub use validation::{slugify, validate_subject_name, ItemInput};
