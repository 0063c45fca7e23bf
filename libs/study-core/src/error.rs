//! Error types for study-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Grade string outside `easy`, `medium`, `hard`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown evaluation level: {0}")]
pub struct UnknownEvaluationLevel(pub String);

/// Errors raised while validating user-supplied subject and item content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Subject name is required")]
    SubjectNameRequired,

    #[error("Subject name is too long")]
    SubjectNameTooLong,

    #[error("Subject name must contain letters or digits")]
    EmptySlug,

    #[error("Term is required")]
    TermRequired,

    #[error("Term is too long")]
    TermTooLong,

    #[error("Definition is required")]
    DefinitionRequired,

    #[error("Definition is too long")]
    DefinitionTooLong,

    #[error("Question is too long")]
    QuestionTooLong,

    #[error("At most {max} choices are allowed")]
    TooManyChoices { max: usize },

    #[error("Choices cannot be empty")]
    EmptyChoice,

    #[error("Choice is too long")]
    ChoiceTooLong,

    #[error("Answer index {index} is out of range")]
    AnswerIndexOutOfRange { index: u32 },
}
