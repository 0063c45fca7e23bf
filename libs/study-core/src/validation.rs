//! Input validation for subjects and items.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

pub const SUBJECT_NAME_MAX: usize = 120;
pub const TERM_MAX: usize = 200;
pub const DEFINITION_MAX: usize = 1000;
pub const QUESTION_MAX: usize = 400;
pub const CHOICE_MAX: usize = 200;
pub const MAX_CHOICES: usize = 10;

/// Validate a subject name and return it trimmed.
pub fn validate_subject_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::SubjectNameRequired);
    }
    if name.chars().count() > SUBJECT_NAME_MAX {
        return Err(ValidationError::SubjectNameTooLong);
    }
    if slugify(name).is_empty() {
        return Err(ValidationError::EmptySlug);
    }
    Ok(name.to_string())
}

/// URL-safe identifier derived from a subject name.
///
/// Lowercases, keeps `[a-z0-9]`, whitespace and `-`, then joins words with single dashes.
pub fn slugify(value: &str) -> String {
    let filtered: String = value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(filtered.len());
    for c in filtered.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// Item content as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub answer_index: Option<u32>,
}

impl ItemInput {
    /// Trim fields and drop choices that cannot form a multiple-choice question.
    ///
    /// Fewer than two non-empty choices clears both `choices` and `answer_index`;
    /// otherwise the answer index is clamped into range.
    pub fn normalize(self) -> Self {
        let choices: Vec<String> = self
            .choices
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let question = self
            .question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let (choices, answer_index) = if choices.len() >= 2 {
            let last = (choices.len() - 1) as u32;
            let answer_index = self.answer_index.map(|i| i.min(last));
            (choices, answer_index)
        } else {
            (Vec::new(), None)
        };

        Self {
            term: self.term.trim().to_string(),
            definition: self.definition.trim().to_string(),
            question,
            choices,
            answer_index,
        }
    }

    /// Check lengths and counts.
    pub fn validate(&self) -> Result<()> {
        check_length(
            &self.term,
            TERM_MAX,
            ValidationError::TermRequired,
            ValidationError::TermTooLong,
        )?;
        check_length(
            &self.definition,
            DEFINITION_MAX,
            ValidationError::DefinitionRequired,
            ValidationError::DefinitionTooLong,
        )?;

        if let Some(question) = &self.question {
            if question.chars().count() > QUESTION_MAX {
                return Err(ValidationError::QuestionTooLong);
            }
        }

        if self.choices.len() > MAX_CHOICES {
            return Err(ValidationError::TooManyChoices { max: MAX_CHOICES });
        }
        for choice in &self.choices {
            check_length(
                choice.trim(),
                CHOICE_MAX,
                ValidationError::EmptyChoice,
                ValidationError::ChoiceTooLong,
            )?;
        }

        if let Some(index) = self.answer_index {
            if index as usize >= MAX_CHOICES {
                return Err(ValidationError::AnswerIndexOutOfRange { index });
            }
        }

        Ok(())
    }

    /// Normalize then validate.
    pub fn into_valid(self) -> Result<Self> {
        let input = self.normalize();
        input.validate()?;
        Ok(input)
    }
}

fn check_length(
    value: &str,
    max: usize,
    empty: ValidationError,
    too_long: ValidationError,
) -> Result<()> {
    if value.is_empty() {
        return Err(empty);
    }
    if value.chars().count() > max {
        return Err(too_long);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(term: &str, definition: &str) -> ItemInput {
        ItemInput {
            term: term.to_string(),
            definition: definition.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Rust Ownership"), "rust-ownership");
        assert_eq!(slugify("  Spanish  Verbs  "), "spanish-verbs");
    }

    #[test]
    fn slugify_strips_punctuation_and_collapses_dashes() {
        assert_eq!(slugify("C++ & Friends!"), "c-friends");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("Über Café"), "ber-caf");
    }

    #[test]
    fn subject_name_rules() {
        assert_eq!(validate_subject_name("  Biology ").unwrap(), "Biology");
        assert_eq!(validate_subject_name("   "), Err(ValidationError::SubjectNameRequired));
        assert_eq!(
            validate_subject_name(&"x".repeat(SUBJECT_NAME_MAX + 1)),
            Err(ValidationError::SubjectNameTooLong)
        );
        assert_eq!(validate_subject_name("!!!"), Err(ValidationError::EmptySlug));
    }

    #[test]
    fn normalize_drops_choices_below_two() {
        let item = ItemInput {
            choices: vec!["only".to_string(), "   ".to_string()],
            answer_index: Some(0),
            ..input("term", "definition")
        }
        .normalize();

        assert!(item.choices.is_empty());
        assert_eq!(item.answer_index, None);
    }

    #[test]
    fn normalize_clamps_answer_index() {
        let item = ItemInput {
            choices: vec![" a ".to_string(), "b".to_string(), "".to_string(), "c".to_string()],
            answer_index: Some(8),
            ..input("term", "definition")
        }
        .normalize();

        assert_eq!(item.choices, vec!["a", "b", "c"]);
        assert_eq!(item.answer_index, Some(2));
    }

    #[test]
    fn normalize_blank_question_becomes_none() {
        let item = ItemInput {
            question: Some("   ".to_string()),
            ..input(" term ", " definition ")
        }
        .normalize();

        assert_eq!(item.question, None);
        assert_eq!(item.term, "term");
        assert_eq!(item.definition, "definition");
    }

    #[test]
    fn validate_requires_term_and_definition() {
        assert_eq!(input("", "d").validate(), Err(ValidationError::TermRequired));
        assert_eq!(input("t", "").validate(), Err(ValidationError::DefinitionRequired));
        assert!(input("t", "d").validate().is_ok());
    }

    #[test]
    fn validate_length_limits() {
        assert_eq!(
            input(&"t".repeat(TERM_MAX + 1), "d").validate(),
            Err(ValidationError::TermTooLong)
        );
        assert_eq!(
            input("t", &"d".repeat(DEFINITION_MAX + 1)).validate(),
            Err(ValidationError::DefinitionTooLong)
        );
        let long_question = ItemInput {
            question: Some("q".repeat(QUESTION_MAX + 1)),
            ..input("t", "d")
        };
        assert_eq!(long_question.validate(), Err(ValidationError::QuestionTooLong));
    }

    #[test]
    fn validate_choice_limits() {
        let too_many = ItemInput {
            choices: (0..11).map(|i| format!("choice {i}")).collect(),
            ..input("t", "d")
        };
        assert_eq!(
            too_many.validate(),
            Err(ValidationError::TooManyChoices { max: MAX_CHOICES })
        );

        let empty_choice = ItemInput {
            choices: vec!["a".to_string(), " ".to_string()],
            ..input("t", "d")
        };
        assert_eq!(empty_choice.validate(), Err(ValidationError::EmptyChoice));

        let bad_index = ItemInput {
            choices: vec!["a".to_string(), "b".to_string()],
            answer_index: Some(10),
            ..input("t", "d")
        };
        assert_eq!(
            bad_index.validate(),
            Err(ValidationError::AnswerIndexOutOfRange { index: 10 })
        );
    }

    #[test]
    fn into_valid_normalizes_first() {
        let item = ItemInput {
            choices: vec!["a".to_string(), "".to_string(), "b".to_string()],
            answer_index: Some(5),
            ..input(" t ", " d ")
        }
        .into_valid()
        .unwrap();

        assert_eq!(item.choices, vec!["a", "b"]);
        assert_eq!(item.answer_index, Some(1));
    }
}
