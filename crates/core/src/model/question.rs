use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("option text cannot be empty")]
    EmptyOption,

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("points must be > 0")]
    InvalidPoints,

    #[error("a {kind:?} question takes a single answer value")]
    ExpectedSingleAnswer { kind: QuestionKind },

    #[error("a multiple-choice question takes a set of answer values")]
    ExpectedAnswerSet,

    #[error("answer set cannot be empty")]
    EmptyAnswerSet,

    #[error("duplicate answer value: {0}")]
    DuplicateAnswerValue(String),

    #[error("answer value is not one of the options: {0}")]
    UnknownAnswerValue(String),
}

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// The three question forms an exam can contain.
///
/// The variants also fix the grouping order of a generated paper:
/// true/false questions first, then single choice, then multiple choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    Single,
    Multiple,
}

impl QuestionKind {
    /// All kinds, in presentation rank order.
    pub const ALL: [QuestionKind; 3] = [Self::Boolean, Self::Single, Self::Multiple];

    /// Sort rank used to group a generated paper by kind.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Boolean => 1,
            Self::Single => 2,
            Self::Multiple => 3,
        }
    }

    /// Returns true when an answer is a set of values rather than one.
    #[must_use]
    pub fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

//
// ─── ANSWER KEY ────────────────────────────────────────────────────────────────
//

/// Canonical correct answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    /// Single correct value (boolean and single-choice questions).
    One(String),
    /// Correct values for a multiple-choice question. Order is display
    /// order; grading compares as a set.
    Many(Vec<String>),
}

impl AnswerKey {
    /// The key's values, one or many.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Returns true when `option` is part of the key.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.values().iter().any(|value| value == option)
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: AnswerKey,
    pub points: u32,
}

impl QuestionDraft {
    /// Validate the draft into a well-formed question.
    ///
    /// # Errors
    ///
    /// Returns a `QuestionError` when the prompt is blank, options are
    /// missing/blank/duplicated, points are zero, the answer arity does
    /// not match the kind, or an answer value is not among the options.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions(self.options.len()));
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption);
            }
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if self.points == 0 {
            return Err(QuestionError::InvalidPoints);
        }

        match (&self.kind, &self.answer) {
            (QuestionKind::Multiple, AnswerKey::One(_)) => {
                return Err(QuestionError::ExpectedAnswerSet);
            }
            (QuestionKind::Boolean | QuestionKind::Single, AnswerKey::Many(_)) => {
                return Err(QuestionError::ExpectedSingleAnswer { kind: self.kind });
            }
            _ => {}
        }
        if let AnswerKey::Many(values) = &self.answer {
            if values.is_empty() {
                return Err(QuestionError::EmptyAnswerSet);
            }
            let mut seen = HashSet::new();
            for value in values {
                if !seen.insert(value.as_str()) {
                    return Err(QuestionError::DuplicateAnswerValue(value.clone()));
                }
            }
        }
        for value in self.answer.values() {
            if !self.options.iter().any(|option| option == value) {
                return Err(QuestionError::UnknownAnswerValue(value.clone()));
            }
        }

        Ok(ValidatedQuestion {
            kind: self.kind,
            prompt: self.prompt,
            options: self.options,
            answer: self.answer,
            points: self.points,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    answer: AnswerKey,
    points: u32,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            kind: self.kind,
            prompt: self.prompt,
            options: self.options,
            answer: self.answer,
            points: self.points,
        }
    }
}

/// Immutable catalog entry.
///
/// Invariant (enforced by the draft pipeline): every answer value
/// references one of the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    answer: AnswerKey,
    points: u32,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &AnswerKey {
        &self.answer
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn single_draft() -> QuestionDraft {
        QuestionDraft {
            kind: QuestionKind::Single,
            prompt: "Pick one".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            answer: AnswerKey::One("b".into()),
            points: 2,
        }
    }

    #[test]
    fn draft_validates_and_assigns_id() {
        let question = single_draft().validate().unwrap().assign_id(QuestionId::new(7));

        assert_eq!(question.id(), QuestionId::new(7));
        assert_eq!(question.kind(), QuestionKind::Single);
        assert_eq!(question.prompt(), "Pick one");
        assert_eq!(question.points(), 2);
        assert!(question.answer().contains("b"));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let mut draft = single_draft();
        draft.prompt = "   ".into();
        assert_eq!(draft.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn duplicate_options_are_rejected() {
        let mut draft = single_draft();
        draft.options = vec!["a".into(), "a".into()];
        draft.answer = AnswerKey::One("a".into());
        assert!(matches!(
            draft.validate().unwrap_err(),
            QuestionError::DuplicateOption(_)
        ));
    }

    #[test]
    fn answer_must_reference_an_option() {
        let mut draft = single_draft();
        draft.answer = AnswerKey::One("z".into());
        assert!(matches!(
            draft.validate().unwrap_err(),
            QuestionError::UnknownAnswerValue(_)
        ));
    }

    #[test]
    fn answer_arity_must_match_kind() {
        let mut draft = single_draft();
        draft.answer = AnswerKey::Many(vec!["a".into(), "b".into()]);
        assert!(matches!(
            draft.validate().unwrap_err(),
            QuestionError::ExpectedSingleAnswer { .. }
        ));

        let mut draft = single_draft();
        draft.kind = QuestionKind::Multiple;
        draft.answer = AnswerKey::One("a".into());
        assert_eq!(draft.validate().unwrap_err(), QuestionError::ExpectedAnswerSet);
    }

    #[test]
    fn multiple_answer_set_cannot_be_empty() {
        let mut draft = single_draft();
        draft.kind = QuestionKind::Multiple;
        draft.answer = AnswerKey::Many(Vec::new());
        assert_eq!(draft.validate().unwrap_err(), QuestionError::EmptyAnswerSet);
    }

    #[test]
    fn zero_points_are_rejected() {
        let mut draft = single_draft();
        draft.points = 0;
        assert_eq!(draft.validate().unwrap_err(), QuestionError::InvalidPoints);
    }

    #[test]
    fn kind_rank_orders_boolean_single_multiple() {
        assert!(QuestionKind::Boolean.rank() < QuestionKind::Single.rank());
        assert!(QuestionKind::Single.rank() < QuestionKind::Multiple.rank());
    }
}
