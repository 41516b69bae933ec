use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("duplicate question id: {0:?}")]
    DuplicateId(QuestionId),
}

/// Immutable catalog of questions, tagged by kind.
///
/// The bank is preloaded static data; sessions sample from it and never
/// write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::DuplicateId` when two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// All questions of the given kind, in catalog order.
    #[must_use]
    pub fn of_kind(&self, kind: QuestionKind) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.kind() == kind)
            .collect()
    }

    #[must_use]
    pub fn count_of_kind(&self, kind: QuestionKind) -> usize {
        self.questions
            .iter()
            .filter(|question| question.kind() == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::{AnswerKey, QuestionDraft};

    fn boolean_question(id: u64) -> Question {
        QuestionDraft {
            kind: QuestionKind::Boolean,
            prompt: format!("Statement {id} holds"),
            options: vec!["true".into(), "false".into()],
            answer: AnswerKey::One("true".into()),
            points: 1,
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(id))
    }

    #[test]
    fn bank_filters_by_kind() {
        let bank = QuestionBank::new(vec![boolean_question(1), boolean_question(2)]).unwrap();

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.count_of_kind(QuestionKind::Boolean), 2);
        assert_eq!(bank.count_of_kind(QuestionKind::Single), 0);
        assert!(bank.of_kind(QuestionKind::Multiple).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = QuestionBank::new(vec![boolean_question(1), boolean_question(1)]).unwrap_err();
        assert_eq!(err, BankError::DuplicateId(QuestionId::new(1)));
    }
}
