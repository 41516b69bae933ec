use std::collections::BTreeSet;

use crate::model::question::QuestionKind;

/// Stored answer state for one question position.
///
/// Invariant: `Choices` is never empty; removing the last value of a
/// multiple-choice selection collapses the slot back to `Unanswered`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    /// Chosen value for a boolean or single-choice question.
    Choice(String),
    /// Chosen values for a multiple-choice question.
    Choices(BTreeSet<String>),
}

impl AnswerSlot {
    #[must_use]
    pub fn is_answered(&self) -> bool {
        !matches!(self, Self::Unanswered)
    }

    /// Returns true when `option` is currently chosen.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        match self {
            Self::Unanswered => false,
            Self::Choice(value) => value == option,
            Self::Choices(values) => values.contains(option),
        }
    }

    /// Apply one selection event.
    ///
    /// Boolean/single: selecting an option replaces any prior choice;
    /// deselecting clears the slot. Multiple: each value toggles
    /// independently of the others.
    pub fn apply(&mut self, kind: QuestionKind, option: &str, selected: bool) {
        if kind.is_multiple() {
            let mut values = match std::mem::take(self) {
                Self::Choices(values) => values,
                Self::Choice(value) => BTreeSet::from([value]),
                Self::Unanswered => BTreeSet::new(),
            };
            if selected {
                values.insert(option.to_owned());
            } else {
                values.remove(option);
            }
            *self = if values.is_empty() {
                Self::Unanswered
            } else {
                Self::Choices(values)
            };
        } else if selected {
            *self = Self::Choice(option.to_owned());
        } else {
            *self = Self::Unanswered;
        }
    }
}
