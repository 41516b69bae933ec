use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::QuestionKind;

/// Answer-card buttons per page before the presenter reports a
/// layout-derived capacity.
pub const DEFAULT_PAGE_CAPACITY: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("seconds per question must be > 0")]
    InvalidSecondsPerQuestion,
}

//
// ─── QUOTAS ────────────────────────────────────────────────────────────────────
//

/// Requested question counts per kind for one exam.
///
/// Quotas are requests, not guarantees: the sampler caps each at what
/// the bank holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamQuotas {
    pub boolean: u32,
    pub single: u32,
    pub multiple: u32,
}

impl ExamQuotas {
    #[must_use]
    pub fn new(boolean: u32, single: u32, multiple: u32) -> Self {
        Self {
            boolean,
            single,
            multiple,
        }
    }

    /// The stock 30/30/30 paper.
    #[must_use]
    pub fn default_mix() -> Self {
        Self::new(30, 30, 30)
    }

    #[must_use]
    pub fn of(&self, kind: QuestionKind) -> u32 {
        match kind {
            QuestionKind::Boolean => self.boolean,
            QuestionKind::Single => self.single,
            QuestionKind::Multiple => self.multiple,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.boolean
            .saturating_add(self.single)
            .saturating_add(self.multiple)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Exam-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSettings {
    seconds_per_question: u32,
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self {
            seconds_per_question: 10,
        }
    }
}

impl ExamSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSecondsPerQuestion` when the
    /// allowance is zero.
    pub fn new(seconds_per_question: u32) -> Result<Self, SettingsError> {
        if seconds_per_question == 0 {
            return Err(SettingsError::InvalidSecondsPerQuestion);
        }
        Ok(Self {
            seconds_per_question,
        })
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    /// Total countdown budget in seconds for a paper of `question_count`
    /// questions.
    #[must_use]
    pub fn time_budget(&self, question_count: usize) -> i64 {
        question_count as i64 * i64::from(self.seconds_per_question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotas_map_to_kinds() {
        let quotas = ExamQuotas::new(1, 2, 3);
        assert_eq!(quotas.of(QuestionKind::Boolean), 1);
        assert_eq!(quotas.of(QuestionKind::Single), 2);
        assert_eq!(quotas.of(QuestionKind::Multiple), 3);
        assert_eq!(quotas.total(), 6);
        assert!(!quotas.is_empty());
        assert!(ExamQuotas::new(0, 0, 0).is_empty());
        assert_eq!(ExamQuotas::default_mix().total(), 90);
    }

    #[test]
    fn time_budget_scales_with_question_count() {
        let settings = ExamSettings::default();
        assert_eq!(settings.seconds_per_question(), 10);
        assert_eq!(settings.time_budget(2), 20);
        assert_eq!(settings.time_budget(0), 0);
    }

    #[test]
    fn zero_allowance_is_rejected() {
        assert_eq!(
            ExamSettings::new(0).unwrap_err(),
            SettingsError::InvalidSecondsPerQuestion
        );
        assert_eq!(ExamSettings::new(90).unwrap().seconds_per_question(), 90);
    }
}
