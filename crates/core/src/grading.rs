//! Exam grading.
//!
//! Pure and idempotent: grading the same paper and slots twice yields
//! identical reports. A report is built once at submission time and is
//! read-only afterwards.

use crate::model::{AnswerKey, AnswerSlot, Question};

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Per-question grading outcome.
///
/// `correct_answer` is populated only for incorrect entries, so the
/// presenter can show the key exactly where it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFeedback {
    pub index: usize,
    pub correct: bool,
    pub correct_answer: Option<AnswerKey>,
}

/// Aggregate result of grading one exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamReport {
    score: u32,
    possible: u32,
    correct_count: usize,
    feedback: Vec<QuestionFeedback>,
}

impl ExamReport {
    /// Points earned.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Points the paper was worth.
    #[must_use]
    pub fn possible(&self) -> u32 {
        self.possible
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// One entry per question, in paper order.
    #[must_use]
    pub fn feedback(&self) -> &[QuestionFeedback] {
        &self.feedback
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.feedback.len()
    }

    /// Indexes of the questions answered incorrectly, in paper order.
    #[must_use]
    pub fn incorrect_indices(&self) -> Vec<usize> {
        self.feedback
            .iter()
            .filter(|entry| !entry.correct)
            .map(|entry| entry.index)
            .collect()
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.feedback.len()
    }
}

//
// ─── GRADING ───────────────────────────────────────────────────────────────────
//

/// Grade a paper against its answer slots.
///
/// Multiple-choice questions score correct only on exact set equality
/// with the key (no partial credit); boolean and single-choice require
/// exact value equality. An unanswered slot is always incorrect.
/// `slots` is read positionally; a missing slot counts as unanswered.
#[must_use]
pub fn grade(questions: &[Question], slots: &[AnswerSlot]) -> ExamReport {
    let mut score = 0_u32;
    let mut possible = 0_u32;
    let mut correct_count = 0_usize;
    let mut feedback = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        possible = possible.saturating_add(question.points());

        let correct = match slots.get(index) {
            Some(slot) => slot_matches(slot, question.answer()),
            None => false,
        };

        if correct {
            score = score.saturating_add(question.points());
            correct_count += 1;
            feedback.push(QuestionFeedback {
                index,
                correct: true,
                correct_answer: None,
            });
        } else {
            feedback.push(QuestionFeedback {
                index,
                correct: false,
                correct_answer: Some(question.answer().clone()),
            });
        }
    }

    ExamReport {
        score,
        possible,
        correct_count,
        feedback,
    }
}

fn slot_matches(slot: &AnswerSlot, key: &AnswerKey) -> bool {
    match (slot, key) {
        (AnswerSlot::Choice(value), AnswerKey::One(expected)) => value == expected,
        (AnswerSlot::Choices(values), AnswerKey::Many(expected)) => {
            // Key values are validated unique, so a length check plus
            // membership is full set equality.
            values.len() == expected.len() && expected.iter().all(|value| values.contains(value))
        }
        _ => false,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionId, QuestionKind};

    fn question(id: u64, kind: QuestionKind, answer: AnswerKey, points: u32) -> Question {
        QuestionDraft {
            kind,
            prompt: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            answer,
            points,
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(id))
    }

    fn multi_slot(values: &[&str]) -> AnswerSlot {
        let mut slot = AnswerSlot::default();
        for value in values {
            slot.apply(QuestionKind::Multiple, value, true);
        }
        slot
    }

    #[test]
    fn exact_match_scores_single_choice() {
        let questions = vec![
            question(1, QuestionKind::Single, AnswerKey::One("a".into()), 2),
            question(2, QuestionKind::Single, AnswerKey::One("b".into()), 3),
        ];
        let slots = vec![
            AnswerSlot::Choice("a".into()),
            AnswerSlot::Choice("c".into()),
        ];

        let report = grade(&questions, &slots);

        assert_eq!(report.score(), 2);
        assert_eq!(report.possible(), 5);
        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.incorrect_indices(), vec![1]);
        assert!(report.feedback()[0].correct_answer.is_none());
        assert_eq!(
            report.feedback()[1].correct_answer,
            Some(AnswerKey::One("b".into()))
        );
    }

    #[test]
    fn multiple_choice_requires_set_equality() {
        let key = AnswerKey::Many(vec!["c".into(), "a".into()]);
        let questions = vec![question(1, QuestionKind::Multiple, key, 4)];

        // Same members in a different pick order: correct.
        let report = grade(&questions, &[multi_slot(&["a", "c"])]);
        assert!(report.is_perfect());

        // Strict subset: incorrect, no partial credit.
        let report = grade(&questions, &[multi_slot(&["a"])]);
        assert_eq!(report.score(), 0);

        // Superset: incorrect.
        let report = grade(&questions, &[multi_slot(&["a", "b", "c"])]);
        assert_eq!(report.score(), 0);
    }

    #[test]
    fn unanswered_is_always_incorrect() {
        let questions = vec![
            question(1, QuestionKind::Single, AnswerKey::One("a".into()), 1),
            question(
                2,
                QuestionKind::Multiple,
                AnswerKey::Many(vec!["a".into(), "b".into()]),
                1,
            ),
        ];
        let slots = vec![AnswerSlot::Unanswered, AnswerSlot::Unanswered];

        let report = grade(&questions, &slots);

        assert_eq!(report.score(), 0);
        assert_eq!(report.correct_count(), 0);
        assert_eq!(report.incorrect_indices(), vec![0, 1]);
    }

    #[test]
    fn missing_slots_count_as_unanswered() {
        let questions = vec![question(1, QuestionKind::Single, AnswerKey::One("a".into()), 1)];
        let report = grade(&questions, &[]);
        assert_eq!(report.correct_count(), 0);
        assert_eq!(report.possible(), 1);
    }

    #[test]
    fn grading_is_idempotent() {
        let questions = vec![
            question(1, QuestionKind::Boolean, AnswerKey::One("a".into()), 1),
            question(
                2,
                QuestionKind::Multiple,
                AnswerKey::Many(vec!["b".into(), "c".into()]),
                2,
            ),
        ];
        let slots = vec![AnswerSlot::Choice("a".into()), multi_slot(&["b", "c"])];

        let first = grade(&questions, &slots);
        let second = grade(&questions, &slots);

        assert_eq!(first, second);
        assert!(first.is_perfect());
        assert_eq!(first.score(), 3);
    }
}
