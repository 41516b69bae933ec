use rand::Rng;
use rand::SeedableRng;
use rand::rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use exam_core::model::{ExamQuotas, Question, QuestionBank, QuestionKind};

/// Non-fatal notice that a quota exceeded the bank's supply.
///
/// The draw is capped, never failed; the presenter decides how to
/// surface the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingWarning {
    pub kind: QuestionKind,
    pub requested: u32,
    pub available: usize,
}

/// Selection result for one exam instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamPlan {
    pub questions: Vec<Question>,
    pub warnings: Vec<SamplingWarning>,
}

impl ExamPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when nothing was selected; an empty paper is a
    /// valid terminal state, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn count_of_kind(&self, kind: QuestionKind) -> usize {
        self.questions
            .iter()
            .filter(|question| question.kind() == kind)
            .count()
    }
}

/// Draws an exam from the bank according to per-kind quotas.
///
/// Each kind is sampled uniformly without replacement, capped at what
/// the bank holds. The final paper is grouped boolean → single →
/// multiple; which subset was chosen and its order inside each group
/// stay random.
pub struct ExamBuilder<'a> {
    bank: &'a QuestionBank,
    seed: Option<u64>,
}

impl<'a> ExamBuilder<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank, seed: None }
    }

    /// Fix the RNG seed for a reproducible draw.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build an exam plan for the given quotas.
    #[must_use]
    pub fn build(self, quotas: &ExamQuotas) -> ExamPlan {
        match self.seed {
            Some(seed) => build_with(self.bank, quotas, &mut StdRng::seed_from_u64(seed)),
            None => build_with(self.bank, quotas, &mut rng()),
        }
    }
}

fn build_with(bank: &QuestionBank, quotas: &ExamQuotas, rng: &mut impl Rng) -> ExamPlan {
    let mut questions: Vec<Question> = Vec::new();
    let mut warnings = Vec::new();

    for kind in QuestionKind::ALL {
        let requested = quotas.of(kind);
        if requested == 0 {
            continue;
        }

        let mut pool: Vec<Question> = bank.of_kind(kind).into_iter().cloned().collect();
        let take = (requested as usize).min(pool.len());
        if requested as usize > pool.len() {
            warnings.push(SamplingWarning {
                kind,
                requested,
                available: pool.len(),
            });
        }
        pool.shuffle(rng);
        pool.truncate(take);
        questions.extend(pool);
    }

    // The per-kind draws already arrive in rank order; the stable sort
    // keeps intra-group order while pinning the grouping invariant.
    questions.sort_by_key(|question| question.kind().rank());

    ExamPlan {
        questions,
        warnings,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{AnswerKey, QuestionDraft, QuestionId};
    use std::collections::HashSet;

    fn question(id: u64, kind: QuestionKind) -> Question {
        let answer = if kind.is_multiple() {
            AnswerKey::Many(vec!["a".into(), "b".into()])
        } else {
            AnswerKey::One("a".into())
        };
        QuestionDraft {
            kind,
            prompt: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            answer,
            points: 1,
        }
        .validate()
        .unwrap()
        .assign_id(QuestionId::new(id))
    }

    fn mixed_bank() -> QuestionBank {
        let mut questions = Vec::new();
        for id in 1..=5 {
            questions.push(question(id, QuestionKind::Boolean));
        }
        for id in 6..=9 {
            questions.push(question(id, QuestionKind::Single));
        }
        for id in 10..=12 {
            questions.push(question(id, QuestionKind::Multiple));
        }
        QuestionBank::new(questions).unwrap()
    }

    #[test]
    fn draw_is_capped_at_availability() {
        let bank = mixed_bank();
        let plan = ExamBuilder::new(&bank)
            .with_seed(1)
            .build(&ExamQuotas::new(3, 99, 0));

        assert_eq!(plan.count_of_kind(QuestionKind::Boolean), 3);
        assert_eq!(plan.count_of_kind(QuestionKind::Single), 4);
        assert_eq!(plan.count_of_kind(QuestionKind::Multiple), 0);

        // Warn exactly for the over-asked kind.
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(
            plan.warnings[0],
            SamplingWarning {
                kind: QuestionKind::Single,
                requested: 99,
                available: 4,
            }
        );
    }

    #[test]
    fn paper_is_grouped_by_kind_rank() {
        let bank = mixed_bank();
        let plan = ExamBuilder::new(&bank)
            .with_seed(2)
            .build(&ExamQuotas::new(5, 4, 3));

        let ranks: Vec<u8> = plan.questions.iter().map(|q| q.kind().rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
        assert_eq!(plan.total(), 12);
    }

    #[test]
    fn sampling_is_without_replacement() {
        let bank = mixed_bank();
        let plan = ExamBuilder::new(&bank)
            .with_seed(3)
            .build(&ExamQuotas::new(5, 4, 3));

        let ids: HashSet<QuestionId> = plan.questions.iter().map(Question::id).collect();
        assert_eq!(ids.len(), plan.total());
    }

    #[test]
    fn same_seed_reproduces_the_draw() {
        let bank = mixed_bank();
        let quotas = ExamQuotas::new(2, 2, 2);

        let first = ExamBuilder::new(&bank).with_seed(42).build(&quotas);
        let second = ExamBuilder::new(&bank).with_seed(42).build(&quotas);

        assert_eq!(first, second);
    }

    #[test]
    fn zero_quotas_make_an_empty_plan() {
        let bank = mixed_bank();
        let plan = ExamBuilder::new(&bank).build(&ExamQuotas::new(0, 0, 0));

        assert!(plan.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn empty_bank_yields_empty_plan_with_warnings() {
        let bank = QuestionBank::new(Vec::new()).unwrap();
        let plan = ExamBuilder::new(&bank).build(&ExamQuotas::new(1, 0, 0));

        assert!(plan.is_empty());
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.warnings[0].available, 0);
    }
}
