use std::sync::Arc;

use exam_core::Clock;
use exam_core::grading::ExamReport;
use exam_core::model::{ExamQuotas, ExamSettings, QuestionBank};

use super::plan::ExamBuilder;
use super::session::{ExamSession, SubmitPrompt};
use super::timer::TimerTick;
use super::view::ExamSnapshot;

/// Orchestrates exam creation and the submit flow for a presenter.
///
/// Owns the clock and the shared question bank; sessions are handed to
/// the caller and mutated through `&mut`, one intent per call.
#[derive(Clone)]
pub struct ExamLoopService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    settings: ExamSettings,
    seed: Option<u64>,
}

impl ExamLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>) -> Self {
        Self {
            clock,
            bank,
            settings: ExamSettings::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ExamSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Fix the sampling and presentation seed for reproducible papers.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Sample a fresh paper and wrap it in a session.
    #[must_use]
    pub fn start_exam(&self, quotas: &ExamQuotas) -> ExamSession {
        let plan = self.builder().build(quotas);
        let session = ExamSession::new(plan, self.settings, self.clock);
        match self.seed {
            Some(seed) => session.with_option_seed(seed),
            None => session,
        }
    }

    /// Re-sample the paper in place; rejected while grading is in
    /// flight.
    pub fn regenerate(&self, session: &mut ExamSession, quotas: &ExamQuotas) -> bool {
        if session.is_grading() {
            return false;
        }
        session.reset_with(self.builder().build(quotas))
    }

    /// Ask to submit; see [`ExamSession::request_submit`].
    pub fn request_submit(&self, session: &mut ExamSession) -> Option<SubmitPrompt> {
        session.request_submit()
    }

    /// Withdraw a pending submit request.
    pub fn cancel_submit(&self, session: &mut ExamSession) -> bool {
        session.cancel_submit()
    }

    /// Confirm a pending submit request, entering the grading window.
    pub fn confirm_submit(&self, session: &mut ExamSession) -> bool {
        session.confirm_submit()
    }

    /// Finish the deferred grading step, producing the report.
    ///
    /// The presenter typically renders its "grading" state between
    /// confirmation and this call.
    pub fn finish_grading<'s>(&self, session: &'s mut ExamSession) -> Option<&'s ExamReport> {
        session.finalize_grading()
    }

    /// Forward one 1 Hz tick to the session's countdown.
    pub fn tick(&self, session: &mut ExamSession) -> TimerTick {
        session.tick()
    }

    /// Capture a presenter-facing snapshot.
    #[must_use]
    pub fn snapshot(&self, session: &mut ExamSession) -> ExamSnapshot {
        ExamSnapshot::capture(session)
    }

    fn builder(&self) -> ExamBuilder<'_> {
        let builder = ExamBuilder::new(&self.bank);
        match self.seed {
            Some(seed) => builder.with_seed(seed),
            None => builder,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
