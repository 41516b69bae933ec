use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fmt;

use exam_core::Clock;
use exam_core::grading::{self, ExamReport};
use exam_core::model::{AnswerSlot, DEFAULT_PAGE_CAPACITY, ExamSettings, Question};
use exam_core::navigation::AnswerCardPager;

use super::plan::{ExamPlan, SamplingWarning};
use super::progress::ExamProgress;
use super::timer::{Countdown, TimerTick};

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of one exam instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    /// No questions were sampled; a valid terminal display state.
    Empty,
    /// Questions loaded, countdown not yet armed.
    Ready,
    /// First answer given; the countdown is live.
    InProgress,
    /// Irreversibly submitted. The report may still be pending
    /// (`is_grading`) until `finalize_grading` runs.
    Submitted,
}

/// What the confirmation dialog needs to phrase its question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPrompt {
    pub unanswered: usize,
    pub at_last_question: bool,
}

/// Token for an unconfirmed submit request, stamped with the session
/// generation so a cancel arriving after a regeneration cannot resume
/// the wrong session's countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSubmit {
    generation: u64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state for one timed exam attempt.
///
/// Owns the sampled paper, the per-question answer slots, the countdown
/// and the answer-card pager. User intents degrade to no-ops when
/// illegal (wrong phase, out-of-range index, unknown option); nothing
/// here panics. Regenerating installs a fresh paper in place and
/// invalidates everything derived from the old one.
pub struct ExamSession {
    questions: Vec<Question>,
    slots: Vec<AnswerSlot>,
    current: usize,
    phase: ExamPhase,
    countdown: Countdown,
    pager: AnswerCardPager,
    option_orders: HashMap<usize, Vec<String>>,
    rng: StdRng,
    pending_submit: Option<PendingSubmit>,
    generation: u64,
    warnings: Vec<SamplingWarning>,
    report: Option<ExamReport>,
    settings: ExamSettings,
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
}

impl ExamSession {
    /// Create a session from a sampled plan.
    ///
    /// `clock` only stamps `started_at`/`submitted_at`; the countdown is
    /// driven by [`ExamSession::tick`].
    #[must_use]
    pub fn new(plan: ExamPlan, settings: ExamSettings, clock: Clock) -> Self {
        let mut session = Self {
            questions: Vec::new(),
            slots: Vec::new(),
            current: 0,
            phase: ExamPhase::Empty,
            countdown: Countdown::new(0),
            pager: AnswerCardPager::new(DEFAULT_PAGE_CAPACITY),
            option_orders: HashMap::new(),
            rng: StdRng::from_os_rng(),
            pending_submit: None,
            generation: 0,
            warnings: Vec::new(),
            report: None,
            settings,
            clock,
            started_at: None,
            submitted_at: None,
        };
        session.install_plan(plan);
        session
    }

    /// Seed the option-order shuffles for a reproducible presentation.
    #[must_use]
    pub fn with_option_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    //
    // ─── READ MODEL ────────────────────────────────────────────────────────────
    //

    /// Number of questions on the paper.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 0-based position of the question on screen.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&AnswerSlot> {
        self.slots.get(index)
    }

    #[must_use]
    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    /// True once the first answer armed the countdown.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == ExamPhase::Submitted
    }

    /// Submitted, but the report has not been computed yet.
    #[must_use]
    pub fn is_grading(&self) -> bool {
        self.is_submitted() && self.report.is_none()
    }

    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.report.is_some()
    }

    #[must_use]
    pub fn has_pending_submit(&self) -> bool {
        self.pending_submit.is_some()
    }

    /// Remaining countdown budget in seconds.
    #[must_use]
    pub fn time_left(&self) -> i64 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn pager(&self) -> &AnswerCardPager {
        &self.pager
    }

    #[must_use]
    pub fn report(&self) -> Option<&ExamReport> {
        self.report.as_ref()
    }

    /// Sampling warnings carried over from the plan.
    #[must_use]
    pub fn warnings(&self) -> &[SamplingWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_answered()).count()
    }

    #[must_use]
    pub fn progress(&self) -> ExamProgress {
        let unanswered = self.unanswered_count();
        ExamProgress {
            total: self.len(),
            answered: self.len() - unanswered,
            unanswered,
            is_submitted: self.is_submitted(),
        }
    }

    /// Options for the question at `index`, in presentation order.
    ///
    /// The random order is drawn once per question and cached for the
    /// lifetime of the session, so navigating away and back shows the
    /// same layout. The cache is dropped on regeneration.
    pub fn presented_options(&mut self, index: usize) -> Option<&[String]> {
        if index >= self.questions.len() {
            return None;
        }
        if !self.option_orders.contains_key(&index) {
            let mut order = self.questions[index].options().to_vec();
            order.shuffle(&mut self.rng);
            self.option_orders.insert(index, order);
        }
        self.option_orders.get(&index).map(Vec::as_slice)
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────────
    //

    /// Record a selection event for the question at `index`.
    ///
    /// The first effective selection starts the exam: Ready moves to
    /// InProgress and the countdown is armed. Returns false (state
    /// untouched) after submission, for an out-of-range index, or for
    /// an option the question does not have.
    pub fn select_answer(&mut self, index: usize, option: &str, selected: bool) -> bool {
        if self.is_submitted() {
            return false;
        }
        let Some(question) = self.questions.get(index) else {
            return false;
        };
        if !question.options().iter().any(|candidate| candidate == option) {
            return false;
        }
        let kind = question.kind();

        if !self.is_started() {
            self.phase = ExamPhase::InProgress;
            self.countdown.arm();
            self.started_at = Some(self.clock.now());
        }
        self.slots[index].apply(kind, option, selected);
        true
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Jump to the question at `index`; allowed after submission for
    /// review. Out-of-range positions are rejected.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.questions.len() {
            return false;
        }
        self.current = index;
        self.pager.sync_to(index, self.questions.len());
        true
    }

    /// Step forward; no-op on the last question.
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.go_to(self.current + 1)
    }

    /// Step back; no-op on the first question.
    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.go_to(self.current - 1)
    }

    /// Flip the answer card to a page (clamped).
    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to_page(page, self.questions.len());
    }

    /// Layout-driven capacity change; keeps the current question's page
    /// visible.
    pub fn set_page_capacity(&mut self, capacity: usize) {
        self.pager.set_capacity(capacity, self.questions.len());
        if !self.questions.is_empty() {
            self.pager.sync_to(self.current, self.questions.len());
        }
    }

    //
    // ─── SUBMIT FLOW ───────────────────────────────────────────────────────────
    //

    /// Ask to submit; pauses the countdown until confirmed or
    /// cancelled.
    ///
    /// Returns `None` when the paper is empty or already submitted.
    /// Re-requesting while a request is pending just returns a fresh
    /// prompt.
    pub fn request_submit(&mut self) -> Option<SubmitPrompt> {
        if self.questions.is_empty() || self.is_submitted() {
            return None;
        }
        self.countdown.disarm();
        self.pending_submit = Some(PendingSubmit {
            generation: self.generation,
        });
        Some(SubmitPrompt {
            unanswered: self.unanswered_count(),
            at_last_question: self.current + 1 == self.questions.len(),
        })
    }

    /// Withdraw a pending submit request, resuming the countdown from
    /// exactly where it paused.
    ///
    /// A stale request (the session was regenerated since) is dropped
    /// without touching the countdown.
    pub fn cancel_submit(&mut self) -> bool {
        let Some(pending) = self.pending_submit.take() else {
            return false;
        };
        if pending.generation != self.generation {
            return false;
        }
        if self.phase == ExamPhase::InProgress {
            self.countdown.arm();
        }
        true
    }

    /// Confirm a pending submit request; the second confirm of the same
    /// request is a no-op.
    pub fn confirm_submit(&mut self) -> bool {
        let Some(pending) = self.pending_submit.take() else {
            return false;
        };
        if pending.generation != self.generation || self.is_submitted() {
            return false;
        }
        self.begin_submission();
        true
    }

    /// Advance the exam clock by one second.
    ///
    /// Expiry forces submission, bypassing confirmation, exactly once;
    /// every later tick is `Idle`.
    pub fn tick(&mut self) -> TimerTick {
        let outcome = self.countdown.tick();
        if outcome == TimerTick::Expired && !self.is_submitted() {
            self.begin_submission();
        }
        outcome
    }

    /// Second phase of submission: compute and store the report.
    ///
    /// Idempotent; returns `None` until the session is submitted.
    pub fn finalize_grading(&mut self) -> Option<&ExamReport> {
        if self.phase != ExamPhase::Submitted {
            return None;
        }
        if self.report.is_none() {
            self.report = Some(grading::grade(&self.questions, &self.slots));
        }
        self.report.as_ref()
    }

    fn begin_submission(&mut self) {
        self.countdown.disarm();
        self.pending_submit = None;
        self.phase = ExamPhase::Submitted;
        self.submitted_at = Some(self.clock.now());
    }

    //
    // ─── REGENERATION ──────────────────────────────────────────────────────────
    //

    /// Replace the paper with a fresh plan, resetting all mutable
    /// state: position, slots, flags, pager, option order, report and
    /// the time budget.
    ///
    /// Rejected only while grading is in flight (submitted with the
    /// report still pending).
    pub fn reset_with(&mut self, plan: ExamPlan) -> bool {
        if self.is_grading() {
            return false;
        }
        self.generation += 1;
        self.install_plan(plan);
        true
    }

    fn install_plan(&mut self, plan: ExamPlan) {
        let total = plan.questions.len();
        self.questions = plan.questions;
        self.warnings = plan.warnings;
        self.slots = vec![AnswerSlot::Unanswered; total];
        self.current = 0;
        self.phase = if total == 0 {
            ExamPhase::Empty
        } else {
            ExamPhase::Ready
        };
        self.countdown.reset(self.settings.time_budget(total));
        self.pager.reset();
        self.option_orders.clear();
        self.pending_submit = None;
        self.report = None;
        self.started_at = None;
        self.submitted_at = None;
    }
}

impl fmt::Debug for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("time_left", &self.countdown.remaining())
            .field("pending_submit", &self.pending_submit.is_some())
            .field("generation", &self.generation)
            .field("graded", &self.report.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
