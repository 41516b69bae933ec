use exam_core::model::{AnswerSlot, QuestionKind};
use exam_core::navigation::PageWindow;

use super::plan::SamplingWarning;
use super::session::{ExamPhase, ExamSession};

/// Page buttons the answer card shows at once.
const PAGE_BUTTONS: usize = 5;

//
// ─── VIEW ITEMS ────────────────────────────────────────────────────────────────
//

/// How one option should be painted after grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMarking {
    /// Part of the answer key.
    Correct,
    /// Chosen by the candidate but not part of the key.
    Incorrect,
}

/// One option row of the question on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
    pub marking: Option<OptionMarking>,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based position on the paper.
    pub position: usize,
    pub kind: QuestionKind,
    pub prompt: String,
    pub points: u32,
    pub is_last: bool,
    /// Options in cached presentation order.
    pub options: Vec<OptionView>,
}

/// Answer-card button state for one question index.
///
/// One status per button: after grading, correctness wins; before it,
/// the current position wins over the answered flag (the snapshot's
/// `current_index` still identifies the position either way).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Current,
    Answered,
    Unanswered,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardEntry {
    pub index: usize,
    pub status: CardStatus,
}

/// Pagination strip for the answer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub window: PageWindow,
}

/// Aggregate score once graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: u32,
    pub possible: u32,
    pub correct_count: usize,
    /// Indexes of incorrectly answered questions, in paper order.
    pub incorrect: Vec<usize>,
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Read-only view of a session for the presenter.
///
/// Presentation-agnostic: ordered option values and status flags only,
/// no styling and no copy strings (the time label is the one formatted
/// convenience).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSnapshot {
    pub phase: ExamPhase,
    pub started: bool,
    pub submitted: bool,
    pub grading: bool,
    pub time_left: i64,
    pub time_label: String,
    pub current_index: usize,
    pub total: usize,
    pub unanswered: usize,
    pub question: Option<QuestionView>,
    /// Buttons for the visible answer-card page.
    pub card: Vec<CardEntry>,
    pub pagination: PaginationView,
    pub score: Option<ScoreSummary>,
    pub warnings: Vec<SamplingWarning>,
}

impl ExamSnapshot {
    /// Capture the current state.
    ///
    /// Takes `&mut` because the option presentation order for a
    /// question is drawn lazily on first display.
    #[must_use]
    pub fn capture(session: &mut ExamSession) -> Self {
        let total = session.len();
        let current_index = session.current_index();
        let question = question_view(session, current_index);

        let card = session
            .pager()
            .page_range(total)
            .map(|index| CardEntry {
                index,
                status: card_status(session, index),
            })
            .collect();

        let pagination = PaginationView {
            current_page: session.pager().page(),
            total_pages: session.pager().total_pages(total),
            window: session.pager().window(total, PAGE_BUTTONS),
        };

        let score = session.report().map(|report| ScoreSummary {
            score: report.score(),
            possible: report.possible(),
            correct_count: report.correct_count(),
            incorrect: report.incorrect_indices(),
        });

        Self {
            phase: session.phase(),
            started: session.is_started(),
            submitted: session.is_submitted(),
            grading: session.is_grading(),
            time_left: session.time_left(),
            time_label: format_time_left(session.time_left()),
            current_index,
            total,
            unanswered: session.unanswered_count(),
            question,
            card,
            pagination,
            score,
            warnings: session.warnings().to_vec(),
        }
    }
}

fn question_view(session: &mut ExamSession, index: usize) -> Option<QuestionView> {
    let ordered = session.presented_options(index)?.to_vec();
    let question = session.question_at(index)?;
    let slot = session.slot(index)?;
    let graded = session.is_graded();

    let options = ordered
        .into_iter()
        .map(|text| {
            let selected = slot.contains(&text);
            let marking = if graded {
                if question.answer().contains(&text) {
                    Some(OptionMarking::Correct)
                } else if selected {
                    Some(OptionMarking::Incorrect)
                } else {
                    None
                }
            } else {
                None
            };
            OptionView {
                text,
                selected,
                marking,
            }
        })
        .collect();

    Some(QuestionView {
        position: index + 1,
        kind: question.kind(),
        prompt: question.prompt().to_owned(),
        points: question.points(),
        is_last: index + 1 == session.len(),
        options,
    })
}

fn card_status(session: &ExamSession, index: usize) -> CardStatus {
    if let Some(report) = session.report() {
        if let Some(entry) = report.feedback().get(index) {
            return if entry.correct {
                CardStatus::Correct
            } else {
                CardStatus::Incorrect
            };
        }
    }
    if index == session.current_index() {
        CardStatus::Current
    } else if session.slot(index).is_some_and(AnswerSlot::is_answered) {
        CardStatus::Answered
    } else {
        CardStatus::Unanswered
    }
}

/// Format a second count as `MM:SS`, or `HH:MM:SS` above an hour.
///
/// Negative counts clamp to zero.
#[must_use]
pub fn format_time_left(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
