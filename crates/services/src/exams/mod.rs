mod plan;
mod progress;
mod session;
mod timer;
mod view;
mod workflow;

// Public API of the exam subsystem.
pub use plan::{ExamBuilder, ExamPlan, SamplingWarning};
pub use progress::ExamProgress;
pub use session::{ExamPhase, ExamSession, SubmitPrompt};
pub use timer::{Countdown, TimerTick};
pub use view::{
    CardEntry, CardStatus, ExamSnapshot, OptionMarking, OptionView, PaginationView, QuestionView,
    ScoreSummary, format_time_left,
};
pub use workflow::ExamLoopService;
