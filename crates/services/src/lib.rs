#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod exams;

pub use exam_core::Clock;
pub use exams as exam;

pub use catalog::{QuestionRecord, bank_from_json, bank_from_records};
pub use error::CatalogError;

pub use exams::{
    CardEntry, CardStatus, ExamBuilder, ExamLoopService, ExamPhase, ExamPlan, ExamProgress,
    ExamSession, ExamSnapshot, OptionMarking, OptionView, PaginationView, QuestionView,
    SamplingWarning, ScoreSummary, SubmitPrompt, TimerTick,
};
