mod answer;
mod bank;
mod ids;
mod question;
mod settings;

pub use answer::AnswerSlot;
pub use bank::{BankError, QuestionBank};
pub use ids::QuestionId;
pub use question::{
    AnswerKey, Question, QuestionDraft, QuestionError, QuestionKind, ValidatedQuestion,
};
pub use settings::{DEFAULT_PAGE_CAPACITY, ExamQuotas, ExamSettings, SettingsError};
