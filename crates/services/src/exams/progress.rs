/// Aggregated view of exam progress, useful for counters and the
/// submit confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub is_submitted: bool,
}
