//! Static question catalog loading.
//!
//! The bank is preloaded data, not a persistence layer: records arrive
//! as JSON, pass through the draft validation pipeline, and come out as
//! an immutable `QuestionBank`.

use serde::Deserialize;

use exam_core::model::{AnswerKey, QuestionBank, QuestionDraft, QuestionId, QuestionKind};

use crate::error::CatalogError;

/// Raw catalog record as it appears in JSON.
///
/// `id` may be omitted; the 1-based record position is used instead.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: AnswerKey,
    pub points: u32,
}

/// Parse a JSON array of catalog records into a validated bank.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for malformed JSON, `Question` when a
/// record fails validation, and `Bank` for duplicate ids.
pub fn bank_from_json(json: &str) -> Result<QuestionBank, CatalogError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
    bank_from_records(records)
}

/// Build a bank from already-deserialized records.
///
/// # Errors
///
/// Same validation failures as [`bank_from_json`], minus JSON parsing.
pub fn bank_from_records(records: Vec<QuestionRecord>) -> Result<QuestionBank, CatalogError> {
    let mut questions = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        let id = record.id.unwrap_or(position as u64 + 1);
        let draft = QuestionDraft {
            kind: record.kind,
            prompt: record.prompt,
            options: record.options,
            answer: record.answer,
            points: record.points,
        };
        questions.push(draft.validate()?.assign_id(QuestionId::new(id)));
    }
    Ok(QuestionBank::new(questions)?)
}
