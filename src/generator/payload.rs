//! Strict validation of the question service's reply.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::GenerationError;
use crate::models::{Question, QuestionCount, QuestionSet};

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explanation: Option<String>,
}

/// Remove a Markdown code fence (optionally tagged `json`) around `content`.
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    inner.trim()
}

/// Parse message content into exactly `count` questions.
///
/// Malformed entries are skipped. Fails when the document is not JSON, has no
/// `questions` array, or yields fewer than `count` valid questions.
pub fn parse_questions(content: &str, count: QuestionCount) -> Result<QuestionSet, GenerationError> {
    let document: Value = serde_json::from_str(strip_code_fence(content))?;
    let entries = document
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(GenerationError::MissingQuestions)?;

    let mut questions = Vec::with_capacity(count.get());
    for (index, entry) in entries.iter().enumerate() {
        if questions.len() == count.get() {
            break;
        }
        match parse_entry(entry) {
            Ok(question) => questions.push(question),
            Err(reason) => debug!(index, %reason, "skipping malformed question"),
        }
    }

    if questions.len() < count.get() {
        return Err(GenerationError::InsufficientQuestions {
            valid: questions.len(),
            requested: count.get(),
        });
    }

    Ok(QuestionSet::from_questions(questions))
}

fn parse_entry(entry: &Value) -> Result<Question, String> {
    let raw = RawQuestion::deserialize(entry).map_err(|err| err.to_string())?;
    Question::new(raw.question, raw.options, raw.correct_index, raw.explanation)
        .map_err(|err| err.to_string())
}
