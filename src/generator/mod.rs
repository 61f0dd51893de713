//! Question generation.
//!
//! A [`QuestionSource`] produces a validated [`QuestionSet`] or a
//! [`GenerationError`]. [`load_questions`] never fails: any error is replaced
//! by the offline bank and the reason is kept for display.

mod openai;
mod payload;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::data::fallback_questions;
use crate::models::{Category, QuestionCount, QuestionSet};

pub use openai::OpenAiSource;
pub use payload::{parse_questions, strip_code_fence};

/// Why a question set could not be generated.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("missing credentials")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("service responded with HTTP {0}")]
    Status(u16),

    #[error("response contained no message content")]
    EmptyCompletion,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response has no \"questions\" array")]
    MissingQuestions,

    #[error("only {valid} of {requested} requested questions were valid")]
    InsufficientQuestions { valid: usize, requested: usize },

    #[error("{0}")]
    Unavailable(String),
}

/// Anything that can produce questions for a game.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn generate_questions(
        &self,
        category: Category,
        count: QuestionCount,
    ) -> Result<QuestionSet, GenerationError>;
}

/// A source that never reaches the network, so every game uses the offline
/// bank with the given reason.
#[derive(Debug, Clone)]
pub struct OfflineSource {
    reason: String,
}

impl OfflineSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for OfflineSource {
    fn default() -> Self {
        Self::new("offline mode")
    }
}

#[async_trait]
impl QuestionSource for OfflineSource {
    async fn generate_questions(
        &self,
        _category: Category,
        _count: QuestionCount,
    ) -> Result<QuestionSet, GenerationError> {
        Err(GenerationError::Unavailable(self.reason.clone()))
    }
}

/// Questions ready for a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedQuestions {
    pub questions: QuestionSet,
    /// Set when the offline bank was used.
    pub fallback_reason: Option<String>,
}

impl LoadedQuestions {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Ask `source` for questions, substituting the offline bank on any failure.
///
/// The result always holds exactly `count` questions.
pub async fn load_questions(
    source: &dyn QuestionSource,
    category: Category,
    count: QuestionCount,
) -> LoadedQuestions {
    let result = source
        .generate_questions(category, count)
        .await
        .and_then(|set| {
            let valid = set.len();
            set.fit(count).ok_or(GenerationError::InsufficientQuestions {
                valid,
                requested: count.get(),
            })
        });

    match result {
        Ok(questions) => {
            info!(category = %category, count = count.get(), "generated questions");
            LoadedQuestions {
                questions,
                fallback_reason: None,
            }
        }
        Err(err) => {
            let reason = err.to_string();
            warn!(category = %category, error = %reason, "question generation failed");
            LoadedQuestions {
                questions: fallback_questions(category, count, &reason),
                fallback_reason: Some(reason),
            }
        }
    }
}
