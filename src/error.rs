//! Error types shared across the crate.

use std::io;

use thiserror::Error;

use crate::game::Lifeline;

/// Top-level error for running the quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The HTTP client for the question service could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A rejected game transition.
///
/// None of these are fatal; the UI shows them as inline messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The action is not valid in the current state.
    #[error("{0}")]
    InvalidTransition(&'static str),

    /// The lifeline has already been used this game.
    #[error("Already used {0}.")]
    LifelineExhausted(Lifeline),

    /// Flip or pass was requested on the last question.
    #[error("No more questions left to skip to.")]
    NoMoreQuestions,

    /// The selected option does not exist or was eliminated.
    #[error("Option {0} is not available.")]
    InvalidOption(usize),

    /// Question count outside the supported range.
    #[error("question count must be between 5 and 20, got {0}")]
    InvalidQuestionCount(usize),

    /// The questions delivered for a game do not match the requested count.
    #[error("expected {requested} questions, received {received}")]
    QuestionCountMismatch { requested: usize, received: usize },

    /// A generation result arrived for a game that was restarted or replaced.
    #[error("discarded questions for a stale game")]
    StaleGeneration,
}

/// Reasons a single question fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyPrompt,

    #[error("expected 4 options, got {0}")]
    WrongOptionCount(usize),

    #[error("option {0} is empty")]
    EmptyOption(usize),

    #[error("duplicate option \"{0}\"")]
    DuplicateOption(String),

    #[error("correct index {0} is out of range")]
    CorrectIndexOutOfRange(usize),
}

/// Unknown category name passed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category \"{0}\"")]
pub struct ParseCategoryError(pub String);
