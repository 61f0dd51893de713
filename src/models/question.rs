use std::collections::HashSet;
use std::fmt;

use crate::error::{GameError, QuestionError};

pub const NUM_OPTIONS: usize = 4;

/// A single multiple-choice question.
///
/// Always holds exactly four distinct, non-empty options and a correct index
/// pointing at one of them. Fields are private so a built question cannot be
/// altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: [String; NUM_OPTIONS],
    correct_index: usize,
    explanation: Option<String>,
}

impl Question {
    /// Validate and build a question. Text is trimmed; an empty explanation
    /// is treated as absent.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let count = options.len();
        let options: [String; NUM_OPTIONS] = options
            .into_iter()
            .map(|option| option.trim().to_string())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| QuestionError::WrongOptionCount(count))?;

        let mut seen = HashSet::with_capacity(NUM_OPTIONS);
        for (index, option) in options.iter().enumerate() {
            if option.is_empty() {
                return Err(QuestionError::EmptyOption(index));
            }
            if !seen.insert(option.to_lowercase()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }

        if correct_index >= NUM_OPTIONS {
            return Err(QuestionError::CorrectIndexOutOfRange(correct_index));
        }

        let explanation = explanation
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(Self {
            prompt,
            options,
            correct_index,
            explanation,
        })
    }

    /// Build a question from hardcoded data known to be valid.
    pub(crate) fn from_static(
        prompt: &str,
        options: [&str; NUM_OPTIONS],
        correct_index: usize,
        explanation: &str,
    ) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.map(str::to_string),
            correct_index,
            explanation: Some(explanation.to_string()),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; NUM_OPTIONS] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}

/// Number of questions in a game, between 5 and 20 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuestionCount(usize);

impl QuestionCount {
    pub const MIN: usize = 5;
    pub const MAX: usize = 20;
    pub const DEFAULT: usize = 10;

    pub fn new(count: usize) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(GameError::InvalidQuestionCount(count))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// One more question, capped at the maximum.
    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    /// One fewer question, floored at the minimum.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for QuestionCount {
    type Error = GameError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered questions of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a set; its length must be a valid [`QuestionCount`].
    pub fn new(questions: Vec<Question>) -> Result<Self, GameError> {
        QuestionCount::new(questions.len())?;
        Ok(Self { questions })
    }

    pub(crate) fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Cut the set down to exactly `count` questions. Returns `None` when the
    /// set is shorter than requested.
    pub fn fit(mut self, count: QuestionCount) -> Option<Self> {
        if self.questions.len() < count.get() {
            return None;
        }
        self.questions.truncate(count.get());
        Some(self)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
