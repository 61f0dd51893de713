//! One game: the question set plus everything the player has done to it.

use std::collections::BTreeSet;

use tracing::{debug, info};
use uuid::Uuid;

use super::lifeline::{Lifeline, LifelineState};
use crate::error::GameError;
use crate::models::{Category, NUM_OPTIONS, Question, QuestionSet};

/// Whether the game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished,
}

/// What happened to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Unanswered,
    Answered { selected: usize, correct: bool },
    Flipped,
    Passed,
}

/// Result of answering a question, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub selected: usize,
    pub correct_index: usize,
    pub correct_option: String,
    pub explanation: Option<String>,
}

/// State of a single game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    category: Category,
    questions: QuestionSet,
    current_index: usize,
    score: usize,
    lifelines: LifelineState,
    eliminated: BTreeSet<usize>,
    outcomes: Vec<QuestionOutcome>,
    status: GameStatus,
    fallback_reason: Option<String>,
}

impl GameSession {
    /// Start a fresh game at the first question with all lifelines available.
    pub fn new(category: Category, questions: QuestionSet, fallback_reason: Option<String>) -> Self {
        let status = if questions.is_empty() {
            GameStatus::Finished
        } else {
            GameStatus::InProgress
        };

        Self {
            id: Uuid::new_v4(),
            category,
            outcomes: vec![QuestionOutcome::Unanswered; questions.len()],
            questions,
            current_index: 0,
            score: 0,
            lifelines: LifelineState::default(),
            eliminated: BTreeSet::new(),
            status,
            fallback_reason,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// The question being played, or `None` once the game is finished.
    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            GameStatus::InProgress => self.questions.get(self.current_index),
            GameStatus::Finished => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based number of the current question.
    pub fn question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn lifelines(&self) -> &LifelineState {
        &self.lifelines
    }

    /// Options hidden by fifty-fifty on the current question.
    pub fn eliminated(&self) -> &BTreeSet<usize> {
        &self.eliminated
    }

    pub fn is_option_available(&self, index: usize) -> bool {
        index < NUM_OPTIONS && !self.eliminated.contains(&index)
    }

    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    pub fn current_outcome(&self) -> QuestionOutcome {
        self.outcomes
            .get(self.current_index)
            .copied()
            .unwrap_or(QuestionOutcome::Unanswered)
    }

    pub fn is_current_answered(&self) -> bool {
        matches!(self.current_outcome(), QuestionOutcome::Answered { .. })
    }

    /// Questions answered, flipped or passed.
    pub fn resolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| **outcome != QuestionOutcome::Unanswered)
            .count()
    }

    /// Fraction of the game completed, from 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        if self.status == GameStatus::Finished {
            return 1.0;
        }
        self.resolved_count() as f64 / self.total_questions().max(1) as f64
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Why the offline bank supplied the questions, if it did.
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::InProgress => Ok(()),
            GameStatus::Finished => Err(GameError::InvalidTransition("The game is over.")),
        }
    }

    fn playing_question(&self) -> Result<&Question, GameError> {
        self.ensure_in_progress()?;
        self.questions
            .get(self.current_index)
            .ok_or(GameError::InvalidTransition("There is no current question."))
    }

    /// Submit an answer for the current question. Does not advance.
    pub fn answer(&mut self, selected: usize) -> Result<AnswerFeedback, GameError> {
        let question = self.playing_question()?;
        if self.is_current_answered() {
            return Err(GameError::InvalidTransition(
                "This question has already been answered.",
            ));
        }
        if !self.is_option_available(selected) {
            return Err(GameError::InvalidOption(selected));
        }

        let correct = question.is_correct(selected);
        let feedback = AnswerFeedback {
            correct,
            selected,
            correct_index: question.correct_index(),
            correct_option: question.correct_option().to_string(),
            explanation: question.explanation().map(str::to_string),
        };

        if correct {
            self.score += 1;
        }
        self.outcomes[self.current_index] = QuestionOutcome::Answered { selected, correct };
        debug!(question = self.question_number(), selected, correct, "answered");

        Ok(feedback)
    }

    /// Move past an answered question, finishing the game after the last one.
    pub fn next(&mut self) -> Result<GameStatus, GameError> {
        self.ensure_in_progress()?;
        if !self.is_current_answered() {
            return Err(GameError::InvalidTransition(
                "Answer the question before moving on.",
            ));
        }
        Ok(self.advance())
    }

    /// Hide two wrong options on the current question.
    ///
    /// The two incorrect options with the lowest indices are removed, so a
    /// question whose answer is at index 1 loses options 0 and 2.
    pub fn use_fifty_fifty(&mut self) -> Result<[usize; 2], GameError> {
        let correct = self.playing_question()?.correct_index();
        self.lifelines.ensure_available(Lifeline::FiftyFifty)?;
        if self.is_current_answered() {
            return Err(GameError::InvalidTransition(
                "50-50 must be used before answering.",
            ));
        }

        let mut wrong = (0..NUM_OPTIONS).filter(|index| *index != correct);
        let removed = match (wrong.next(), wrong.next()) {
            (Some(first), Some(second)) => [first, second],
            _ => return Err(GameError::InvalidTransition("Not enough options to remove.")),
        };

        self.lifelines.consume(Lifeline::FiftyFifty)?;
        self.eliminated.extend(removed);
        debug!(question = self.question_number(), ?removed, "used 50-50");

        Ok(removed)
    }

    /// Replace the current question with the next one.
    ///
    /// An unanswered question is recorded as flipped and earns nothing. If
    /// it was already answered, that answer and any point it earned stay.
    pub fn use_flip(&mut self) -> Result<(), GameError> {
        self.skip(Lifeline::Flip)
    }

    /// Same as [`use_flip`](Self::use_flip), recorded as a pass.
    pub fn use_pass(&mut self) -> Result<(), GameError> {
        self.skip(Lifeline::Pass)
    }

    fn skip(&mut self, lifeline: Lifeline) -> Result<(), GameError> {
        self.playing_question()?;
        self.lifelines.ensure_available(lifeline)?;
        if self.current_index + 1 >= self.questions.len() {
            return Err(GameError::NoMoreQuestions);
        }

        self.lifelines.consume(lifeline)?;
        if !self.is_current_answered() {
            self.outcomes[self.current_index] = match lifeline {
                Lifeline::Pass => QuestionOutcome::Passed,
                _ => QuestionOutcome::Flipped,
            };
        }
        debug!(question = self.question_number(), %lifeline, "skipped");
        self.advance();
        Ok(())
    }

    fn advance(&mut self) -> GameStatus {
        self.eliminated.clear();
        if self.current_index + 1 >= self.questions.len() {
            self.status = GameStatus::Finished;
            info!(
                session = %self.id,
                category = %self.category,
                score = self.score,
                total = self.questions.len(),
                "game finished"
            );
        } else {
            self.current_index += 1;
        }
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    /// Five questions whose correct answers are at indices 0, 1, 2, 3, 0.
    fn session() -> GameSession {
        let questions = (0..5)
            .map(|i| {
                Question::new(
                    format!("Question {i}"),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    i % 4,
                    Some(format!("Explanation {i}")),
                )
                .unwrap()
            })
            .collect();
        GameSession::new(
            Category::GeneralHalloween,
            QuestionSet::new(questions).unwrap(),
            None,
        )
    }

    #[test]
    fn test_new_session_starts_fresh() {
        let s = session();
        assert_eq!(s.status(), GameStatus::InProgress);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.progress(), 0.0);
        for lifeline in Lifeline::ALL {
            assert_eq!(s.lifelines().remaining(lifeline), 1);
        }
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(session().id(), session().id());
    }

    #[test]
    fn test_correct_answer_scores() {
        let mut s = session();
        let feedback = s.answer(0).unwrap();

        assert!(feedback.correct);
        assert_eq!(feedback.correct_option, "A");
        assert_eq!(feedback.explanation.as_deref(), Some("Explanation 0"));
        assert_eq!(s.score(), 1);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_wrong_answer_does_not_score() {
        let mut s = session();
        let feedback = s.answer(3).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_index, 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_double_answer_is_rejected() {
        let mut s = session();
        s.answer(0).unwrap();
        assert!(matches!(s.answer(0), Err(GameError::InvalidTransition(_))));
        assert!(matches!(s.answer(1), Err(GameError::InvalidTransition(_))));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_out_of_range_answer_is_rejected() {
        let mut s = session();
        assert_eq!(s.answer(4), Err(GameError::InvalidOption(4)));
        assert!(!s.is_current_answered());
    }

    #[test]
    fn test_next_requires_answer() {
        let mut s = session();
        assert!(matches!(s.next(), Err(GameError::InvalidTransition(_))));
        s.answer(0).unwrap();
        assert_eq!(s.next(), Ok(GameStatus::InProgress));
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_current_answered());
    }

    #[test]
    fn test_fifty_fifty_removes_lowest_wrong_options() {
        let mut s = session();
        s.answer(0).unwrap();
        s.next().unwrap();

        // Correct answer at index 1.
        assert_eq!(s.use_fifty_fifty(), Ok([0, 2]));
        assert_eq!(s.eliminated().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!s.is_option_available(0));
        assert!(s.is_option_available(1));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_fifty_fifty_with_answer_first() {
        let mut s = session();
        assert_eq!(s.use_fifty_fifty(), Ok([1, 2]));
        assert_eq!(s.answer(1), Err(GameError::InvalidOption(1)));
        assert!(s.answer(0).unwrap().correct);
    }

    #[test]
    fn test_fifty_fifty_only_once() {
        let mut s = session();
        s.use_fifty_fifty().unwrap();
        assert_eq!(
            s.use_fifty_fifty(),
            Err(GameError::LifelineExhausted(Lifeline::FiftyFifty))
        );
        s.answer(0).unwrap();
        s.next().unwrap();
        assert_eq!(
            s.use_fifty_fifty(),
            Err(GameError::LifelineExhausted(Lifeline::FiftyFifty))
        );
    }

    #[test]
    fn test_fifty_fifty_after_answer_is_rejected() {
        let mut s = session();
        s.answer(2).unwrap();
        assert!(matches!(
            s.use_fifty_fifty(),
            Err(GameError::InvalidTransition(_))
        ));
        assert!(s.lifelines().is_available(Lifeline::FiftyFifty));
    }

    #[test]
    fn test_eliminations_cleared_on_advance() {
        let mut s = session();
        s.use_fifty_fifty().unwrap();
        s.answer(0).unwrap();
        s.next().unwrap();
        assert!(s.eliminated().is_empty());
    }

    #[test]
    fn test_flip_advances_without_scoring() {
        let mut s = session();
        s.use_fifty_fifty().unwrap();
        s.use_flip().unwrap();

        assert_eq!(s.current_index(), 1);
        assert_eq!(s.score(), 0);
        assert!(s.eliminated().is_empty());
        assert_eq!(s.outcomes()[0], QuestionOutcome::Flipped);
        assert_eq!(
            s.use_flip(),
            Err(GameError::LifelineExhausted(Lifeline::Flip))
        );
    }

    #[test]
    fn test_pass_advances_and_is_recorded() {
        let mut s = session();
        s.use_pass().unwrap();
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.outcomes()[0], QuestionOutcome::Passed);
        assert_eq!(
            s.use_pass(),
            Err(GameError::LifelineExhausted(Lifeline::Pass))
        );
        // Flip is still available after a pass.
        assert!(s.use_flip().is_ok());
    }

    #[test]
    fn test_skip_after_answer_keeps_score() {
        let mut s = session();
        s.answer(0).unwrap();
        s.use_flip().unwrap();
        assert_eq!(s.score(), 1);
        assert_eq!(
            s.outcomes()[0],
            QuestionOutcome::Answered {
                selected: 0,
                correct: true
            }
        );
    }

    #[test]
    fn test_skip_on_last_question_is_rejected() {
        let mut s = session();
        for index in 0..4 {
            s.answer(index % 4).unwrap();
            s.next().unwrap();
        }
        assert_eq!(s.current_index(), 4);
        assert_eq!(s.use_flip(), Err(GameError::NoMoreQuestions));
        assert_eq!(s.use_pass(), Err(GameError::NoMoreQuestions));
        assert!(s.lifelines().is_available(Lifeline::Flip));
        assert!(s.lifelines().is_available(Lifeline::Pass));
    }

    #[test]
    fn test_next_from_last_question_finishes() {
        let mut s = session();
        for index in 0..4 {
            s.answer(index % 4).unwrap();
            assert_eq!(s.next(), Ok(GameStatus::InProgress));
        }
        s.answer(1).unwrap();
        assert_eq!(s.next(), Ok(GameStatus::Finished));

        assert!(s.is_finished());
        assert_eq!(s.score(), 4);
        assert_eq!(s.progress(), 1.0);
        assert!(s.current_question().is_none());
    }

    #[test]
    fn test_everything_rejected_after_finish() {
        let mut s = session();
        s.use_pass().unwrap();
        s.use_flip().unwrap();
        for _ in 0..3 {
            s.answer(0).unwrap();
            s.next().unwrap();
        }
        assert!(s.is_finished());

        assert!(matches!(s.answer(0), Err(GameError::InvalidTransition(_))));
        assert!(matches!(s.next(), Err(GameError::InvalidTransition(_))));
        assert!(matches!(s.use_fifty_fifty(), Err(GameError::InvalidTransition(_))));
        assert!(matches!(s.use_flip(), Err(GameError::InvalidTransition(_))));
        assert!(matches!(s.use_pass(), Err(GameError::InvalidTransition(_))));
    }

    #[test]
    fn test_progress_counts_resolved_questions() {
        let mut s = session();
        s.answer(0).unwrap();
        assert_eq!(s.progress(), 0.2);
        s.next().unwrap();
        s.use_pass().unwrap();
        assert_eq!(s.resolved_count(), 2);
        assert_eq!(s.progress(), 0.4);
    }
}
