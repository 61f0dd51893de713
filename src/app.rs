use uuid::Uuid;

use crate::data::fallback_questions;
use crate::error::GameError;
use crate::game::{AnswerFeedback, Game, GameSession, GameStatus, Lifeline, Phase, StartRequest};
use crate::generator::LoadedQuestions;
use crate::models::{AppState, Category, NUM_OPTIONS, Question, QuestionCount};

/// Everything the terminal UI shows, plus the game it drives.
pub struct App {
    game: Game,
    category: Category,
    count: QuestionCount,
    selected_option: usize,
    feedback: Option<AnswerFeedback>,
    message: Option<String>,
    result_scroll: usize,
}

impl App {
    pub fn new(category: Category, count: QuestionCount) -> Self {
        Self {
            game: Game::new(),
            category,
            count,
            selected_option: 0,
            feedback: None,
            message: None,
            result_scroll: 0,
        }
    }

    pub fn state(&self) -> AppState {
        match self.game.phase() {
            Phase::NotStarted => AppState::Welcome,
            Phase::Generating { .. } => AppState::Loading,
            Phase::Active(session) if session.is_finished() => AppState::Result,
            Phase::Active(_) => AppState::Quiz,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.game.session()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session().and_then(GameSession::current_question)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn count(&self) -> QuestionCount {
        self.count
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// Short status line for the last action.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Explanation shown while playing with offline questions.
    pub fn offline_notice(&self) -> Option<String> {
        self.session()?
            .fallback_reason()
            .map(|reason| format!("Using offline questions because: {reason}"))
    }

    pub fn score(&self) -> usize {
        self.session().map_or(0, GameSession::score)
    }

    pub fn total_questions(&self) -> usize {
        self.session().map_or(0, GameSession::total_questions)
    }

    pub fn progress(&self) -> f64 {
        self.session().map_or(0.0, GameSession::progress)
    }

    pub fn remaining_lifeline(&self, lifeline: Lifeline) -> u8 {
        self.session()
            .map_or(0, |session| session.lifelines().remaining(lifeline))
    }

    pub fn is_option_available(&self, index: usize) -> bool {
        self.session()
            .is_some_and(|session| session.is_option_available(index))
    }

    pub fn is_current_answered(&self) -> bool {
        self.session()
            .is_some_and(GameSession::is_current_answered)
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn select_next_category(&mut self) {
        self.category = self.category.next();
    }

    pub fn select_previous_category(&mut self) {
        self.category = self.category.previous();
    }

    pub fn increase_count(&mut self) {
        self.count = self.count.increment();
    }

    pub fn decrease_count(&mut self) {
        self.count = self.count.decrement();
    }

    pub fn select_next_option(&mut self) {
        self.step_selection(1);
    }

    pub fn select_previous_option(&mut self) {
        self.step_selection(NUM_OPTIONS - 1);
    }

    fn step_selection(&mut self, step: usize) {
        let mut candidate = self.selected_option;
        for _ in 0..NUM_OPTIONS {
            candidate = (candidate + step) % NUM_OPTIONS;
            if self.is_option_available(candidate) {
                self.selected_option = candidate;
                return;
            }
        }
    }

    fn reset_selection(&mut self) {
        self.selected_option = (0..NUM_OPTIONS)
            .find(|index| self.is_option_available(*index))
            .unwrap_or(0);
    }

    fn report(&mut self, err: GameError) {
        self.message = Some(err.to_string());
    }

    /// Ask for questions with the chosen category and count. The caller runs
    /// the returned request and hands the result to [`App::finish_loading`].
    pub fn start_quiz(&mut self) -> Option<StartRequest> {
        match self.game.begin_start(self.category, self.count) {
            Ok(request) => {
                self.feedback = None;
                self.message = None;
                Some(request)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Install generated questions. Results for a replaced request are
    /// ignored; a set of the wrong size is swapped for the offline bank.
    pub fn finish_loading(&mut self, ticket: Uuid, loaded: LoadedQuestions) {
        let outcome = self.game.complete_start(ticket, loaded).map(|_| ());
        let started = match outcome {
            Ok(()) => true,
            Err(err @ GameError::QuestionCountMismatch { .. }) => {
                let Some(request) = self.game.pending_request() else {
                    return;
                };
                let reason = err.to_string();
                let replacement = LoadedQuestions {
                    questions: fallback_questions(request.category, request.count, &reason),
                    fallback_reason: Some(reason),
                };
                self.game.complete_start(ticket, replacement).is_ok()
            }
            Err(_) => false,
        };

        if started {
            self.feedback = None;
            self.result_scroll = 0;
            self.message = Some("Let's play! Pick wisely.".to_string());
            self.reset_selection();
        }
    }

    /// Submit the selected option, or move on if the question was answered.
    pub fn submit(&mut self) {
        if self.is_current_answered() {
            self.next_question();
        } else {
            self.submit_answer();
        }
    }

    pub fn submit_answer(&mut self) {
        match self.game.answer(self.selected_option) {
            Ok(feedback) => {
                self.message = None;
                self.feedback = Some(feedback);
            }
            Err(err) => self.report(err),
        }
    }

    pub fn next_question(&mut self) {
        match self.game.next() {
            Ok(GameStatus::InProgress) => {
                self.feedback = None;
                self.message = None;
                self.reset_selection();
            }
            Ok(GameStatus::Finished) => {
                self.message = Some("Quiz complete!".to_string());
            }
            Err(err) => self.report(err),
        }
    }

    pub fn use_fifty_fifty(&mut self) {
        match self.game.use_fifty_fifty() {
            Ok(_) => {
                self.message = Some("50-50 used! Two choices remain.".to_string());
                if !self.is_option_available(self.selected_option) {
                    self.reset_selection();
                }
            }
            Err(err) => self.report(err),
        }
    }

    pub fn use_flip(&mut self) {
        match self.game.use_flip() {
            Ok(()) => self.after_skip("Flipped! New question."),
            Err(err) => self.report(err),
        }
    }

    pub fn use_pass(&mut self) {
        match self.game.use_pass() {
            Ok(()) => self.after_skip("Passed! Next question."),
            Err(err) => self.report(err),
        }
    }

    fn after_skip(&mut self, message: &str) {
        self.feedback = None;
        self.message = Some(message.to_string());
        self.reset_selection();
    }

    pub fn scroll_results_down(&mut self) {
        let max = self.total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Back to the welcome screen, keeping the chosen category and count.
    pub fn restart(&mut self) {
        self.game.restart();
        self.selected_option = 0;
        self.feedback = None;
        self.message = None;
        self.result_scroll = 0;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Category::default(), QuestionCount::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(app: &App, reason: Option<&str>) -> LoadedQuestions {
        LoadedQuestions {
            questions: fallback_questions(app.category(), app.count(), "test"),
            fallback_reason: reason.map(str::to_string),
        }
    }

    /// An app showing the first question of a five-question monsters game.
    fn playing() -> App {
        let mut app = App::new(
            Category::MonstersAndCreatures,
            QuestionCount::new(5).unwrap(),
        );
        let request = app.start_quiz().unwrap();
        let questions = loaded(&app, None);
        app.finish_loading(request.ticket, questions);
        app
    }

    #[test]
    fn test_welcome_settings() {
        let mut app = App::default();
        assert_eq!(app.state(), AppState::Welcome);

        app.select_previous_category();
        assert_eq!(app.category(), Category::KidsFriendly);
        app.select_next_category();
        app.select_next_category();
        assert_eq!(app.category(), Category::ClassicHorror);

        app.increase_count();
        assert_eq!(app.count().get(), 11);
        for _ in 0..20 {
            app.decrease_count();
        }
        assert_eq!(app.count().get(), 5);
    }

    #[test]
    fn test_loading_then_quiz() {
        let mut app = App::default();
        let request = app.start_quiz().unwrap();
        assert_eq!(app.state(), AppState::Loading);
        assert_eq!(request.count, QuestionCount::default());

        let questions = loaded(&app, Some("missing credentials"));
        app.finish_loading(request.ticket, questions);
        assert_eq!(app.state(), AppState::Quiz);
        assert_eq!(app.total_questions(), 10);
        assert_eq!(
            app.offline_notice().as_deref(),
            Some("Using offline questions because: missing credentials")
        );
    }

    #[test]
    fn test_wrong_sized_result_falls_back_to_offline_bank() {
        let mut app = App::new(Category::HauntedPlaces, QuestionCount::new(5).unwrap());
        let request = app.start_quiz().unwrap();

        let oversized = LoadedQuestions {
            questions: fallback_questions(
                Category::HauntedPlaces,
                QuestionCount::new(12).unwrap(),
                "test",
            ),
            fallback_reason: None,
        };
        app.finish_loading(request.ticket, oversized);

        assert_eq!(app.state(), AppState::Quiz);
        assert_eq!(app.total_questions(), 5);
        assert_eq!(
            app.offline_notice().as_deref(),
            Some("Using offline questions because: expected 5 questions, received 12")
        );
    }

    #[test]
    fn test_cancelled_loading_ignores_late_result() {
        let mut app = App::default();
        let request = app.start_quiz().unwrap();
        app.restart();

        let questions = loaded(&app, None);
        app.finish_loading(request.ticket, questions);
        assert_eq!(app.state(), AppState::Welcome);
    }

    #[test]
    fn test_submit_answers_then_advances() {
        let mut app = playing();
        // "Who wrote Frankenstein?" answer is index 1.
        app.select_next_option();
        app.submit();
        assert!(app.feedback().unwrap().correct);
        assert_eq!(app.score(), 1);

        app.submit();
        assert!(app.feedback().is_none());
        assert_eq!(app.session().unwrap().question_number(), 2);
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn test_selection_skips_eliminated_options() {
        let mut app = playing();
        app.use_fifty_fifty();
        // Correct index 1 leaves options 1 and 3.
        assert_eq!(app.selected_option(), 1);
        app.select_next_option();
        assert_eq!(app.selected_option(), 3);
        app.select_next_option();
        assert_eq!(app.selected_option(), 1);
        app.select_previous_option();
        assert_eq!(app.selected_option(), 3);
    }

    #[test]
    fn test_lifeline_errors_become_messages() {
        let mut app = playing();
        app.use_pass();
        assert_eq!(app.message(), Some("Passed! Next question."));
        app.use_pass();
        assert_eq!(app.message(), Some("Already used Pass."));
        assert_eq!(app.remaining_lifeline(Lifeline::Pass), 0);
        assert_eq!(app.remaining_lifeline(Lifeline::Flip), 1);
    }

    #[test]
    fn test_full_game_reaches_results() {
        let mut app = playing();
        for _ in 0..5 {
            app.submit();
            app.submit();
        }
        assert_eq!(app.state(), AppState::Result);
        assert_eq!(app.progress(), 1.0);

        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 2);
        app.restart();
        assert_eq!(app.state(), AppState::Welcome);
        assert_eq!(app.category(), Category::MonstersAndCreatures);
    }
}
