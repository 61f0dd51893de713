//! # spooky-quiz
//!
//! A Halloween trivia game for the terminal. Questions come from an
//! OpenAI-compatible chat API and fall back to a built-in offline bank
//! whenever generation fails.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spooky_quiz::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Reads OPENAI_API_KEY, MODEL_NAME, TEMPERATURE, ...
//!     let quiz = Quiz::from_config(Config::from_env())?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The game logic does not need a terminal:
//!
//! ```rust
//! use spooky_quiz::{Category, Game, OfflineSource, QuestionCount};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut game = Game::new();
//! let count = QuestionCount::new(5).unwrap();
//! game.start(&OfflineSource::default(), Category::MonstersAndCreatures, count)
//!     .await
//!     .unwrap();
//!
//! game.use_fifty_fifty().unwrap();
//! let feedback = game.answer(1).unwrap();
//! assert!(feedback.correct);
//! # }
//! ```

mod app;
pub mod config;
mod data;
mod error;
pub mod game;
pub mod generator;
mod models;
pub mod terminal;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

pub use app::App;
pub use config::Config;
pub use data::{fallback_questions, generic_pool, topic_pool};
pub use error::{GameError, ParseCategoryError, QuestionError, QuizError};
pub use game::{Game, GameSession, GameStatus, Lifeline, StartRequest};
pub use generator::{
    GenerationError, LoadedQuestions, OfflineSource, OpenAiSource, QuestionSource, load_questions,
};
pub use models::{AppState, Category, Question, QuestionCount, QuestionSet};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
    source: Arc<dyn QuestionSource>,
}

impl Quiz {
    /// Create a quiz drawing questions from `source`.
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            app: App::default(),
            source,
        }
    }

    /// Create a quiz backed by the chat API described by `config`.
    ///
    /// A missing API key is not an error here; every game then uses the
    /// offline bank.
    pub fn from_config(config: Config) -> Result<Self, QuizError> {
        let source = OpenAiSource::new(config)?;
        Ok(Self::new(Arc::new(source)))
    }

    /// Create a quiz that never contacts the question service.
    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineSource::default()))
    }

    /// Preselect the category and question count on the welcome screen.
    pub fn with_settings(mut self, category: Category, count: QuestionCount) -> Self {
        self.app = App::new(category, count);
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app, &self.source).await
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Generate(StartRequest),
    Quit,
}

async fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    source: &Arc<dyn QuestionSource>,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<(Uuid, LoadedQuestions)>();

    loop {
        while let Ok((ticket, loaded)) = rx.try_recv() {
            app.finish_loading(ticket, loaded);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(Duration::ZERO)? {
            tokio::time::sleep(POLL_INTERVAL).await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_input(app, key.code) {
                Action::None => {}
                Action::Generate(request) => {
                    spawn_generation(Arc::clone(source), request, tx.clone());
                }
                Action::Quit => break,
            }
        }
    }

    info!("quitting");
    Ok(())
}

/// Fetch questions off the UI loop and post them back tagged with the ticket.
fn spawn_generation(
    source: Arc<dyn QuestionSource>,
    request: StartRequest,
    tx: mpsc::UnboundedSender<(Uuid, LoadedQuestions)>,
) {
    tokio::spawn(async move {
        let loaded = load_questions(source.as_ref(), request.category, request.count).await;
        // The receiver is gone only when the UI has already quit.
        let _ = tx.send((request.ticket, loaded));
    });
}

fn handle_input(app: &mut App, key: KeyCode) -> Action {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Action::Quit;
    }

    match app.state() {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Loading => handle_loading_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_category(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.decrease_count(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.increase_count(),
        KeyCode::Enter => {
            if let Some(request) = app.start_quiz() {
                return Action::Generate(request);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_loading_input(app: &mut App, key: KeyCode) -> Action {
    if matches!(key, KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('R')) {
        app.restart();
    }
    Action::None
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit(),
        KeyCode::Char('n') => app.next_question(),
        KeyCode::Char('5') => app.use_fifty_fifty(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.use_flip(),
        KeyCode::Char('p') | KeyCode::Char('P') => app.use_pass(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        _ => {}
    }
    Action::None
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_from_any_screen() {
        let mut app = App::default();
        assert_eq!(handle_input(&mut app, KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn test_enter_on_welcome_requests_questions() {
        let mut app = App::default();
        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char('l'));

        let Action::Generate(request) = handle_input(&mut app, KeyCode::Enter) else {
            panic!("expected a generation request");
        };
        assert_eq!(request.category, Category::ClassicHorror);
        assert_eq!(request.count.get(), 11);
        assert_eq!(app.state(), AppState::Loading);

        // A second Enter while loading does nothing.
        assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::None);
    }

    #[test]
    fn test_cancel_loading() {
        let mut app = App::default();
        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), AppState::Welcome);
    }

    #[test]
    fn test_quiz_keys_drive_lifelines() {
        let mut app = App::default();
        let Action::Generate(request) = handle_input(&mut app, KeyCode::Enter) else {
            panic!("expected a generation request");
        };
        let loaded = LoadedQuestions {
            questions: fallback_questions(request.category, request.count, "test"),
            fallback_reason: Some("test".to_string()),
        };
        app.finish_loading(request.ticket, loaded);

        handle_input(&mut app, KeyCode::Char('f'));
        assert_eq!(app.remaining_lifeline(Lifeline::Flip), 0);
        assert_eq!(app.session().unwrap().question_number(), 2);

        handle_input(&mut app, KeyCode::Char('5'));
        assert_eq!(app.remaining_lifeline(Lifeline::FiftyFifty), 0);

        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state(), AppState::Welcome);
    }

    #[tokio::test]
    async fn test_spawned_generation_posts_result() {
        let mut app = App::default();
        let request = app.start_quiz().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_generation(Arc::new(OfflineSource::default()), request, tx);
        let (ticket, loaded) = rx.recv().await.unwrap();
        assert_eq!(ticket, request.ticket);

        app.finish_loading(ticket, loaded);
        assert_eq!(app.state(), AppState::Quiz);
        assert_eq!(app.total_questions(), 10);
    }
}
