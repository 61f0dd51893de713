//! Game state machine.
//!
//! [`Game`] owns at most one [`GameSession`] and moves through
//! `NotStarted → Generating → InProgress → Finished`. Every transition either
//! succeeds or returns a [`GameError`]; nothing here panics on bad input.

mod lifeline;
mod session;

use tracing::{debug, info, warn};
use uuid::Uuid;

pub use lifeline::{Lifeline, LifelineState, USES_PER_GAME};
pub use session::{AnswerFeedback, GameSession, GameStatus, QuestionOutcome};

use crate::error::GameError;
use crate::generator::{LoadedQuestions, QuestionSource, load_questions};
use crate::models::{Category, QuestionCount};

/// Where the game currently is.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    /// Waiting for questions requested under `ticket`.
    Generating {
        ticket: Uuid,
        category: Category,
        count: QuestionCount,
    },
    Active(GameSession),
}

/// A pending request for questions, returned by [`Game::begin_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRequest {
    pub ticket: Uuid,
    pub category: Category,
    pub count: QuestionCount,
}

/// The single game a player is playing.
#[derive(Debug, Clone, Default)]
pub struct Game {
    phase: Phase,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> Option<&GameSession> {
        match &self.phase {
            Phase::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.phase, Phase::Generating { .. })
    }

    /// Request questions for a new game. Only valid before a game exists.
    pub fn begin_start(&mut self, category: Category, count: QuestionCount) -> Result<StartRequest, GameError> {
        if !matches!(self.phase, Phase::NotStarted) {
            return Err(GameError::InvalidTransition("Restart before starting a new game."));
        }

        let request = StartRequest {
            ticket: Uuid::new_v4(),
            category,
            count,
        };
        self.phase = Phase::Generating {
            ticket: request.ticket,
            category,
            count,
        };
        debug!(ticket = %request.ticket, category = %category, count = count.get(), "waiting for questions");

        Ok(request)
    }

    /// The request still waiting for questions, if any.
    pub fn pending_request(&self) -> Option<StartRequest> {
        match self.phase {
            Phase::Generating {
                ticket,
                category,
                count,
            } => Some(StartRequest {
                ticket,
                category,
                count,
            }),
            _ => None,
        }
    }

    /// Install the questions for `ticket`. Results for any other ticket
    /// belong to a replaced game and are dropped.
    ///
    /// The set must hold exactly the requested number of questions. A
    /// mismatch leaves the request pending so the caller can supply a
    /// replacement under the same ticket.
    pub fn complete_start(&mut self, ticket: Uuid, loaded: LoadedQuestions) -> Result<&GameSession, GameError> {
        let (category, count) = match &self.phase {
            Phase::Generating {
                ticket: pending,
                category,
                count,
            } if *pending == ticket => (*category, *count),
            _ => {
                debug!(%ticket, "dropping questions for a stale game");
                return Err(GameError::StaleGeneration);
            }
        };

        if loaded.questions.len() != count.get() {
            warn!(
                %ticket,
                requested = count.get(),
                received = loaded.questions.len(),
                "rejecting questions of the wrong length"
            );
            return Err(GameError::QuestionCountMismatch {
                requested: count.get(),
                received: loaded.questions.len(),
            });
        }

        let session = GameSession::new(category, loaded.questions, loaded.fallback_reason);
        info!(
            session = %session.id(),
            category = %category,
            count = count.get(),
            offline = session.fallback_reason().is_some(),
            "game started"
        );
        self.phase = Phase::Active(session);

        match &self.phase {
            Phase::Active(session) => Ok(session),
            _ => Err(GameError::InvalidTransition("The game did not start.")),
        }
    }

    /// Start a game, waiting for the questions inline.
    pub async fn start(
        &mut self,
        source: &dyn QuestionSource,
        category: Category,
        count: QuestionCount,
    ) -> Result<&GameSession, GameError> {
        let request = self.begin_start(category, count)?;
        let loaded = load_questions(source, category, count).await;
        self.complete_start(request.ticket, loaded)
    }

    /// Drop the current game or pending request. Valid in any phase.
    pub fn restart(&mut self) {
        debug!("restarting");
        self.phase = Phase::NotStarted;
    }

    fn active_mut(&mut self) -> Result<&mut GameSession, GameError> {
        match &mut self.phase {
            Phase::Active(session) => Ok(session),
            Phase::Generating { .. } => Err(GameError::InvalidTransition("Questions are still loading.")),
            Phase::NotStarted => Err(GameError::InvalidTransition("Start a game first.")),
        }
    }

    pub fn answer(&mut self, selected: usize) -> Result<AnswerFeedback, GameError> {
        self.active_mut()?.answer(selected)
    }

    pub fn next(&mut self) -> Result<GameStatus, GameError> {
        self.active_mut()?.next()
    }

    pub fn use_fifty_fifty(&mut self) -> Result<[usize; 2], GameError> {
        self.active_mut()?.use_fifty_fifty()
    }

    pub fn use_flip(&mut self) -> Result<(), GameError> {
        self.active_mut()?.use_flip()
    }

    pub fn use_pass(&mut self) -> Result<(), GameError> {
        self.active_mut()?.use_pass()
    }
}
