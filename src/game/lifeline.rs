use std::fmt;

use crate::error::GameError;

/// Uses granted for each lifeline per game.
pub const USES_PER_GAME: u8 = 1;

/// A limited-use power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifeline {
    FiftyFifty,
    Flip,
    Pass,
}

impl Lifeline {
    pub const ALL: [Lifeline; 3] = [Lifeline::FiftyFifty, Lifeline::Flip, Lifeline::Pass];

    pub fn label(self) -> &'static str {
        match self {
            Lifeline::FiftyFifty => "50-50",
            Lifeline::Flip => "Flip",
            Lifeline::Pass => "Pass",
        }
    }
}

impl fmt::Display for Lifeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Remaining uses per lifeline. Only ever counts down within a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifelineState {
    fifty_fifty: u8,
    flip: u8,
    pass: u8,
}

impl Default for LifelineState {
    fn default() -> Self {
        Self {
            fifty_fifty: USES_PER_GAME,
            flip: USES_PER_GAME,
            pass: USES_PER_GAME,
        }
    }
}

impl LifelineState {
    fn slot(&mut self, lifeline: Lifeline) -> &mut u8 {
        match lifeline {
            Lifeline::FiftyFifty => &mut self.fifty_fifty,
            Lifeline::Flip => &mut self.flip,
            Lifeline::Pass => &mut self.pass,
        }
    }

    pub fn remaining(&self, lifeline: Lifeline) -> u8 {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty,
            Lifeline::Flip => self.flip,
            Lifeline::Pass => self.pass,
        }
    }

    pub fn is_available(&self, lifeline: Lifeline) -> bool {
        self.remaining(lifeline) > 0
    }

    /// Fail with [`GameError::LifelineExhausted`] if no use is left.
    pub fn ensure_available(&self, lifeline: Lifeline) -> Result<(), GameError> {
        if self.is_available(lifeline) {
            Ok(())
        } else {
            Err(GameError::LifelineExhausted(lifeline))
        }
    }

    /// Spend one use.
    pub fn consume(&mut self, lifeline: Lifeline) -> Result<(), GameError> {
        self.ensure_available(lifeline)?;
        *self.slot(lifeline) -= 1;
        Ok(())
    }
}
