//! Players: the two ways a move gets chosen.
//!
//! The set is closed. An [`InteractivePlayer`] is driven by key events on
//! the scheduler thread; an [`AutonomousPlayer`] hands a state snapshot to a
//! blocking decision procedure on a worker and is polled once per tick.

mod autonomous;
mod interactive;

pub use autonomous::{AutonomousPlayer, DecisionPool};
pub use interactive::InteractivePlayer;

use crate::core::GameModel;
use crate::error::EngineError;
use crate::events::GameEvent;
use crate::types::{LogicalKey, PlayerIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Interactive,
    Autonomous,
}

impl PlayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Interactive => "interactive",
            PlayerKind::Autonomous => "autonomous",
        }
    }
}

pub enum Player<S: GameModel> {
    Interactive(InteractivePlayer<S>),
    Autonomous(AutonomousPlayer<S>),
}

impl<S: GameModel> Player<S> {
    pub fn kind(&self) -> PlayerKind {
        match self {
            Player::Interactive(_) => PlayerKind::Interactive,
            Player::Autonomous(_) => PlayerKind::Autonomous,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Player::Interactive(_) => "user",
            Player::Autonomous(p) => p.name(),
        }
    }

    /// Ask the player to choose a move for `state`.
    ///
    /// May return an immediate follow-up event (the interactive cursor).
    pub fn begin_turn(
        &mut self,
        index: PlayerIndex,
        state: &S,
        frame: u64,
    ) -> Result<Option<GameEvent>, EngineError> {
        match self {
            Player::Interactive(p) => Ok(Some(p.begin_turn(index, state, frame))),
            Player::Autonomous(p) => {
                p.begin_turn(index, state)?;
                Ok(None)
            }
        }
    }

    pub fn on_key(&mut self, index: PlayerIndex, key: LogicalKey, frame: u64) -> Option<GameEvent> {
        match self {
            Player::Interactive(p) => p.on_key(index, key, frame),
            Player::Autonomous(_) => None,
        }
    }

    /// Collect a finished decision, if any.
    pub fn poll(&mut self, index: PlayerIndex) -> Result<Option<GameEvent>, EngineError> {
        match self {
            Player::Interactive(_) => Ok(None),
            Player::Autonomous(p) => p.poll(index),
        }
    }

    /// Hand the turn back after a proposal was turned down.
    pub(crate) fn rearm(&mut self, state: &S) {
        if let Player::Interactive(p) = self {
            p.rearm(state);
        }
    }

    pub fn as_interactive(&self) -> Option<&InteractivePlayer<S>> {
        match self {
            Player::Interactive(p) => Some(p),
            Player::Autonomous(_) => None,
        }
    }

    pub fn as_autonomous(&self) -> Option<&AutonomousPlayer<S>> {
        match self {
            Player::Autonomous(p) => Some(p),
            Player::Interactive(_) => None,
        }
    }
}

impl<S: GameModel> From<InteractivePlayer<S>> for Player<S> {
    fn from(p: InteractivePlayer<S>) -> Self {
        Player::Interactive(p)
    }
}

impl<S: GameModel> From<AutonomousPlayer<S>> for Player<S> {
    fn from(p: AutonomousPlayer<S>) -> Self {
        Player::Autonomous(p)
    }
}
