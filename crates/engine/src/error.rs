use thiserror::Error;
use tracing::error;

use crate::core::RulesError;
use crate::types::{Move, PlayerIndex};

#[derive(Debug, Error)]
pub enum EngineError {
    /// An autonomous decision procedure broke its contract.
    #[error("autonomous player {player} proposed illegal move {mv}")]
    IllegalAutonomousMove { player: PlayerIndex, mv: Move },

    #[error("decision procedure of player {player} failed: {reason}")]
    DecisionFailed { player: PlayerIndex, reason: String },

    /// The rules model refused a move that had passed validation.
    #[error("rules model rejected a validated move: {0}")]
    Rules(#[from] RulesError),

    #[error("rules model expects {expected} players, {got} configured")]
    PlayerCount { expected: usize, got: usize },

    #[error("turn engine invariant violated: {0}")]
    Invariant(String),

    #[error("failed to start decision workers: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("presentation failed: {0:#}")]
    Present(anyhow::Error),
}

impl EngineError {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        error!(%msg, "turn engine invariant violated");
        EngineError::Invariant(msg)
    }
}
