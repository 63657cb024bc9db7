//! The rules oracle consumed by the turn engine.

use thiserror::Error;

use crate::types::{Move, Occupant, Outcome, PlayerIndex};

/// Why a rules model refused to apply a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("cell ({row},{column}) is outside the {width}x{height} board")]
    OutOfBounds {
        row: u8,
        column: u8,
        width: u8,
        height: u8,
    },
    #[error("player {got} moved but it is player {expected}'s turn")]
    WrongPlayer {
        expected: PlayerIndex,
        got: PlayerIndex,
    },
    #[error("cell ({row},{column}) is not available to player {player}")]
    Occupied {
        player: PlayerIndex,
        row: u8,
        column: u8,
    },
    #[error("the game is already over")]
    GameOver,
}

/// An immutable game state together with its rules.
///
/// Implementations never mutate `self`; [`GameModel::apply`] produces the
/// successor state. Values are shipped to background decision procedures,
/// hence the `Send + Sync + 'static` bound.
pub trait GameModel: Clone + Send + Sync + 'static {
    /// Board width in cells (columns).
    fn width(&self) -> u8;

    /// Board height in cells (rows).
    fn height(&self) -> u8;

    fn player_count(&self) -> usize;

    /// The player expected to move in this state.
    fn active_player(&self) -> PlayerIndex;

    /// Every legal move in this state. Empty once the game is over.
    fn legal_moves(&self) -> Vec<Move>;

    fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    /// Apply a move, producing the next state.
    ///
    /// Fails for moves outside the legal set; callers are expected to check
    /// [`GameModel::is_legal`] first.
    fn apply(&self, mv: Move) -> Result<Self, RulesError>;

    /// Terminal predicate: `Some` once the game has finished.
    fn outcome(&self) -> Option<Outcome>;

    /// Board projection: what occupies (row, column), if anything.
    fn occupant(&self, row: u8, column: u8) -> Option<Occupant>;
}
