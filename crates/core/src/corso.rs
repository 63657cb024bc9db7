//! Corso rules.
//!
//! Cells are stored row-major. A cell is empty, a player's dye, or a
//! player's marble.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::model::{GameModel, RulesError};
use crate::types::{
    Move, Occupant, Outcome, PieceKind, PlayerIndex, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
    DEFAULT_PLAYER_COUNT,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorsoState {
    width: u8,
    height: u8,
    player_count: usize,
    active: PlayerIndex,
    turn: u32,
    cells: Vec<Option<Occupant>>,
}

impl CorsoState {
    /// Empty two-player board of the given size.
    pub fn new(width: u8, height: u8) -> Self {
        Self::with_players(width, height, DEFAULT_PLAYER_COUNT)
    }

    pub fn with_players(width: u8, height: u8, player_count: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            player_count: player_count.max(1),
            active: 0,
            turn: 0,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Number of moves applied since the initial state.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Cells owned by `player` (marbles and dyes).
    pub fn owned_cells(&self, player: PlayerIndex) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|occ| occ.player == player)
            .count()
    }

    /// Text rendering of the board, one line per row.
    ///
    /// `.` empty, `a`/`b`.. dyes, `A`/`B`.. marbles.
    pub fn board_string(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in 0..self.height {
            for column in 0..self.width {
                let ch = match self.occupant(row, column) {
                    None => '.',
                    Some(occ) => {
                        let base = match occ.kind {
                            PieceKind::Dye => b'a',
                            PieceKind::Marble => b'A',
                        };
                        (base + (occ.player % 26) as u8) as char
                    }
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn idx(&self, row: u8, column: u8) -> Option<usize> {
        if row >= self.height || column >= self.width {
            return None;
        }
        Some(row as usize * self.width as usize + column as usize)
    }

    fn neighbours(&self, row: u8, column: u8) -> ArrayVec<(u8, u8), 4> {
        let mut out = ArrayVec::new();
        if row > 0 {
            out.push((row - 1, column));
        }
        if row + 1 < self.height {
            out.push((row + 1, column));
        }
        if column > 0 {
            out.push((row, column - 1));
        }
        if column + 1 < self.width {
            out.push((row, column + 1));
        }
        out
    }

    fn available_to(&self, player: PlayerIndex, cell: Option<Occupant>) -> bool {
        match cell {
            None => true,
            Some(occ) => occ.player == player && occ.kind == PieceKind::Dye,
        }
    }
}

impl Default for CorsoState {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

impl GameModel for CorsoState {
    fn width(&self) -> u8 {
        self.width
    }

    fn height(&self) -> u8 {
        self.height
    }

    fn player_count(&self) -> usize {
        self.player_count
    }

    fn active_player(&self) -> PlayerIndex {
        self.active
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.height {
            for column in 0..self.width {
                if self.available_to(self.active, self.occupant(row, column)) {
                    moves.push(Move::new(self.active, row, column));
                }
            }
        }
        moves
    }

    fn is_legal(&self, mv: &Move) -> bool {
        mv.player == self.active
            && self
                .idx(mv.row, mv.column)
                .is_some_and(|i| self.available_to(mv.player, self.cells[i]))
    }

    fn apply(&self, mv: Move) -> Result<Self, RulesError> {
        let Some(target) = self.idx(mv.row, mv.column) else {
            return Err(RulesError::OutOfBounds {
                row: mv.row,
                column: mv.column,
                width: self.width,
                height: self.height,
            });
        };
        if mv.player != self.active {
            return Err(RulesError::WrongPlayer {
                expected: self.active,
                got: mv.player,
            });
        }
        if !self.available_to(mv.player, self.cells[target]) {
            return Err(RulesError::Occupied {
                player: mv.player,
                row: mv.row,
                column: mv.column,
            });
        }

        let mut next = self.clone();
        next.cells[target] = Some(Occupant::marble(mv.player));
        for (r, c) in self.neighbours(mv.row, mv.column) {
            let i = r as usize * self.width as usize + c as usize;
            let spreads = match next.cells[i] {
                None => true,
                Some(occ) => occ.kind == PieceKind::Dye && occ.player != mv.player,
            };
            if spreads {
                next.cells[i] = Some(Occupant::dye(mv.player));
            }
        }
        next.active = (self.active + 1) % self.player_count;
        next.turn = self.turn + 1;
        trace!(%mv, turn = next.turn, "corso move applied");
        Ok(next)
    }

    fn outcome(&self) -> Option<Outcome> {
        let has_move = self
            .cells
            .iter()
            .any(|&cell| self.available_to(self.active, cell));
        if has_move {
            return None;
        }

        let counts: Vec<usize> = (0..self.player_count)
            .map(|p| self.owned_cells(p))
            .collect();
        let best = counts.iter().copied().max().unwrap_or(0);
        let mut leaders = counts.iter().enumerate().filter(|(_, &n)| n == best);
        match (leaders.next(), leaders.next()) {
            (Some((winner, _)), None) => Some(Outcome::Win { winner }),
            _ => Some(Outcome::Draw),
        }
    }

    fn occupant(&self, row: u8, column: u8) -> Option<Occupant> {
        self.idx(row, column).and_then(|i| self.cells[i])
    }
}
