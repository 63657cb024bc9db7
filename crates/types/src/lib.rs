//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules model, turn engine, presentation, input mapping).
//!
//! # Display Geometry
//!
//! The game is laid out for the Adafruit 128x64 OLED bonnet. The desktop
//! build renders the very same pixel surface into a terminal.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BONNET_WIDTH` | 128 | Surface width in pixels |
//! | `BONNET_HEIGHT` | 64 | Surface height in pixels |
//! | `LAYOUT_START_X` | 32 | Left edge of the board on the surface |
//! | `LAYOUT_START_Y` | 0 | Top edge of the board on the surface |
//! | `LAYOUT_X_CELL_OFFSET` | 1 | Horizontal gap between cells |
//! | `LAYOUT_Y_CELL_OFFSET` | 1 | Vertical gap between cells |
//!
//! # Timing
//!
//! - `TICK_MS`: 16ms - default frame interval (~60 FPS)
//!
//! # Examples
//!
//! ```
//! use corso_types::{LogicalKey, Move, Outcome};
//!
//! let mv = Move::new(0, 0, 2);
//! assert_eq!((mv.player, mv.row, mv.column), (0, 0, 2));
//!
//! assert_eq!(LogicalKey::from_str("confirm"), Some(LogicalKey::Confirm));
//! assert_eq!(LogicalKey::Right.direction(), Some((1, 0)));
//!
//! assert_eq!(Outcome::Win { winner: 1 }.winner(), Some(1));
//! assert_eq!(Outcome::Draw.winner(), None);
//! ```

use std::fmt;

/// Surface width in pixels (SSD1306 panel width)
pub const BONNET_WIDTH: u16 = 128;

/// Surface height in pixels (SSD1306 panel height)
pub const BONNET_HEIGHT: u16 = 64;

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u8 = 5;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u8 = 5;

/// Default number of players
pub const DEFAULT_PLAYER_COUNT: usize = 2;

/// Default frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Left edge of the board layout, in pixels
pub const LAYOUT_START_X: i32 = 32;

/// Top edge of the board layout, in pixels
pub const LAYOUT_START_Y: i32 = 0;

/// Horizontal spacing between board cells, in pixels
pub const LAYOUT_X_CELL_OFFSET: i32 = 1;

/// Vertical spacing between board cells, in pixels
pub const LAYOUT_Y_CELL_OFFSET: i32 = 1;

/// Zero-based position of a player in the turn order.
pub type PlayerIndex = usize;


/// A move: the acting player places on (row, column).
///
/// A move is only meaningful relative to a game state; it is valid when it
/// appears in that state's legal-move set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub player: PlayerIndex,
    pub row: u8,
    pub column: u8,
}

impl Move {
    pub const fn new(player: PlayerIndex, row: u8, column: u8) -> Self {
        Self {
            player,
            row,
            column,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}@({},{})", self.player, self.row, self.column)
    }
}

/// What a player owns on a cell.
///
/// - **Dye**: claimed territory; the owner may later place a marble on it
/// - **Marble**: a placed piece; permanent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Dye,
    Marble,
}

impl PieceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Dye => "dye",
            PieceKind::Marble => "marble",
        }
    }
}

/// Occupant of a non-empty board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub player: PlayerIndex,
    pub kind: PieceKind,
}

impl Occupant {
    pub const fn dye(player: PlayerIndex) -> Self {
        Self {
            player,
            kind: PieceKind::Dye,
        }
    }

    pub const fn marble(player: PlayerIndex) -> Self {
        Self {
            player,
            kind: PieceKind::Marble,
        }
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win { winner: PlayerIndex },
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<PlayerIndex> {
        match self {
            Outcome::Win { winner } => Some(*winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win { winner } => write!(f, "player {winner} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Logical keys understood by the turn engine.
///
/// Every physical input (terminal keys, bonnet joystick and buttons) is
/// mapped into this space before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    /// Place on the cell under the cursor
    Confirm,
    /// Leave the game loop (handled by the runner, ignored by the engine)
    Quit,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 6] = [
        LogicalKey::Up,
        LogicalKey::Down,
        LogicalKey::Left,
        LogicalKey::Right,
        LogicalKey::Confirm,
        LogicalKey::Quit,
    ];

    /// Parse key from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(LogicalKey::Up),
            "down" => Some(LogicalKey::Down),
            "left" => Some(LogicalKey::Left),
            "right" => Some(LogicalKey::Right),
            "confirm" => Some(LogicalKey::Confirm),
            "quit" => Some(LogicalKey::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalKey::Up => "up",
            LogicalKey::Down => "down",
            LogicalKey::Left => "left",
            LogicalKey::Right => "right",
            LogicalKey::Confirm => "confirm",
            LogicalKey::Quit => "quit",
        }
    }

    /// Cursor delta `(dx, dy)` for directional keys.
    ///
    /// `dy` grows downwards, matching screen coordinates.
    pub fn direction(&self) -> Option<(i8, i8)> {
        match self {
            LogicalKey::Up => Some((0, -1)),
            LogicalKey::Down => Some((0, 1)),
            LogicalKey::Left => Some((-1, 0)),
            LogicalKey::Right => Some((1, 0)),
            LogicalKey::Confirm | LogicalKey::Quit => None,
        }
    }
}
