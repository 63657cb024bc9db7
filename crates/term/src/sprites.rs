//! Built-in sprite set.
//!
//! Marbles and dyes exist in two designs; players beyond the second reuse
//! them alternately.

use std::collections::HashMap;

use crate::surface::Sprite;
use crate::types::{Occupant, PieceKind};

/// Identifies a sprite in a [`SpriteBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Marble1,
    Marble2,
    Dye1,
    Dye2,
    HorCursor,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Marble1,
        SpriteId::Marble2,
        SpriteId::Dye1,
        SpriteId::Dye2,
        SpriteId::HorCursor,
    ];

    /// Sprite used to draw a board occupant.
    pub fn for_occupant(occ: Occupant) -> Self {
        let first = occ.player % 2 == 0;
        match (occ.kind, first) {
            (PieceKind::Marble, true) => SpriteId::Marble1,
            (PieceKind::Marble, false) => SpriteId::Marble2,
            (PieceKind::Dye, true) => SpriteId::Dye1,
            (PieceKind::Dye, false) => SpriteId::Dye2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteId::Marble1 => "sprites/marble1",
            SpriteId::Marble2 => "sprites/marble2",
            SpriteId::Dye1 => "sprites/dye1",
            SpriteId::Dye2 => "sprites/dye2",
            SpriteId::HorCursor => "sprites/hor_cursor",
        }
    }
}

const MARBLE1: [&str; 11] = [
    "...#####...",
    "..#######..",
    ".#########.",
    "###########",
    "###########",
    "###########",
    "###########",
    "###########",
    ".#########.",
    "..#######..",
    "...#####...",
];

const MARBLE2: [&str; 11] = [
    "...#####...",
    "..#-----#..",
    ".#-------#.",
    "#---------#",
    "#---------#",
    "#----#----#",
    "#---------#",
    "#---------#",
    ".#-------#.",
    "..#-----#..",
    "...#####...",
];

const DYE1: [&str; 11] = [
    "...........",
    "...........",
    "...........",
    "....###....",
    "...#####...",
    "...#####...",
    "...#####...",
    "....###....",
    "...........",
    "...........",
    "...........",
];

const DYE2: [&str; 11] = [
    "...........",
    "...........",
    "...........",
    "....###....",
    "...#---#...",
    "...#---#...",
    "...#---#...",
    "....###....",
    "...........",
    "...........",
    "...........",
];

const HOR_CURSOR: [&str; 1] = ["#######"];

/// Sprite lookup owned by the game context.
#[derive(Debug, Clone)]
pub struct SpriteBank {
    sprites: HashMap<SpriteId, Sprite>,
}

impl SpriteBank {
    /// The compiled-in sprite set.
    pub fn builtin() -> Self {
        let mut sprites = HashMap::new();
        sprites.insert(SpriteId::Marble1, Sprite::from_rows(&MARBLE1));
        sprites.insert(SpriteId::Marble2, Sprite::from_rows(&MARBLE2));
        sprites.insert(SpriteId::Dye1, Sprite::from_rows(&DYE1));
        sprites.insert(SpriteId::Dye2, Sprite::from_rows(&DYE2));
        sprites.insert(SpriteId::HorCursor, Sprite::from_rows(&HOR_CURSOR));
        Self { sprites }
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Replace or add a sprite.
    pub fn insert(&mut self, id: SpriteId, sprite: Sprite) {
        self.sprites.insert(id, sprite);
    }

    /// Size of the cell sprites, used for board layout.
    pub fn cell_size(&self) -> (u16, u16) {
        self.get(SpriteId::Marble1)
            .map(|s| (s.width(), s.height()))
            .unwrap_or((0, 0))
    }
}

impl Default for SpriteBank {
    fn default() -> Self {
        Self::builtin()
    }
}
