//! Selection cursor and its on-screen markers.

use crate::board::BoardLayout;
use crate::term::SpriteId;
use crate::types::{PlayerIndex, LAYOUT_Y_CELL_OFFSET};
use crate::world::{Components, CursorMarker, Entity, World};

/// Board cursor. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: u8,
    pub y: u8,
}

impl Cursor {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Move by (`dx`, `dy`), wrapping on both axes.
    pub fn shift(&mut self, dx: i8, dy: i8, width: u8, height: u8) {
        self.x = wrap(self.x, dx, width);
        self.y = wrap(self.y, dy, height);
    }

    /// Pull the cursor back inside a (possibly smaller) board.
    pub fn clamp_to(&mut self, width: u8, height: u8) {
        self.x = wrap(self.x, 0, width);
        self.y = wrap(self.y, 0, height);
    }
}

fn wrap(v: u8, d: i8, len: u8) -> u8 {
    if len == 0 {
        return 0;
    }
    (v as i32 + d as i32).rem_euclid(len as i32) as u8
}

/// The pair of horizontal bars drawn above and below the cursor cell.
#[derive(Debug, Clone)]
pub struct CursorMarkers {
    entities: [Entity; 2],
}

impl CursorMarkers {
    /// Spawn both markers, hidden until the first cursor position arrives.
    pub fn spawn(world: &mut World, layout: &BoardLayout, marker_width: u16) -> Self {
        let dx = (layout.cell_width - marker_width as i32) / 2;
        let offsets = [
            (dx, -LAYOUT_Y_CELL_OFFSET),
            (dx, LAYOUT_Y_CELL_OFFSET + layout.cell_height - 1),
        ];
        let entities = offsets.map(|(dx, dy)| {
            world.spawn(Components {
                marker: Some(CursorMarker {
                    dx,
                    dy,
                    owner: None,
                }),
                ..Components::default()
            })
        });
        Self { entities }
    }

    pub fn entities(&self) -> [Entity; 2] {
        self.entities
    }

    /// Show the markers around (`x`, `y`).
    pub fn place(&self, world: &mut World, layout: &BoardLayout, player: PlayerIndex, x: u8, y: u8) {
        let cell = layout.cell_position(y, x);
        for e in self.entities {
            if let Some(c) = world.get_mut(e) {
                if let Some(marker) = c.marker.as_mut() {
                    marker.owner = Some(player);
                    c.transform = Some(cell.offset(marker.dx, marker.dy));
                    c.sprite = Some(SpriteId::HorCursor);
                }
            }
        }
    }

    pub fn hide(&self, world: &mut World) {
        for e in self.entities {
            if let Some(c) = world.get_mut(e) {
                c.sprite = None;
            }
        }
    }
}
