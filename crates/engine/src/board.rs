//! Board registry: which entity currently draws each cell.
//!
//! The registry is a pure view of the rules state. After every accepted
//! move the orchestrator calls [`BoardRegistry::sync`], which replaces the
//! entity of every cell whose occupant changed and leaves the rest alone.

use tracing::trace;

use crate::core::GameModel;
use crate::term::SpriteId;
use crate::types::{Occupant, LAYOUT_START_X, LAYOUT_START_Y, LAYOUT_X_CELL_OFFSET, LAYOUT_Y_CELL_OFFSET};
use crate::world::{CellPiece, Components, Entity, Transform, World};

/// Screen placement of the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    pub gap_x: i32,
    pub gap_y: i32,
}

impl BoardLayout {
    /// Standard layout for cell sprites of the given size.
    pub fn for_cell_size(cell_width: u16, cell_height: u16) -> Self {
        Self {
            origin_x: LAYOUT_START_X,
            origin_y: LAYOUT_START_Y,
            cell_width: cell_width as i32,
            cell_height: cell_height as i32,
            gap_x: LAYOUT_X_CELL_OFFSET,
            gap_y: LAYOUT_Y_CELL_OFFSET,
        }
    }

    /// Top-left of the cell at (`row`, `column`). Columns run along x.
    pub fn cell_position(&self, row: u8, column: u8) -> Transform {
        Transform::new(
            self.origin_x + column as i32 * (self.cell_width + self.gap_x),
            self.origin_y + row as i32 * (self.cell_height + self.gap_y),
        )
    }

    /// Right and bottom edge (exclusive) of a `width` x `height` board.
    pub fn extent(&self, width: u8, height: u8) -> (i32, i32) {
        let last = self.cell_position(height.saturating_sub(1), width.saturating_sub(1));
        (last.x + self.cell_width, last.y + self.cell_height)
    }

    /// Whether every cell of the board lies on a `surface_w` x `surface_h` surface.
    pub fn fits(&self, width: u8, height: u8, surface_w: u16, surface_h: u16) -> bool {
        let (right, bottom) = self.extent(width, height);
        right <= surface_w as i32 && bottom <= surface_h as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placed {
    entity: Entity,
    occupant: Occupant,
}

#[derive(Debug, Clone)]
pub struct BoardRegistry {
    width: u8,
    height: u8,
    layout: BoardLayout,
    cells: Vec<Option<Placed>>,
}

impl BoardRegistry {
    pub fn new(width: u8, height: u8, layout: BoardLayout) -> Self {
        Self {
            width,
            height,
            layout,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Entity drawing the cell, if any.
    pub fn handle(&self, row: u8, column: u8) -> Option<Entity> {
        self.placed(row, column).map(|p| p.entity)
    }

    /// Occupant the registry last drew for the cell.
    pub fn occupant(&self, row: u8, column: u8) -> Option<Occupant> {
        self.placed(row, column).map(|p| p.occupant)
    }

    /// Number of cells currently backed by an entity.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Bring the registry in line with `state`.
    ///
    /// A changed cell keeps the screen position of the entity it replaces;
    /// a newly filled cell is placed by the layout. Returns the number of
    /// cells that changed.
    pub fn sync<S: GameModel>(&mut self, state: &S, world: &mut World) -> usize {
        let mut changed = 0;
        for row in 0..self.height {
            for column in 0..self.width {
                let i = row as usize * self.width as usize + column as usize;
                let wanted = state.occupant(row, column);
                let current = self.cells[i];
                if current.map(|p| p.occupant) == wanted {
                    continue;
                }

                let mut position = self.layout.cell_position(row, column);
                if let Some(old) = current {
                    if let Some(t) = world.transform(old.entity) {
                        position = t;
                    }
                    world.despawn(old.entity);
                }

                self.cells[i] = wanted.map(|occupant| {
                    let entity = world.spawn(Components {
                        piece: Some(CellPiece {
                            row,
                            column,
                            occupant,
                        }),
                        ..Components::drawable(position, SpriteId::for_occupant(occupant))
                    });
                    Placed { entity, occupant }
                });
                trace!(row, column, ?wanted, "board cell replaced");
                changed += 1;
            }
        }
        changed
    }

    fn placed(&self, row: u8, column: u8) -> Option<Placed> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.cells[row as usize * self.width as usize + column as usize]
    }
}
