//! Entity registry.
//!
//! A deliberately small entity store: generation-checked handles and a fixed
//! set of component columns. Creation order is tracked so that drawing is
//! stable (later entities are painted over earlier ones).

use crate::term::SpriteId;
use crate::types::{Occupant, PlayerIndex};

/// Opaque entity handle. Stale handles (destroyed entities) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Top-left screen position of an entity, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub x: i32,
    pub y: i32,
}

impl Transform {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Marks an entity as the placed piece of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPiece {
    pub row: u8,
    pub column: u8,
    pub occupant: Occupant,
}

/// A visual cursor marker, drawn at the cursor cell plus a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMarker {
    pub dx: i32,
    pub dy: i32,
    /// Player whose cursor was shown last.
    pub owner: Option<PlayerIndex>,
}

/// Component set of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    pub transform: Option<Transform>,
    pub sprite: Option<SpriteId>,
    pub piece: Option<CellPiece>,
    pub marker: Option<CursorMarker>,
}

impl Components {
    pub fn drawable(transform: Transform, sprite: SpriteId) -> Self {
        Self {
            transform: Some(transform),
            sprite: Some(sprite),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    components: Option<Components>,
}

#[derive(Debug, Clone, Default)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live entities in creation order.
    order: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, components: Components) -> Entity {
        let entity = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.components = Some(components);
                Entity {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    components: Some(components),
                });
                Entity {
                    index,
                    generation: 0,
                }
            }
        };
        self.order.push(entity);
        entity
    }

    /// Destroy an entity and all of its components.
    ///
    /// Returns the removed components, `None` for a stale handle.
    pub fn despawn(&mut self, entity: Entity) -> Option<Components> {
        let slot = self.live_slot_mut(entity)?;
        let components = slot.components.take();
        self.free.push(entity.index);
        self.order.retain(|&e| e != entity);
        components
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, entity: Entity) -> Option<&Components> {
        let slot = self.slots.get(entity.index as usize)?;
        if slot.generation != entity.generation {
            return None;
        }
        slot.components.as_ref()
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut Components> {
        self.live_slot_mut(entity)?.components.as_mut()
    }

    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.get(entity).and_then(|c| c.transform)
    }

    pub fn sprite(&self, entity: Entity) -> Option<SpriteId> {
        self.get(entity).and_then(|c| c.sprite)
    }

    /// Entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Every entity with both a position and a sprite, in creation order.
    pub fn drawables(&self) -> impl Iterator<Item = (Entity, Transform, SpriteId)> + '_ {
        self.order.iter().filter_map(|&e| {
            let c = self.get(e)?;
            Some((e, c.transform?, c.sprite?))
        })
    }

    fn live_slot_mut(&mut self, entity: Entity) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(entity.index as usize)?;
        if slot.generation != entity.generation || slot.components.is_none() {
            return None;
        }
        Some(slot)
    }
}
