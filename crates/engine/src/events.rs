//! Typed publish/subscribe.
//!
//! Events are a closed enum; listeners register against an [`EventTag`].
//! Routing to the engine's own handlers is done by [`crate::Game`]; the bus
//! only fans events out to external listeners (logging, UI status, tests).

use std::collections::HashMap;

use crate::player::PlayerKind;
use crate::types::{LogicalKey, Move, Outcome, PlayerIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A logical key went down.
    KeyDown(LogicalKey),
    /// `player` was asked to select a move.
    TurnBegan { player: PlayerIndex, kind: PlayerKind },
    /// An interactive player's cursor is now at (x, y).
    CursorMoved { player: PlayerIndex, x: u8, y: u8 },
    /// `source` produced a candidate move.
    MoveProposed { source: PlayerIndex, mv: Move },
    /// A move passed validation and was applied.
    MoveApplied(Move),
    /// The game reached a terminal state. Raised exactly once.
    GameOver(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    KeyDown,
    TurnBegan,
    CursorMoved,
    MoveProposed,
    MoveApplied,
    GameOver,
}

impl GameEvent {
    pub fn tag(&self) -> EventTag {
        match self {
            GameEvent::KeyDown(_) => EventTag::KeyDown,
            GameEvent::TurnBegan { .. } => EventTag::TurnBegan,
            GameEvent::CursorMoved { .. } => EventTag::CursorMoved,
            GameEvent::MoveProposed { .. } => EventTag::MoveProposed,
            GameEvent::MoveApplied(_) => EventTag::MoveApplied,
            GameEvent::GameOver(_) => EventTag::GameOver,
        }
    }
}

pub type Listener = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<EventTag, Vec<Listener>>,
    published: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, tag: EventTag, listener: Listener) {
        self.listeners.entry(tag).or_default().push(listener);
    }

    /// Deliver `event` to every listener of its tag, in subscription order.
    pub fn publish(&mut self, event: &GameEvent) {
        self.published += 1;
        if let Some(listeners) = self.listeners.get_mut(&event.tag()) {
            for listener in listeners.iter_mut() {
                listener(event);
            }
        }
    }

    /// Total events published so far.
    pub fn published(&self) -> u64 {
        self.published
    }
}
