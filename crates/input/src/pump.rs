//! Per-tick terminal input collection.

use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event};

use crate::map::handle_key_event;
use crate::types::LogicalKey;

/// Most key presses handled in one tick. Anything beyond stays queued in
/// the terminal and is picked up by the next tick.
pub const MAX_KEYS_PER_TICK: usize = 16;

pub type KeyBatch = ArrayVec<LogicalKey, MAX_KEYS_PER_TICK>;

/// Input gathered for one tick.
#[derive(Debug, Default, Clone)]
pub struct TickInput {
    pub keys: KeyBatch,
    /// The terminal was resized; presenters should redraw fully.
    pub resized: bool,
}

impl TickInput {
    pub fn quit_requested(&self) -> bool {
        self.keys.contains(&LogicalKey::Quit)
    }

    /// Fold one terminal event in. Returns false once the batch is full.
    pub fn push_event(&mut self, ev: Event) -> bool {
        match ev {
            Event::Key(key) => {
                if let Some(k) = handle_key_event(key) {
                    // Capacity is checked before every read, so this cannot overflow.
                    let _ = self.keys.try_push(k);
                }
            }
            Event::Resize(_, _) => self.resized = true,
            _ => {}
        }
        !self.keys.is_full()
    }
}

/// Drains the crossterm event queue once per tick.
#[derive(Debug, Default)]
pub struct InputPump;

impl InputPump {
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for the first event, then drain whatever else
    /// is already pending without blocking.
    pub fn poll(&mut self, timeout: Duration) -> Result<TickInput> {
        let mut input = TickInput::default();
        let mut wait = timeout;
        while !input.keys.is_full() && event::poll(wait)? {
            if !input.push_event(event::read()?) {
                break;
            }
            wait = Duration::ZERO;
        }
        Ok(input)
    }
}
