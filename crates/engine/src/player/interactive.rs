use tracing::debug;

use crate::core::GameModel;
use crate::cursor::Cursor;
use crate::events::GameEvent;
use crate::types::{LogicalKey, Move, PlayerIndex};

/// A human at the keyboard or joystick.
///
/// Between `begin_turn` and a confirmed move the player is *armed* with the
/// state it must choose for. Keys arriving in the frame `begin_turn` ran in
/// and the frame after it are dropped, so the confirm that ended the previous
/// turn cannot also start this one.
#[derive(Debug, Clone)]
pub struct InteractivePlayer<S> {
    cursor: Cursor,
    armed: Option<S>,
    blocked_until: u64,
}

impl<S: GameModel> InteractivePlayer<S> {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::default(),
            armed: None,
            blocked_until: 0,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Whether keys delivered during `frame` are ignored.
    pub fn is_blocked(&self, frame: u64) -> bool {
        frame <= self.blocked_until
    }

    pub(crate) fn begin_turn(&mut self, index: PlayerIndex, state: &S, frame: u64) -> GameEvent {
        self.cursor.clamp_to(state.width(), state.height());
        self.armed = Some(state.clone());
        self.blocked_until = frame + 1;
        debug!(player = index, frame, "interactive turn armed");
        self.cursor_event(index)
    }

    pub(crate) fn rearm(&mut self, state: &S) {
        self.armed = Some(state.clone());
    }

    pub(crate) fn on_key(&mut self, index: PlayerIndex, key: LogicalKey, frame: u64) -> Option<GameEvent> {
        let state = self.armed.as_ref()?;
        if self.is_blocked(frame) {
            return None;
        }

        if let Some((dx, dy)) = key.direction() {
            self.cursor.shift(dx, dy, state.width(), state.height());
            return Some(self.cursor_event(index));
        }

        if key != LogicalKey::Confirm {
            return None;
        }

        let mv = Move::new(state.active_player(), self.cursor.y, self.cursor.x);
        if !state.is_legal(&mv) {
            debug!(%mv, "confirm on unavailable cell ignored");
            return None;
        }
        self.armed = None;
        Some(GameEvent::MoveProposed { source: index, mv })
    }

    fn cursor_event(&self, index: PlayerIndex) -> GameEvent {
        GameEvent::CursorMoved {
            player: index,
            x: self.cursor.x,
            y: self.cursor.y,
        }
    }
}

impl<S: GameModel> Default for InteractivePlayer<S> {
    fn default() -> Self {
        Self::new()
    }
}
