//! Blocking decision procedures for autonomous players.
//!
//! A strategy may take arbitrarily long; the engine runs it off the
//! scheduler thread and only ever hands it an immutable state snapshot.

use std::time::Duration;

use tracing::debug;

use crate::model::GameModel;
use crate::rng::SimpleRng;
use crate::types::Move;

/// A (possibly slow) move-selection procedure.
///
/// `choose` returns `None` when it cannot produce a move, which the engine
/// treats as a failed decision.
pub trait Strategy<S: GameModel>: Send + 'static {
    fn name(&self) -> &str;

    fn choose(&mut self, state: &S) -> Option<Move>;
}

/// Plays a uniformly random legal move.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: SimpleRng,
    think_delay: Duration,
}

impl RandomStrategy {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            think_delay: Duration::ZERO,
        }
    }

    /// Sleep this long before answering, so the choice is visible on screen.
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }
}

impl<S: GameModel> Strategy<S> for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, state: &S) -> Option<Move> {
        if !self.think_delay.is_zero() {
            std::thread::sleep(self.think_delay);
        }
        let mv = self.rng.choose(&state.legal_moves());
        debug!(?mv, "random strategy chose");
        mv
    }
}
