#![allow(dead_code)]

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use corsoab::core::{CorsoState, GameModel, Strategy};
use corsoab::engine::{Game, InteractivePlayer, Player, RenderPolicy};
use corsoab::term::NullPresenter;
use corsoab::types::{LogicalKey, Move};

pub fn two_humans(state: CorsoState, policy: RenderPolicy) -> Game<CorsoState> {
    let players = vec![
        Player::Interactive(InteractivePlayer::new()),
        Player::Interactive(InteractivePlayer::new()),
    ];
    Game::new(state, players, policy, Box::new(NullPresenter::new())).unwrap()
}

/// Keys that walk `player`'s cursor to (`row`, `column`) and confirm.
pub fn keys_to(game: &Game<CorsoState>, player: usize, row: u8, column: u8) -> Vec<LogicalKey> {
    let cursor = game
        .player(player)
        .and_then(Player::as_interactive)
        .expect("interactive player")
        .cursor();
    let mut keys = Vec::new();
    keys.extend((cursor.x..column).map(|_| LogicalKey::Right));
    keys.extend((column..cursor.x).map(|_| LogicalKey::Left));
    keys.extend((cursor.y..row).map(|_| LogicalKey::Down));
    keys.extend((row..cursor.y).map(|_| LogicalKey::Up));
    keys.push(LogicalKey::Confirm);
    keys
}

/// Spin until the autonomous `player` has an answer ready.
pub fn wait_for_decision(game: &Game<CorsoState>, player: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let finished = game
            .player(player)
            .and_then(Player::as_autonomous)
            .is_some_and(|p| p.computation_finished());
        if finished {
            return;
        }
        assert!(Instant::now() < deadline, "decision of player {player} never finished");
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// Blocks until the test opens the gate, then answers with a fixed move.
pub struct GatedStrategy {
    pub gate: Receiver<()>,
    pub answer: Move,
}

impl Strategy<CorsoState> for GatedStrategy {
    fn name(&self) -> &str {
        "gated"
    }

    fn choose(&mut self, _state: &CorsoState) -> Option<Move> {
        let _ = self.gate.recv();
        Some(self.answer)
    }
}

/// First legal move in row-major order.
pub fn first_legal(state: &CorsoState) -> Move {
    state.legal_moves()[0]
}
