//! Turn state machine.
//!
//! ```text
//! AwaitingSelection(p) --MoveProposed--> Validating
//! Validating --illegal--> AwaitingSelection(p)      (or fatal, if autonomous)
//! Validating --legal--> Applying --> CheckTerminal
//! CheckTerminal --terminal--> GameOver              (broadcast once)
//! CheckTerminal --otherwise--> AwaitingSelection((p + 1) % n)
//! ```
//!
//! Everything happens synchronously inside one dispatch, so at most one
//! move is ever in flight.

use tracing::{debug, error, info, warn};

use crate::board::BoardRegistry;
use crate::core::GameModel;
use crate::error::EngineError;
use crate::events::GameEvent;
use crate::player::{Player, PlayerKind};
use crate::render::DirtyFlag;
use crate::types::{LogicalKey, Move, Outcome, PlayerIndex};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Not started yet.
    Idle,
    AwaitingSelection { player: PlayerIndex },
    Validating,
    Applying,
    CheckTerminal,
    GameOver(Outcome),
}

/// The mutable presentation state a move application touches.
pub struct Stage<'a> {
    pub world: &'a mut World,
    pub board: &'a mut BoardRegistry,
    pub dirty: &'a mut DirtyFlag,
}

pub struct Orchestrator<S: GameModel> {
    state: S,
    players: Vec<Player<S>>,
    phase: TurnPhase,
    turns_taken: u64,
    /// `turns_taken` value of the last `begin_turn`.
    begun: Option<u64>,
}

impl<S: GameModel> Orchestrator<S> {
    pub fn new(initial: S, players: Vec<Player<S>>) -> Result<Self, EngineError> {
        if players.len() != initial.player_count() {
            return Err(EngineError::PlayerCount {
                expected: initial.player_count(),
                got: players.len(),
            });
        }
        Ok(Self {
            state: initial,
            players,
            phase: TurnPhase::Idle,
            turns_taken: 0,
            begun: None,
        })
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turns_taken(&self) -> u64 {
        self.turns_taken
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            TurnPhase::GameOver(o) => Some(o),
            _ => None,
        }
    }

    pub fn active_player(&self) -> Option<PlayerIndex> {
        match self.phase {
            TurnPhase::AwaitingSelection { player } => Some(player),
            _ => None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, index: PlayerIndex) -> Option<&Player<S>> {
        self.players.get(index)
    }

    pub fn players(&self) -> &[Player<S>] {
        &self.players
    }

    /// Enter the first turn, or finish at once if the initial state is terminal.
    pub fn start(&mut self, frame: u64) -> Result<Vec<GameEvent>, EngineError> {
        if self.phase != TurnPhase::Idle {
            return Err(EngineError::invariant("orchestrator started twice"));
        }
        if let Some(outcome) = self.state.outcome() {
            return Ok(vec![self.finish(outcome)]);
        }
        self.phase = TurnPhase::AwaitingSelection {
            player: self.state.active_player(),
        };
        self.begin_turn(frame)
    }

    /// Hand a key to player `index`.
    pub fn deliver_key(&mut self, index: PlayerIndex, key: LogicalKey, frame: u64) -> Option<GameEvent> {
        self.players.get_mut(index)?.on_key(index, key, frame)
    }

    /// Check the active player's outstanding decision.
    pub fn poll(&mut self) -> Result<Option<GameEvent>, EngineError> {
        match self.phase {
            TurnPhase::AwaitingSelection { player } => match self.players.get_mut(player) {
                Some(p) => p.poll(player),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Validate and apply a proposal from `source`.
    ///
    /// Returns the follow-up events in the order they must be dispatched.
    pub fn on_move_proposed(
        &mut self,
        source: PlayerIndex,
        mv: Move,
        stage: Stage<'_>,
        frame: u64,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let origin = self
            .players
            .get(source)
            .map(Player::kind)
            .ok_or_else(|| EngineError::invariant(format!("move from unknown player {source}")))?;

        let active = match self.phase {
            TurnPhase::AwaitingSelection { player } => player,
            TurnPhase::GameOver(_) => {
                return match origin {
                    PlayerKind::Interactive => {
                        warn!(%mv, "move proposed after game over ignored");
                        Ok(Vec::new())
                    }
                    PlayerKind::Autonomous => Err(EngineError::invariant(format!(
                        "player {source} proposed {mv} after game over"
                    ))),
                };
            }
            phase => {
                return Err(EngineError::invariant(format!(
                    "move {mv} proposed while {phase:?}"
                )))
            }
        };

        if source != active {
            return match origin {
                PlayerKind::Interactive => {
                    debug!(source, active, "out-of-turn proposal ignored");
                    Ok(Vec::new())
                }
                PlayerKind::Autonomous => Err(EngineError::invariant(format!(
                    "player {source} proposed {mv} during player {active}'s turn"
                ))),
            };
        }

        self.phase = TurnPhase::Validating;
        if mv.player != active || !self.state.is_legal(&mv) {
            self.phase = TurnPhase::AwaitingSelection { player: active };
            return match origin {
                PlayerKind::Interactive => {
                    debug!(%mv, "illegal proposal ignored");
                    self.players[active].rearm(&self.state);
                    Ok(Vec::new())
                }
                PlayerKind::Autonomous => {
                    error!(player = active, %mv, "autonomous player proposed an illegal move");
                    Err(EngineError::IllegalAutonomousMove { player: active, mv })
                }
            };
        }

        self.phase = TurnPhase::Applying;
        self.state = self.state.apply(mv)?;
        self.turns_taken += 1;
        let changed = stage.board.sync(&self.state, stage.world);
        stage.dirty.set();
        info!(%mv, changed, turn = self.turns_taken, "move applied");

        let mut events = vec![GameEvent::MoveApplied(mv)];

        self.phase = TurnPhase::CheckTerminal;
        if let Some(outcome) = self.state.outcome() {
            events.push(self.finish(outcome));
            return Ok(events);
        }

        let next = (active + 1) % self.players.len();
        if self.state.active_player() != next {
            return Err(EngineError::invariant(format!(
                "rules model hands the turn to {} instead of {next}",
                self.state.active_player()
            )));
        }
        self.phase = TurnPhase::AwaitingSelection { player: next };
        events.extend(self.begin_turn(frame)?);
        Ok(events)
    }

    fn begin_turn(&mut self, frame: u64) -> Result<Vec<GameEvent>, EngineError> {
        let TurnPhase::AwaitingSelection { player } = self.phase else {
            return Err(EngineError::invariant(format!(
                "begin_turn while {:?}",
                self.phase
            )));
        };
        if self.begun == Some(self.turns_taken) {
            return Err(EngineError::invariant("begin_turn re-entered for the same turn"));
        }
        self.begun = Some(self.turns_taken);

        let p = &mut self.players[player];
        debug!(player, kind = p.kind().as_str(), name = p.name(), frame, "turn began");
        let mut events = vec![GameEvent::TurnBegan {
            player,
            kind: p.kind(),
        }];
        events.extend(p.begin_turn(player, &self.state, frame)?);
        Ok(events)
    }

    fn finish(&mut self, outcome: Outcome) -> GameEvent {
        self.phase = TurnPhase::GameOver(outcome);
        info!(%outcome, turns = self.turns_taken, "game over");
        GameEvent::GameOver(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;
    use crate::core::CorsoState;
    use crate::player::InteractivePlayer;

    struct Fixture {
        orch: Orchestrator<CorsoState>,
        world: World,
        board: BoardRegistry,
        dirty: DirtyFlag,
    }

    impl Fixture {
        fn new(state: CorsoState) -> Self {
            let players: Vec<Player<CorsoState>> = (0..state.player_count())
                .map(|_| Player::Interactive(InteractivePlayer::new()))
                .collect();
            let board = BoardRegistry::new(
                state.width(),
                state.height(),
                BoardLayout::for_cell_size(11, 11),
            );
            Self {
                orch: Orchestrator::new(state, players).unwrap(),
                world: World::new(),
                board,
                dirty: DirtyFlag::default(),
            }
        }

        fn propose(&mut self, source: PlayerIndex, mv: Move) -> Result<Vec<GameEvent>, EngineError> {
            let stage = Stage {
                world: &mut self.world,
                board: &mut self.board,
                dirty: &mut self.dirty,
            };
            self.orch.on_move_proposed(source, mv, stage, 0)
        }
    }

    #[test]
    fn player_count_must_match_rules() {
        let res = Orchestrator::new(CorsoState::default(), vec![Player::Interactive(InteractivePlayer::new())]);
        assert!(matches!(
            res,
            Err(EngineError::PlayerCount { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn start_begins_first_turn_once() {
        let mut f = Fixture::new(CorsoState::default());
        let events = f.orch.start(0).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::TurnBegan {
                    player: 0,
                    kind: PlayerKind::Interactive
                },
                GameEvent::CursorMoved { player: 0, x: 0, y: 0 },
            ]
        );
        assert_eq!(f.orch.active_player(), Some(0));
        assert!(matches!(f.orch.start(0), Err(EngineError::Invariant(_))));
    }

    #[test]
    fn accepted_move_updates_board_and_advances() {
        let mut f = Fixture::new(CorsoState::default());
        f.orch.start(0).unwrap();

        let events = f.propose(0, Move::new(0, 1, 1)).unwrap();
        assert_eq!(events[0], GameEvent::MoveApplied(Move::new(0, 1, 1)));
        assert!(matches!(events[1], GameEvent::TurnBegan { player: 1, .. }));
        assert_eq!(f.orch.active_player(), Some(1));
        assert_eq!(f.orch.turns_taken(), 1);
        assert_eq!(f.board.occupied(), 5);
        assert!(f.dirty.is_set());
    }

    #[test]
    fn illegal_interactive_proposal_is_ignored() {
        let mut f = Fixture::new(CorsoState::default());
        f.orch.start(0).unwrap();
        f.propose(0, Move::new(0, 0, 0)).unwrap();

        // Player 1 on player 0's marble.
        let events = f.propose(1, Move::new(1, 0, 0)).unwrap();
        assert!(events.is_empty());
        assert_eq!(f.orch.active_player(), Some(1));
        assert_eq!(f.orch.turns_taken(), 1);
        assert!(f.orch.player(1).unwrap().as_interactive().unwrap().is_armed());
    }

    #[test]
    fn out_of_turn_interactive_proposal_is_ignored() {
        let mut f = Fixture::new(CorsoState::default());
        f.orch.start(0).unwrap();
        assert!(f.propose(1, Move::new(1, 2, 2)).unwrap().is_empty());
        assert_eq!(f.orch.active_player(), Some(0));
    }

    #[test]
    fn game_over_is_raised_once_and_locks_the_board() {
        // On a 1x1 board the first move ends the game.
        let mut f = Fixture::new(CorsoState::new(1, 1));
        f.orch.start(0).unwrap();

        let events = f.propose(0, Move::new(0, 0, 0)).unwrap();
        let outcome = Outcome::Win { winner: 0 };
        assert_eq!(
            events,
            vec![
                GameEvent::MoveApplied(Move::new(0, 0, 0)),
                GameEvent::GameOver(outcome)
            ]
        );
        assert_eq!(f.orch.outcome(), Some(outcome));

        assert!(f.propose(1, Move::new(1, 0, 0)).unwrap().is_empty());
        assert_eq!(f.orch.turns_taken(), 1);
        assert!(f.orch.poll().unwrap().is_none());
    }

    #[test]
    fn terminal_initial_state_finishes_on_start() {
        let finished = CorsoState::new(1, 1).apply(Move::new(0, 0, 0)).unwrap();
        let mut f = Fixture::new(finished);
        let events = f.orch.start(0).unwrap();
        assert_eq!(events, vec![GameEvent::GameOver(Outcome::Win { winner: 0 })]);
        assert_eq!(f.orch.active_player(), None);
    }
}
