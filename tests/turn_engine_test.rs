//! Turn engine behaviour through the public `Game` API.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use corsoab::core::{CorsoState, GameModel, RandomStrategy};
use corsoab::engine::{
    AutonomousPlayer, DecisionPool, EngineError, EventTag, Game, GameEvent, InteractivePlayer,
    Player, PlayerKind, RenderPolicy,
};
use corsoab::term::NullPresenter;
use corsoab::types::{LogicalKey, Move, Occupant, Outcome};

use common::{first_legal, keys_to, two_humans, wait_for_decision, GatedStrategy};

fn recorder(game: &mut Game<CorsoState>, tag: EventTag) -> Rc<RefCell<Vec<GameEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    game.subscribe(tag, Box::new(move |ev| sink.borrow_mut().push(*ev)));
    seen
}

#[test]
fn test_right_right_confirm_places_marble() {
    let mut game = two_humans(CorsoState::default(), RenderPolicy::Unconditional);
    game.start().unwrap();
    game.tick(&[]).unwrap();

    game.tick(&[LogicalKey::Right, LogicalKey::Right, LogicalKey::Confirm])
        .unwrap();

    assert_eq!(game.state().occupant(0, 2), Some(Occupant::marble(0)));
    assert_eq!(game.board().occupant(0, 2), Some(Occupant::marble(0)));
    assert_eq!(game.active_player(), Some(1));
    assert_eq!(game.turns_taken(), 1);
}

#[test]
fn test_keys_during_block_window_are_dropped() {
    let mut game = two_humans(CorsoState::default(), RenderPolicy::Unconditional);
    game.start().unwrap();

    // Tick 1 follows the startup begin_turn: blocked.
    game.tick(&[LogicalKey::Right]).unwrap();
    let cursor = game.player(0).and_then(Player::as_interactive).unwrap().cursor();
    assert_eq!((cursor.x, cursor.y), (0, 0));

    game.tick(&[LogicalKey::Right]).unwrap();
    let cursor = game.player(0).and_then(Player::as_interactive).unwrap().cursor();
    assert_eq!((cursor.x, cursor.y), (1, 0));
}

#[test]
fn test_game_over_is_broadcast_exactly_once() {
    let mut game = two_humans(CorsoState::new(2, 2), RenderPolicy::DirtyGated);
    let over = recorder(&mut game, EventTag::GameOver);
    let applied = recorder(&mut game, EventTag::MoveApplied);
    game.start().unwrap();

    game.tick(&[]).unwrap();
    game.tick(&[LogicalKey::Confirm]).unwrap();
    assert_eq!(game.active_player(), Some(1));

    game.tick(&[]).unwrap();
    let keys = keys_to(&game, 1, 1, 1);
    let report = game.tick(&keys).unwrap();

    let outcome = Outcome::Win { winner: 1 };
    assert_eq!(report.game_over, Some(outcome));
    assert_eq!(*over.borrow(), vec![GameEvent::GameOver(outcome)]);

    for _ in 0..5 {
        let report = game
            .tick(&[LogicalKey::Confirm, LogicalKey::Left, LogicalKey::Confirm])
            .unwrap();
        assert_eq!(report.game_over, Some(outcome));
    }
    assert_eq!(over.borrow().len(), 1);
    assert_eq!(applied.borrow().len(), 2);
    assert_eq!(game.turns_taken(), 2);
    assert_eq!(game.active_player(), None);
}

#[test]
fn test_turns_cycle_through_mixed_players() {
    let pool = DecisionPool::new(2).unwrap();
    let players = vec![
        Player::Interactive(InteractivePlayer::new()),
        Player::Autonomous(AutonomousPlayer::new(RandomStrategy::new(11), pool.handle())),
        Player::Interactive(InteractivePlayer::new()),
    ];
    let state = CorsoState::with_players(5, 5, 3);
    let mut game = Game::new(state, players, RenderPolicy::DirtyGated, Box::new(NullPresenter::new())).unwrap();
    let began = recorder(&mut game, EventTag::TurnBegan);
    game.start().unwrap();

    while !game.is_over() && game.turns_taken() < 9 {
        let active = game.active_player().unwrap();
        assert_eq!(active as u64, game.turns_taken() % 3);
        let before = game.turns_taken();

        match game.player(active).unwrap().kind() {
            PlayerKind::Interactive => {
                game.tick(&[]).unwrap();
                let target = first_legal(game.state());
                let keys = keys_to(&game, active, target.row, target.column);
                game.tick(&keys).unwrap();
            }
            PlayerKind::Autonomous => {
                wait_for_decision(&game, active);
                game.tick(&[]).unwrap();
            }
        }
        assert_eq!(game.turns_taken(), before + 1);
    }

    let order: Vec<usize> = began
        .borrow()
        .iter()
        .map(|ev| match ev {
            GameEvent::TurnBegan { player, .. } => *player,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert!(order.len() as u64 >= game.turns_taken());
    for (t, player) in order.iter().enumerate() {
        assert_eq!(*player, t % 3);
    }
}

#[test]
fn test_illegal_autonomous_move_is_fatal_on_its_poll_tick() {
    let pool = DecisionPool::new(1).unwrap();
    let (open, gate) = mpsc::channel();
    let illegal = Move::new(0, 9, 9);
    let players = vec![
        Player::Autonomous(AutonomousPlayer::new(
            GatedStrategy {
                gate,
                answer: illegal,
            },
            pool.handle(),
        )),
        Player::Interactive(InteractivePlayer::new()),
    ];
    let mut game = Game::new(
        CorsoState::default(),
        players,
        RenderPolicy::DirtyGated,
        Box::new(NullPresenter::new()),
    )
    .unwrap();
    game.start().unwrap();

    assert!(game.tick(&[]).is_ok());
    assert!(game.tick(&[]).is_ok());
    assert_eq!(game.turns_taken(), 0);

    open.send(()).unwrap();
    wait_for_decision(&game, 0);

    match game.tick(&[]) {
        Err(EngineError::IllegalAutonomousMove { player, mv }) => {
            assert_eq!(player, 0);
            assert_eq!(mv, illegal);
        }
        other => panic!("expected illegal move error, got {other:?}"),
    }
    assert_eq!(game.frame(), 3);
    assert_eq!(game.turns_taken(), 0);
    assert_eq!(game.active_player(), Some(0));
    assert_eq!(game.board().occupied(), 0);
}

#[test]
fn test_autonomous_move_is_applied_on_the_tick_it_is_collected() {
    let pool = DecisionPool::new(1).unwrap();
    let (open, gate) = mpsc::channel();
    let players = vec![
        Player::Autonomous(AutonomousPlayer::new(
            GatedStrategy {
                gate,
                answer: Move::new(0, 2, 2),
            },
            pool.handle(),
        )),
        Player::Interactive(InteractivePlayer::new()),
    ];
    let mut game = Game::new(
        CorsoState::default(),
        players,
        RenderPolicy::DirtyGated,
        Box::new(NullPresenter::new()),
    )
    .unwrap();
    game.start().unwrap();
    game.tick(&[]).unwrap();

    // Keys are not the autonomous player's business.
    let report = game.tick(&[LogicalKey::Confirm]).unwrap();
    assert!(!report.rendered);
    assert_eq!(game.turns_taken(), 0);

    open.send(()).unwrap();
    wait_for_decision(&game, 0);
    let report = game.tick(&[]).unwrap();
    assert!(report.rendered);
    assert_eq!(game.turns_taken(), 1);
    assert_eq!(game.board().occupant(2, 2), Some(Occupant::marble(0)));
    assert_eq!(game.active_player(), Some(1));
}

#[test]
fn test_two_random_players_finish_a_game() {
    let pool = DecisionPool::new(2).unwrap();
    let players = vec![
        Player::Autonomous(AutonomousPlayer::new(RandomStrategy::new(3), pool.handle())),
        Player::Autonomous(AutonomousPlayer::new(RandomStrategy::new(4), pool.handle())),
    ];
    let mut game = Game::new(
        CorsoState::new(3, 3),
        players,
        RenderPolicy::DirtyGated,
        Box::new(NullPresenter::new()),
    )
    .unwrap();
    let over = recorder(&mut game, EventTag::GameOver);
    game.start().unwrap();

    while let Some(active) = game.active_player() {
        wait_for_decision(&game, active);
        game.tick(&[]).unwrap();
    }

    assert!(game.turns_taken() <= 9);
    assert_eq!(over.borrow().len(), 1);
    assert_eq!(game.outcome(), game.state().outcome());
}
