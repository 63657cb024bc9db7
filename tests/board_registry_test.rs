//! Board registry stays a faithful view of the rules state.

use corsoab::core::{CorsoState, GameModel, SimpleRng};
use corsoab::engine::{BoardLayout, BoardRegistry, World};
use corsoab::term::SpriteId;

fn assert_consistent(board: &BoardRegistry, state: &CorsoState, world: &World) {
    for row in 0..state.height() {
        for column in 0..state.width() {
            let occupant = state.occupant(row, column);
            assert_eq!(board.occupant(row, column), occupant, "cell ({row}, {column})");
            match (occupant, board.handle(row, column)) {
                (None, None) => {}
                (Some(occ), Some(entity)) => {
                    assert!(world.is_alive(entity));
                    assert_eq!(world.sprite(entity), Some(SpriteId::for_occupant(occ)));
                    let piece = world.get(entity).and_then(|c| c.piece).unwrap();
                    assert_eq!((piece.row, piece.column, piece.occupant), (row, column, occ));
                }
                other => panic!("cell ({row}, {column}) out of sync: {other:?}"),
            }
        }
    }
    assert_eq!(world.len(), board.occupied());
}

#[test]
fn test_registry_matches_state_after_every_move() {
    for seed in 1..=20 {
        let mut rng = SimpleRng::new(seed);
        let mut state = CorsoState::new(5, 4);
        let mut world = World::new();
        let mut board = BoardRegistry::new(5, 4, BoardLayout::for_cell_size(11, 11));

        while state.outcome().is_none() {
            let mv = rng.choose(&state.legal_moves()).unwrap();
            state = state.apply(mv).unwrap();
            board.sync(&state, &mut world);
            assert_consistent(&board, &state, &world);
        }
    }
}

#[test]
fn test_replaced_piece_keeps_screen_position() {
    let layout = BoardLayout::for_cell_size(11, 11);
    let mut world = World::new();
    let mut board = BoardRegistry::new(3, 1, layout);

    let s1 = CorsoState::new(3, 1).apply(corsoab::types::Move::new(0, 0, 0)).unwrap();
    board.sync(&s1, &mut world);
    let old = board.handle(0, 1).unwrap();
    let pos = world.transform(old).unwrap();

    let s2 = s1.apply(corsoab::types::Move::new(1, 0, 2)).unwrap();
    board.sync(&s2, &mut world);
    let new = board.handle(0, 1).unwrap();
    assert_ne!(old, new);
    assert_eq!(world.transform(new), Some(pos));
    assert_eq!(pos, layout.cell_position(0, 1));
}
