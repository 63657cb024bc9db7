//! Render policy behaviour over whole games.

mod common;

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use corsoab::core::CorsoState;
use corsoab::engine::{Game, InteractivePlayer, Player, RenderPolicy};
use corsoab::term::{frame_len, PanelPresenter, BLACK};
use corsoab::types::{LogicalKey, BONNET_HEIGHT, BONNET_WIDTH};

use common::two_humans;

/// Vec<u8> sink the test keeps a handle to after boxing the presenter.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_dirty_gated_composes_once_per_change_plus_first_frame() {
    let mut game = two_humans(CorsoState::default(), RenderPolicy::DirtyGated);
    game.start().unwrap();

    let mut rendered = Vec::new();
    for tick in 1..=10u64 {
        let keys: &[LogicalKey] = if tick == 6 { &[LogicalKey::Right] } else { &[] };
        if game.tick(keys).unwrap().rendered {
            rendered.push(tick);
        }
    }
    assert_eq!(rendered, vec![1, 6]);
    assert_eq!(game.compositions(), 2);
}

#[test]
fn test_blocked_keys_do_not_dirty_the_frame() {
    let mut game = two_humans(CorsoState::default(), RenderPolicy::DirtyGated);
    game.start().unwrap();
    assert!(game.tick(&[LogicalKey::Right]).unwrap().rendered);
    assert!(!game.is_dirty());
    assert!(!game.tick(&[]).unwrap().rendered);
}

#[test]
fn test_unconditional_composes_every_tick() {
    let mut game = two_humans(CorsoState::default(), RenderPolicy::Unconditional);
    game.start().unwrap();
    for _ in 0..7 {
        assert!(game.tick(&[]).unwrap().rendered);
    }
    assert_eq!(game.compositions(), 7);
}

#[test]
fn test_composed_frame_shows_board_and_cursor() {
    let mut game = two_humans(CorsoState::default(), RenderPolicy::DirtyGated);
    game.start().unwrap();
    game.tick(&[]).unwrap();

    let surface = game.surface();
    assert_eq!((surface.width(), surface.height()), (BONNET_WIDTH, BONNET_HEIGHT));
    // Only the cursor bar below cell (0, 0) is lit; the top one is clipped.
    let cell = game.board().layout().cell_position(0, 0);
    assert_eq!(surface.lit_count(), 7);
    assert_ne!(surface.get(cell.x + 2, cell.y + 11), Some(BLACK));
    assert_eq!(surface.get(cell.x + 1, cell.y + 11), Some(BLACK));

    game.tick(&[LogicalKey::Confirm]).unwrap();
    assert!(game.surface().lit_count() > 7);
}

#[test]
fn test_panel_receives_one_page_frame_per_render() {
    let sink = SharedSink::default();
    let players = vec![
        Player::Interactive(InteractivePlayer::new()),
        Player::Interactive(InteractivePlayer::new()),
    ];
    let mut game = Game::new(
        CorsoState::default(),
        players,
        RenderPolicy::DirtyGated,
        Box::new(PanelPresenter::new(sink.clone())),
    )
    .unwrap();
    game.start().unwrap();

    let script: [&[LogicalKey]; 6] = [
        &[],
        &[],
        &[LogicalKey::Down],
        &[],
        &[LogicalKey::Confirm],
        &[],
    ];
    let mut renders = 0;
    for keys in script {
        if game.tick(keys).unwrap().rendered {
            renders += 1;
        }
    }
    assert_eq!(renders, 3);
    assert_eq!(sink.0.borrow().len(), renders * frame_len(BONNET_WIDTH, BONNET_HEIGHT));
}
