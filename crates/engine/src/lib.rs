//! Turn orchestration and render scheduling.
//!
//! This crate drives a [`GameModel`](corso_core::GameModel) one tick at a
//! time: it routes input to players, runs autonomous decisions off-thread,
//! validates and applies moves, keeps the on-screen board in step with the
//! rules state, and decides when a frame is composed.
//!
//! # Module Structure
//!
//! - [`game`]: the [`Game`] context and its tick
//! - [`orchestrator`]: the turn state machine
//! - [`player`]: interactive and autonomous players
//! - [`events`]: typed events and listener registration
//! - [`world`]: entities and components
//! - [`board`]: cell-to-entity registry and layout
//! - [`cursor`]: selection cursor and markers
//! - [`render`]: dirty flag, policies and composition
//! - [`pacer`]: fixed-interval tick pacing
//!
//! # Example
//!
//! ```
//! use corso_engine::{Game, InteractivePlayer, Player, RenderPolicy};
//! use corso_core::CorsoState;
//! use corso_term::NullPresenter;
//! use corso_types::LogicalKey;
//!
//! let players = vec![
//!     Player::Interactive(InteractivePlayer::new()),
//!     Player::Interactive(InteractivePlayer::new()),
//! ];
//! let mut game = Game::new(
//!     CorsoState::default(),
//!     players,
//!     RenderPolicy::DirtyGated,
//!     Box::new(NullPresenter::new()),
//! )
//! .unwrap();
//!
//! game.start().unwrap();
//! game.tick(&[]).unwrap();
//! game.tick(&[LogicalKey::Confirm]).unwrap();
//! assert_eq!(game.active_player(), Some(1));
//! ```

pub mod board;
pub mod cursor;
pub mod error;
pub mod events;
pub mod game;
pub mod orchestrator;
pub mod pacer;
pub mod player;
pub mod render;
pub mod world;

pub use corso_core as core;
pub use corso_term as term;
pub use corso_types as types;

pub use board::{BoardLayout, BoardRegistry};
pub use cursor::{Cursor, CursorMarkers};
pub use error::EngineError;
pub use events::{EventBus, EventTag, GameEvent, Listener};
pub use game::{Game, TickReport};
pub use orchestrator::{Orchestrator, Stage, TurnPhase};
pub use pacer::FramePacer;
pub use player::{AutonomousPlayer, DecisionPool, InteractivePlayer, Player, PlayerKind};
pub use render::{compose, DirtyFlag, RenderPolicy, RenderScheduler};
pub use world::{CellPiece, Components, CursorMarker, Entity, Transform, World};
