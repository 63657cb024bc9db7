//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules model the turn engine drives. It has **zero
//! dependencies** on presentation, input, or scheduling, which keeps it:
//!
//! - **Deterministic**: the same move sequence always yields the same state
//! - **Immutable**: applying a move returns a new state, the old one is untouched
//! - **Thread-safe**: states are plain values, safe to hand to a background decision
//!
//! # Module Structure
//!
//! - [`model`]: the [`GameModel`] oracle trait consumed by the engine
//! - [`corso`]: the concrete Corso rules
//! - [`rng`]: LCG used by the random decision procedure
//! - [`strategy`]: blocking decision procedures for autonomous players
//!
//! # Game Rules
//!
//! - A player places a marble on an empty cell or on one of their own dyes
//! - Orthogonal neighbours that are empty or hold an opponent dye become the mover's dye
//! - Marbles are permanent
//! - The game ends when the player to move has no legal move; most cells owned wins
//!
//! # Example
//!
//! ```
//! use corso_core::{CorsoState, GameModel};
//! use corso_types::{Move, Occupant};
//!
//! let start = CorsoState::default();
//! let next = start.apply(Move::new(0, 2, 2)).unwrap();
//!
//! assert_eq!(next.occupant(2, 2), Some(Occupant::marble(0)));
//! assert_eq!(next.occupant(1, 2), Some(Occupant::dye(0)));
//! assert_eq!(next.active_player(), 1);
//! assert_eq!(start.occupant(2, 2), None);
//! ```

pub mod corso;
pub mod model;
pub mod rng;
pub mod strategy;

pub use corso_types as types;

pub use corso::CorsoState;
pub use model::{GameModel, RulesError};
pub use rng::SimpleRng;
pub use strategy::{RandomStrategy, Strategy};
