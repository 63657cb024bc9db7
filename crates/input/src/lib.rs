//! Input module (engine-facing).
//!
//! Maps physical inputs into [`crate::types::LogicalKey`]s:
//!
//! - terminal keys via `crossterm` ([`map`], collected per tick by [`pump`])
//! - bonnet joystick and buttons ([`buttons`])
//!
//! Only key-down presses are reported; the engine never sees repeats.

pub mod buttons;
pub mod map;
pub mod pump;

pub use corso_types as types;

pub use buttons::{map_button, PanelButton};
pub use map::{handle_key_event, should_quit};
pub use pump::{InputPump, KeyBatch, TickInput, MAX_KEYS_PER_TICK};
