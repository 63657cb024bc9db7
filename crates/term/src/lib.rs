//! Presentation layer.
//!
//! The game composes into a small off-screen pixel [`Surface`] sized for the
//! 128x64 OLED bonnet. A [`Presenter`] then pushes that surface to a display:
//!
//! - [`TerminalPresenter`]: desktop, half-block glyphs in a terminal
//! - [`PanelPresenter`]: SSD1306 page-packed frames written to the panel device
//! - [`NullPresenter`]: headless, counts frames
//!
//! This crate knows nothing about turns or players.

pub mod panel;
pub mod presenter;
pub mod renderer;
pub mod sprites;
pub mod surface;

pub use corso_types as types;

pub use panel::{encode_pages_into, frame_len, PanelPresenter};
pub use presenter::{NullPresenter, Presenter};
pub use renderer::{
    encode_diff_into, encode_full_into, GlyphGrid, TerminalPresenter, TerminalSession, MAX_SCALE,
};
pub use sprites::{SpriteBank, SpriteId};
pub use surface::{is_lit, Pixel, Sprite, Surface, BLACK, WHITE};
