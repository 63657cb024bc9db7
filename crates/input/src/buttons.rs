//! Bonnet joystick and button mapping.
//!
//! The Adafruit OLED bonnet exposes a five-way joystick and two push
//! buttons on fixed GPIO lines. Whatever reads the lines reports presses as
//! [`PanelButton`]s; this module folds them into the logical key space.

use crate::types::LogicalKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelButton {
    JoyUp,
    JoyDown,
    JoyLeft,
    JoyRight,
    JoyCenter,
    A,
    B,
}

impl PanelButton {
    pub const ALL: [PanelButton; 7] = [
        PanelButton::JoyUp,
        PanelButton::JoyDown,
        PanelButton::JoyLeft,
        PanelButton::JoyRight,
        PanelButton::JoyCenter,
        PanelButton::A,
        PanelButton::B,
    ];

    /// BCM GPIO line wired to this button on the bonnet.
    pub fn gpio(&self) -> u8 {
        match self {
            PanelButton::JoyUp => 17,
            PanelButton::JoyDown => 22,
            PanelButton::JoyLeft => 27,
            PanelButton::JoyRight => 23,
            PanelButton::JoyCenter => 4,
            PanelButton::A => 5,
            PanelButton::B => 6,
        }
    }

    pub fn from_gpio(line: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.gpio() == line)
    }
}

/// Map a button press to a logical key.
pub fn map_button(button: PanelButton) -> LogicalKey {
    match button {
        PanelButton::JoyUp => LogicalKey::Up,
        PanelButton::JoyDown => LogicalKey::Down,
        PanelButton::JoyLeft => LogicalKey::Left,
        PanelButton::JoyRight => LogicalKey::Right,
        PanelButton::JoyCenter | PanelButton::A => LogicalKey::Confirm,
        PanelButton::B => LogicalKey::Quit,
    }
}
