//! Player colors and their fixed seating order.

use serde::{Deserialize, Serialize};

/// The four token colors. Seats are assigned in this order, one color per
/// player, so a two-player game is always red versus green.
///
/// Serialized as lowercase strings (`"red"`, ...) to match the saved-game
/// record format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// All colors in seating order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Seat index of this color (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Capitalized name, used for default player names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        write!(f, "{name}")
    }
}
