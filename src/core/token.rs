//! Tokens and their board positions.
//!
//! A token's position is a single cell index (see [`crate::board`] for the
//! indexing scheme). Whether a token is finished is derived from its
//! position rather than stored, so the two can never disagree.

use serde::{Deserialize, Serialize};

use crate::board::{FINISH, HOME_YARD, MAIN_LOOP_LEN};

use super::color::Color;

/// Identifies one of a player's four tokens (0-based, unique within its
/// owner).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a new token ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw token index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "token {}", self.0)
    }
}

/// A single pawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    id: TokenId,
    color: Color,
    position: i8,
}

impl Token {
    /// A fresh token in its home yard.
    pub(crate) fn new(id: TokenId, color: Color) -> Self {
        Self {
            id,
            color,
            position: HOME_YARD,
        }
    }

    /// A token at an arbitrary cell, for rebuilding restored games.
    pub(crate) fn at(id: TokenId, color: Color, position: i8) -> Self {
        Self { id, color, position }
    }

    #[must_use]
    pub fn id(&self) -> TokenId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Current cell index.
    #[must_use]
    pub fn position(&self) -> i8 {
        self.position
    }

    /// Whether this token has reached the center.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position == FINISH
    }

    /// Whether this token is still in its home yard.
    #[must_use]
    pub fn in_yard(&self) -> bool {
        self.position == HOME_YARD
    }

    /// Whether this token sits on the shared main loop.
    #[must_use]
    pub fn on_main_loop(&self) -> bool {
        (0..MAIN_LOOP_LEN).contains(&self.position)
    }

    pub(crate) fn set_position(&mut self, position: i8) {
        self.position = position;
    }

    /// Send this token back to its yard (capture).
    pub(crate) fn send_home(&mut self) {
        self.position = HOME_YARD;
    }
}
