//! Players and per-seat identity.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::token::{Token, TokenId};

/// Tokens owned by each player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Seat identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// One seat at the table: a color, a name, a human/computer flag, and four
/// tokens.
///
/// The finished-token count is derived from the tokens, never stored, so it
/// always agrees with them.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    color: Color,
    name: String,
    is_ai: bool,
    tokens: [Token; TOKENS_PER_PLAYER],
}

impl Player {
    /// A fresh player with all four tokens in the yard.
    pub(crate) fn new(id: PlayerId, color: Color, name: String, is_ai: bool) -> Self {
        Self {
            id,
            color,
            name,
            is_ai,
            tokens: std::array::from_fn(|i| Token::new(TokenId::new(i as u8), color)),
        }
    }

    /// A player with tokens already placed, for rebuilding restored games.
    pub(crate) fn with_tokens(
        id: PlayerId,
        color: Color,
        name: String,
        is_ai: bool,
        tokens: [Token; TOKENS_PER_PLAYER],
    ) -> Self {
        Self {
            id,
            color,
            name,
            is_ai,
            tokens,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this seat is computer-controlled.
    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// All four tokens, in id order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// One token by id.
    ///
    /// Panics if `id` is out of range; token ids are always `0..=3`.
    #[must_use]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> &mut Token {
        &mut self.tokens[id.index()]
    }

    /// How many of this player's tokens have reached the center.
    #[must_use]
    pub fn finished_tokens(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_finished()).count()
    }

    /// Whether this player has finished all four tokens.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.finished_tokens() == TOKENS_PER_PLAYER
    }
}
