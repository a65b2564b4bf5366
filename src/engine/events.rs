//! Events emitted by the turn engine.
//!
//! Presentation collaborators (rendering, audio, narration) consume these;
//! none are required for rule correctness. `TokenStepped` fires once per
//! visited cell, so a consumer can animate a move one step at a time while
//! the engine's logical state has already settled.

use serde::{Deserialize, Serialize};

use crate::core::{Color, PlayerId, TokenId};

/// Something that happened during a turn, in emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A die was rolled.
    DiceRolled { player: PlayerId, value: u8 },

    /// Legal moves were computed for the pending roll.
    MovesComputed { player: PlayerId, count: usize },

    /// A token advanced one cell. `from` is `-1` when it left its yard.
    TokenStepped {
        color: Color,
        token: TokenId,
        from: i8,
        to: i8,
    },

    /// An opposing token was sent back to its yard.
    TokenCaptured {
        color: Color,
        token: TokenId,
        cell: i8,
    },

    /// A token reached the center.
    TokenFinished { color: Color, token: TokenId },

    /// Third consecutive six: the roll was discarded and the turn ends.
    TripleSix { player: PlayerId },

    /// The acting player keeps the turn and rolls again.
    BonusTurn { player: PlayerId },

    /// The turn passed to the next player.
    TurnEnded { next_player: PlayerId },

    /// A player finished all four tokens.
    GameWon { player: PlayerId },
}
