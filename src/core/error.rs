//! Structured error types.
//!
//! A rejected request never mutates state: the engine checks its phase and
//! the request's arguments first and returns one of these instead of
//! silently ignoring the call.

use super::token::TokenId;

/// Errors from engine requests.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("player count must be between 2 and 4, got {0}")]
    PlayerCount(usize),

    #[error("{ai_count} computer players requested for a {player_count}-player game")]
    AiCount { ai_count: usize, player_count: usize },

    #[error("a roll of {0} is already pending")]
    RollPending(u8),

    #[error("a move is still being applied")]
    MoveInProgress,

    #[error("no roll is pending")]
    NoRollPending,

    #[error("the game has not started")]
    NotStarted,

    #[error("the game is already over")]
    GameOver,

    #[error("{0} is not among the current legal moves")]
    InvalidMove(TokenId),

    #[error("the current player is not computer-controlled")]
    NotAiTurn,
}

/// Errors from the persistence layer.
///
/// None of these are fatal to a live game: the engine logs write failures
/// and plays on, and a record that cannot be decoded reads as "no save
/// present".
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no saved game")]
    NoSavedGame,

    #[error("saved game is corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
