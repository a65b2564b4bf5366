//! Core engine types: colors, tokens, players, setup, state, RNG, and
//! errors.

pub mod color;
pub mod error;
pub mod player;
pub mod rng;
pub mod setup;
pub mod state;
pub mod token;

pub use color::Color;
pub use error::{EngineError, SaveError};
pub use player::{Player, PlayerId, TOKENS_PER_PLAYER};
pub use rng::GameRng;
pub use setup::GameSetup;
pub use state::GameState;
pub use token::{Token, TokenId};
