//! The saved-game record.
//!
//! The record is the minimal subset of [`GameState`] needed to resume a
//! game: the roster with token positions, whose turn it is, and the
//! counters. Nothing transient (pending legal moves, an in-flight move) is
//! persisted, and a restored game always begins awaiting a fresh roll.
//!
//! Decoding is tolerant the way the record's consumers expect: numeric and
//! flag fields default when absent, unparseable input reads as "no save
//! present", and structurally valid input with impossible contents (a
//! five-player roster, a red token in blue's stretch) is rejected as
//! corrupt rather than turned into partial state.

use serde::{Deserialize, Serialize};

use crate::board::{BoardTopology, FINISH, HOME_STRETCH_LEN, HOME_YARD, MAIN_LOOP_LEN};
use crate::core::{Color, GameState, Player, PlayerId, SaveError, Token, TokenId, TOKENS_PER_PLAYER};

/// Store key for the saved-game record. The suffix versions the schema.
pub const SAVE_KEY: &str = "ludo_save_v1";

/// One persisted token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedToken {
    pub id: u8,
    pub position: i8,
    #[serde(default)]
    pub is_finished: bool,
    pub color: Color,
}

/// One persisted player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayer {
    #[serde(default)]
    pub name: String,
    pub color: Color,
    #[serde(default, rename = "isAI")]
    pub is_ai: bool,
    pub tokens: Vec<SavedToken>,
}

/// The persisted record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub players: Vec<SavedPlayer>,
    #[serde(default)]
    pub current_player_index: usize,
    #[serde(default)]
    pub dice_value: u8,
    #[serde(default)]
    pub dice_rolls: u32,
    #[serde(default)]
    pub total_moves: u32,
    #[serde(default)]
    pub consecutive_sixes: u8,
    #[serde(default)]
    pub game_started: bool,
}

impl SavedGame {
    /// Capture the persistable subset of `state`.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            players: state
                .players()
                .iter()
                .map(|p| SavedPlayer {
                    name: p.name().to_string(),
                    color: p.color(),
                    is_ai: p.is_ai(),
                    tokens: p
                        .tokens()
                        .iter()
                        .map(|t| SavedToken {
                            id: t.id().0,
                            position: t.position(),
                            is_finished: t.is_finished(),
                            color: t.color(),
                        })
                        .collect(),
                })
                .collect(),
            current_player_index: state.current_index(),
            dice_value: state.dice_value(),
            dice_rolls: state.dice_rolls(),
            total_moves: state.total_moves(),
            consecutive_sixes: state.consecutive_sixes(),
            game_started: state.is_started(),
        }
    }

    /// Parse a raw record. Unparseable input is [`SaveError::NoSavedGame`];
    /// parseable input that fails validation is [`SaveError::Corrupt`].
    pub fn decode(raw: &str) -> Result<Self, SaveError> {
        let record: SavedGame =
            serde_json::from_str(raw).map_err(|_| SaveError::NoSavedGame)?;
        record.validate()?;
        Ok(record)
    }

    /// Serialize for storage.
    pub fn encode(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Turn a record into live state. The pending dice value is always
    /// cleared, so the restored game starts at a clean awaiting-roll state
    /// for the recorded current player.
    pub fn into_state(self) -> Result<GameState, SaveError> {
        self.validate()?;

        let players = self
            .players
            .into_iter()
            .enumerate()
            .map(|(seat, p)| {
                let tokens: Vec<Token> = p
                    .tokens
                    .iter()
                    .map(|t| Token::at(TokenId::new(t.id), p.color, t.position))
                    .collect();
                let tokens: [Token; TOKENS_PER_PLAYER] = tokens
                    .try_into()
                    .expect("token count validated");
                Player::with_tokens(PlayerId::new(seat as u8), p.color, p.name, p.is_ai, tokens)
            })
            .collect();

        Ok(GameState::from_saved_parts(
            players,
            self.current_player_index,
            self.dice_rolls,
            self.total_moves,
            self.consecutive_sixes,
            self.game_started,
        ))
    }

    fn validate(&self) -> Result<(), SaveError> {
        let count = self.players.len();
        if !(2..=4).contains(&count) {
            return Err(SaveError::Corrupt(format!("player count {count}")));
        }
        if self.current_player_index >= count {
            return Err(SaveError::Corrupt(format!(
                "current player index {} of {count}",
                self.current_player_index
            )));
        }

        let topology = BoardTopology::new();
        for (seat, player) in self.players.iter().enumerate() {
            if self.players[..seat].iter().any(|p| p.color == player.color) {
                return Err(SaveError::Corrupt(format!(
                    "duplicate color {}",
                    player.color
                )));
            }
            if player.tokens.len() != TOKENS_PER_PLAYER {
                return Err(SaveError::Corrupt(format!(
                    "player {seat} has {} tokens",
                    player.tokens.len()
                )));
            }
            for (i, token) in player.tokens.iter().enumerate() {
                if token.id as usize != i {
                    return Err(SaveError::Corrupt(format!(
                        "player {seat} token ids out of order"
                    )));
                }
                if !position_is_valid(&topology, player.color, token.position) {
                    return Err(SaveError::Corrupt(format!(
                        "{} token at cell {}",
                        player.color, token.position
                    )));
                }
            }
        }

        Ok(())
    }
}

/// A token may sit in its yard, on the main loop, in its own color's
/// stretch, or at the center, never in another color's stretch.
fn position_is_valid(topology: &BoardTopology, color: Color, position: i8) -> bool {
    if position == HOME_YARD || position == FINISH {
        return true;
    }
    if (0..MAIN_LOOP_LEN).contains(&position) {
        return true;
    }
    let stretch = topology.home_stretch_start(color);
    (stretch..stretch + HOME_STRETCH_LEN).contains(&position)
}
