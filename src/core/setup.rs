//! Game setup configuration.
//!
//! Seats are filled in color order (red, green, yellow, blue). Computer
//! players occupy the first `ai_count` seats; provided names fill the human
//! seats in order, with color-based defaults for the rest.

use super::color::Color;
use super::error::EngineError;
use super::player::{Player, PlayerId};

/// Configuration for a new game.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::GameSetup;
///
/// let setup = GameSetup::new(4).ai_count(2).names(["Ada", "Grace"]);
/// ```
#[derive(Clone, Debug)]
pub struct GameSetup {
    player_count: usize,
    ai_count: usize,
    names: Vec<String>,
}

impl GameSetup {
    /// A setup for `player_count` human players and no computer players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ai_count: 0,
            names: Vec::new(),
        }
    }

    /// Make the first `count` seats computer-controlled.
    #[must_use]
    pub fn ai_count(mut self, count: usize) -> Self {
        self.ai_count = count;
        self
    }

    /// Names for the human seats, in seat order. Missing or empty entries
    /// fall back to the color default ("Red Player", ...).
    #[must_use]
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if !(2..=4).contains(&self.player_count) {
            return Err(EngineError::PlayerCount(self.player_count));
        }
        if self.ai_count > self.player_count {
            return Err(EngineError::AiCount {
                ai_count: self.ai_count,
                player_count: self.player_count,
            });
        }
        Ok(())
    }

    /// Build the player roster. Call only after `validate`.
    pub(crate) fn build_players(&self) -> Vec<Player> {
        let mut human_idx = 0;
        (0..self.player_count)
            .map(|i| {
                let color = Color::ALL[i];
                let is_ai = i < self.ai_count;
                let name = if is_ai {
                    format!("{} Player (CPU)", color.name())
                } else {
                    let provided = self
                        .names
                        .get(human_idx)
                        .filter(|n| !n.is_empty())
                        .cloned();
                    human_idx += 1;
                    provided.unwrap_or_else(|| format!("{} Player", color.name()))
                };
                Player::new(PlayerId::new(i as u8), color, name, is_ai)
            })
            .collect()
    }
}
