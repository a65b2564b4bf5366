//! Mutable game state.
//!
//! One `GameState` is owned by one turn engine for the duration of one
//! game. Nothing here is ambient or static; independent games are
//! independent values. Collaborators read snapshots through the accessors;
//! all mutation goes through the engine.

use super::color::Color;
use super::error::EngineError;
use super::player::{Player, PlayerId};
use super::setup::GameSetup;
use super::token::TokenId;

/// Everything that changes over the course of a game: the roster, whose
/// turn it is, the pending dice value, and the counters.
#[derive(Clone, Debug)]
pub struct GameState {
    players: Vec<Player>,
    current_player: usize,
    /// 0 means no roll is pending; 1-6 is a roll awaiting resolution.
    dice_value: u8,
    /// Sixes rolled in a row by the current player. Reset only when a turn
    /// actually ends, so bonus rolls chain the count.
    consecutive_sixes: u8,
    dice_rolls: u32,
    total_moves: u32,
    started: bool,
    finished: bool,
}

impl GameState {
    /// Build the initial state for a validated setup.
    pub(crate) fn new(setup: &GameSetup) -> Result<Self, EngineError> {
        setup.validate()?;
        Ok(Self {
            players: setup.build_players(),
            current_player: 0,
            dice_value: 0,
            consecutive_sixes: 0,
            dice_rolls: 0,
            total_moves: 0,
            started: true,
            finished: false,
        })
    }

    /// Rebuild state from decoded save parts. The dice value is always
    /// cleared so the restored game starts awaiting a fresh roll.
    pub(crate) fn from_saved_parts(
        players: Vec<Player>,
        current_player: usize,
        dice_rolls: u32,
        total_moves: u32,
        consecutive_sixes: u8,
        started: bool,
    ) -> Self {
        let finished = players.iter().any(Player::has_won);
        Self {
            players,
            current_player,
            dice_value: 0,
            consecutive_sixes,
            dice_rolls,
            total_moves,
            started,
            finished,
        }
    }

    // === Accessors ===

    /// All players, in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One player by seat.
    ///
    /// Panics if `id` is out of range for this game's roster.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Seat index of the current player.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_player
    }

    /// Seat id of the current player.
    #[must_use]
    pub fn current_id(&self) -> PlayerId {
        PlayerId::new(self.current_player as u8)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// The pending dice value, or 0 when no roll is pending.
    #[must_use]
    pub fn dice_value(&self) -> u8 {
        self.dice_value
    }

    #[must_use]
    pub fn consecutive_sixes(&self) -> u8 {
        self.consecutive_sixes
    }

    /// Total rolls taken, including discarded triple-six rolls.
    #[must_use]
    pub fn dice_rolls(&self) -> u32 {
        self.dice_rolls
    }

    /// Total settled moves.
    #[must_use]
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the game has been won.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.finished
    }

    /// Every token currently on `cell`, across all players.
    #[must_use]
    pub fn tokens_on_cell(&self, cell: i8) -> Vec<(PlayerId, TokenId)> {
        self.players
            .iter()
            .flat_map(|p| {
                p.tokens()
                    .iter()
                    .filter(move |t| t.position() == cell && !t.is_finished())
                    .map(move |t| (p.id(), t.id()))
            })
            .collect()
    }

    /// Tokens on `cell` belonging to colors other than `mover`.
    #[must_use]
    pub fn opponent_tokens_on_cell(&self, cell: i8, mover: Color) -> Vec<(PlayerId, TokenId)> {
        self.players
            .iter()
            .filter(|p| p.color() != mover)
            .flat_map(|p| {
                p.tokens()
                    .iter()
                    .filter(move |t| t.position() == cell && !t.is_finished())
                    .map(move |t| (p.id(), t.id()))
            })
            .collect()
    }

    // === Mutation (engine only) ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub(crate) fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player]
    }

    /// Record a roll: sets the pending value and bumps the roll counter.
    pub(crate) fn record_roll(&mut self, value: u8) {
        self.dice_value = value;
        self.dice_rolls += 1;
    }

    /// Count another consecutive six and return the new count.
    pub(crate) fn bump_consecutive_sixes(&mut self) -> u8 {
        self.consecutive_sixes += 1;
        self.consecutive_sixes
    }

    /// Clear the pending roll (bonus turn: same player rolls again).
    pub(crate) fn clear_dice(&mut self) {
        self.dice_value = 0;
    }

    pub(crate) fn bump_total_moves(&mut self) {
        self.total_moves += 1;
    }

    /// End the current turn: clear the roll, reset the six counter, and
    /// rotate to the next seat that has not finished all tokens. Bounded to
    /// one lap so a roster of finished players cannot loop forever.
    pub(crate) fn advance_turn(&mut self) -> PlayerId {
        self.dice_value = 0;
        self.consecutive_sixes = 0;
        let n = self.players.len();
        let mut hops = 0;
        loop {
            self.current_player = (self.current_player + 1) % n;
            hops += 1;
            if !self.players[self.current_player].has_won() || hops >= n {
                break;
            }
        }
        self.current_id()
    }

    /// Mark the game won.
    pub(crate) fn mark_over(&mut self) {
        self.finished = true;
        self.started = false;
    }
}
