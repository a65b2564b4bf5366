//! The per-turn state machine.
//!
//! One `TurnEngine` owns one [`GameState`] and drives it through the cycle
//! roll → legal-move computation → move application → capture resolution →
//! bonus/turn-end → rotation → win check. Every external request is checked
//! against the current [`TurnPhase`] and rejected with a typed error when
//! it doesn't fit; a rejected request never mutates state.
//!
//! Moves settle synchronously: a roll with no legal moves ends the turn
//! before `roll_dice` returns, a roll with exactly one legal move applies
//! it immediately, and a chosen move runs to completion (steps, captures,
//! bonus or rotation) before the call returns. Presentation pacing rides on
//! the emitted [`GameEvent`] sequence instead of engine timing.
//!
//! When a [`SaveStore`] is attached, the saved record is rewritten after
//! every settled change and removed when the game is won.

use crate::ai;
use crate::board::{BoardTopology, FINISH};
use crate::core::{Color, EngineError, GameRng, GameSetup, GameState, SaveError, TokenId};
use crate::moves::{self, LegalMove, MovePath};
use crate::save::{SaveStore, SavedGame};

use super::events::GameEvent;

/// Where the engine is within the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the current player to roll.
    AwaitingRoll,
    /// A roll is pending with legal moves available; waiting for a choice.
    MovesComputed,
    /// A chosen move is being applied.
    MoveInProgress,
    /// The move has settled; the turn is about to continue or rotate.
    TurnSettled,
}

/// What a settled move did.
#[derive(Clone, Debug)]
pub struct AppliedMove {
    pub token: TokenId,
    /// Every cell the token visited, in order.
    pub steps: MovePath,
    /// Opposing tokens sent home by this move.
    pub captured: Vec<(Color, TokenId)>,
    /// The moved token reached the center.
    pub finished: bool,
    /// The acting player keeps the turn and rolls again.
    pub bonus: bool,
}

/// The rule engine for one game.
pub struct TurnEngine {
    topology: BoardTopology,
    state: GameState,
    rng: GameRng,
    phase: TurnPhase,
    legal: Vec<LegalMove>,
    events: Vec<GameEvent>,
    store: Option<Box<dyn SaveStore>>,
}

impl TurnEngine {
    /// Start a new game with an entropy-seeded RNG.
    pub fn new(setup: GameSetup) -> Result<Self, EngineError> {
        Self::with_rng(setup, GameRng::from_entropy())
    }

    /// Start a new game with a fixed seed, for reproducible play.
    pub fn seeded(setup: GameSetup, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(setup, GameRng::new(seed))
    }

    fn with_rng(setup: GameSetup, rng: GameRng) -> Result<Self, EngineError> {
        let state = GameState::new(&setup)?;
        tracing::info!(players = state.players().len(), "game started");
        Ok(Self {
            topology: BoardTopology::new(),
            state,
            rng,
            phase: TurnPhase::AwaitingRoll,
            legal: Vec::new(),
            events: Vec::new(),
            store: None,
        })
    }

    /// Rebuild an engine from a decoded record. The restored game always
    /// begins awaiting a fresh roll, whatever was in flight when it was
    /// saved.
    pub fn from_saved(record: SavedGame) -> Result<Self, SaveError> {
        Self::from_saved_with_rng(record, GameRng::from_entropy())
    }

    /// [`TurnEngine::from_saved`] with a fixed seed, for reproducible play.
    pub fn from_saved_seeded(record: SavedGame, seed: u64) -> Result<Self, SaveError> {
        Self::from_saved_with_rng(record, GameRng::new(seed))
    }

    fn from_saved_with_rng(record: SavedGame, rng: GameRng) -> Result<Self, SaveError> {
        let state = record.into_state()?;
        tracing::info!(players = state.players().len(), "restored saved game");
        Ok(Self {
            topology: BoardTopology::new(),
            state,
            rng,
            phase: TurnPhase::AwaitingRoll,
            legal: Vec::new(),
            events: Vec::new(),
            store: None,
        })
    }

    /// Restore the game saved in `store`, keeping the store attached.
    /// `NoSavedGame` means the caller should start fresh instead.
    pub fn resume(store: Box<dyn SaveStore>) -> Result<Self, SaveError> {
        let record = store.load()?.ok_or(SaveError::NoSavedGame)?;
        let mut engine = Self::from_saved(record)?;
        engine.store = Some(store);
        Ok(engine)
    }

    /// Attach a store. The current state is persisted immediately, then
    /// after every settled change.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn SaveStore>) -> Self {
        self.store = Some(store);
        self.persist();
        self
    }

    // === Observation ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether the game has been won.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Legal moves for the pending roll; non-empty only in
    /// [`TurnPhase::MovesComputed`].
    #[must_use]
    pub fn legal_moves(&self) -> &[LegalMove] {
        &self.legal
    }

    /// Take all events emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Requests ===

    /// Roll the dice for the current player.
    ///
    /// A roll with no legal moves ends the turn; a roll with exactly one
    /// legal move applies it immediately (for human and computer players
    /// alike); a third consecutive six discards the roll and ends the turn.
    /// The rolled value is returned either way; consult the event stream
    /// and [`TurnEngine::phase`] for what it led to.
    pub fn roll_dice(&mut self) -> Result<u8, EngineError> {
        self.ensure_active()?;
        match self.phase {
            TurnPhase::AwaitingRoll => {}
            TurnPhase::MovesComputed => {
                return Err(EngineError::RollPending(self.state.dice_value()))
            }
            TurnPhase::MoveInProgress | TurnPhase::TurnSettled => {
                return Err(EngineError::MoveInProgress)
            }
        }

        let value = self.rng.roll_die();
        let player = self.state.current_id();
        self.state.record_roll(value);
        self.events.push(GameEvent::DiceRolled { player, value });
        tracing::debug!(%player, value, "dice rolled");

        if value == 6 && self.state.bump_consecutive_sixes() == 3 {
            // Roll discarded: three sixes in a row forfeit the turn.
            self.events.push(GameEvent::TripleSix { player });
            self.end_turn();
            return Ok(value);
        }

        let legal = moves::legal_moves(&self.topology, self.state.current_player(), value);
        self.events.push(GameEvent::MovesComputed {
            player,
            count: legal.len(),
        });

        if legal.is_empty() {
            self.end_turn();
        } else {
            let auto = legal.len() == 1;
            let only = legal[0].token;
            self.legal = legal;
            self.phase = TurnPhase::MovesComputed;
            if auto {
                self.apply_move(only)?;
            }
        }

        Ok(value)
    }

    /// Apply the pending roll to `token`. Rejected unless the token is
    /// among the current legal moves.
    pub fn choose_move(&mut self, token: TokenId) -> Result<AppliedMove, EngineError> {
        self.ensure_active()?;
        match self.phase {
            TurnPhase::MovesComputed => {}
            TurnPhase::AwaitingRoll => return Err(EngineError::NoRollPending),
            TurnPhase::MoveInProgress | TurnPhase::TurnSettled => {
                return Err(EngineError::MoveInProgress)
            }
        }
        self.apply_move(token)
    }

    /// Let the heuristic pick and apply a move for the current player.
    /// Valid only when the current player is computer-controlled and a
    /// choice is pending.
    pub fn request_ai_move(&mut self) -> Result<TokenId, EngineError> {
        self.ensure_active()?;
        if !self.state.current_player().is_ai() {
            return Err(EngineError::NotAiTurn);
        }
        match self.phase {
            TurnPhase::MovesComputed => {}
            TurnPhase::AwaitingRoll => return Err(EngineError::NoRollPending),
            TurnPhase::MoveInProgress | TurnPhase::TurnSettled => {
                return Err(EngineError::MoveInProgress)
            }
        }

        let chosen = ai::choose_move(&self.state, &self.topology, &self.legal, &mut self.rng)
            .expect("legal moves are non-empty in MovesComputed")
            .token;
        self.apply_move(chosen)?;
        Ok(chosen)
    }

    /// Drive consecutive computer turns (roll, pick via the heuristic,
    /// settle) until a human player is up or the game ends. Returns the
    /// number of rolls taken.
    pub fn play_ai_turns(&mut self) -> Result<usize, EngineError> {
        let mut rolls = 0;
        while !self.is_over() && self.state.current_player().is_ai() {
            self.roll_dice()?;
            if self.phase == TurnPhase::MovesComputed {
                self.request_ai_move()?;
            }
            rolls += 1;
        }
        Ok(rolls)
    }

    // === Persistence ===

    /// The minimal record needed to resume this game.
    #[must_use]
    pub fn snapshot(&self) -> SavedGame {
        SavedGame::from_state(&self.state)
    }

    /// Remove the saved record, if a store is attached.
    pub fn clear_saved_state(&mut self) {
        self.clear_saved();
    }

    /// Abandon this game: remove the saved record and hand back the store
    /// for the next game.
    pub fn reset(mut self) -> Option<Box<dyn SaveStore>> {
        self.clear_saved();
        self.store.take()
    }

    // === Internals ===

    fn ensure_active(&self) -> Result<(), EngineError> {
        if self.state.is_over() {
            return Err(EngineError::GameOver);
        }
        if !self.state.is_started() {
            return Err(EngineError::NotStarted);
        }
        Ok(())
    }

    fn apply_move(&mut self, token: TokenId) -> Result<AppliedMove, EngineError> {
        let Some(idx) = self.legal.iter().position(|m| m.token == token) else {
            return Err(EngineError::InvalidMove(token));
        };
        let mv = self.legal.swap_remove(idx);
        self.legal.clear();
        self.phase = TurnPhase::MoveInProgress;

        let player_id = self.state.current_id();
        let color = self.state.current_player().color();

        // Walk cell by cell; every intermediate cell becomes the token's
        // position in turn, one step event each.
        let mut from = self.state.current_player().token(token).position();
        for &cell in &mv.steps {
            self.events.push(GameEvent::TokenStepped {
                color,
                token,
                from,
                to: cell,
            });
            self.state
                .current_player_mut()
                .token_mut(token)
                .set_position(cell);
            from = cell;
        }

        let finished = mv.target == FINISH;
        if finished {
            self.events.push(GameEvent::TokenFinished { color, token });
            tracing::debug!(%color, %token, "token finished");

            if self.state.current_player().has_won() {
                return Ok(self.settle_win(mv, token));
            }
        }

        // A landing on an unprotected main-loop cell sends every opposing
        // token there back to its yard.
        let mut captured = Vec::new();
        if self.topology.is_main_loop(mv.target) && !self.topology.is_safe(mv.target) {
            for (pid, tid) in self.state.opponent_tokens_on_cell(mv.target, color) {
                let enemy_color = self.state.player(pid).color();
                self.state.player_mut(pid).token_mut(tid).send_home();
                self.events.push(GameEvent::TokenCaptured {
                    color: enemy_color,
                    token: tid,
                    cell: mv.target,
                });
                tracing::debug!(%enemy_color, %tid, cell = mv.target, "token captured");
                captured.push((enemy_color, tid));
            }
        }

        self.state.bump_total_moves();
        self.phase = TurnPhase::TurnSettled;

        let bonus = self.state.dice_value() == 6 || !captured.is_empty() || finished;
        if bonus {
            self.state.clear_dice();
            self.phase = TurnPhase::AwaitingRoll;
            self.events.push(GameEvent::BonusTurn { player: player_id });
            self.persist();
        } else {
            self.end_turn();
        }

        Ok(AppliedMove {
            token,
            steps: mv.steps,
            captured,
            finished,
            bonus,
        })
    }

    /// The winning move ends the game before capture, bonus, or counter
    /// processing; the saved record is removed rather than rewritten.
    fn settle_win(&mut self, mv: LegalMove, token: TokenId) -> AppliedMove {
        let player_id = self.state.current_id();
        self.state.mark_over();
        self.phase = TurnPhase::TurnSettled;
        self.events.push(GameEvent::GameWon { player: player_id });
        tracing::info!(%player_id, "game won");
        self.clear_saved();

        AppliedMove {
            token,
            steps: mv.steps,
            captured: Vec::new(),
            finished: true,
            bonus: false,
        }
    }

    fn end_turn(&mut self) {
        self.legal.clear();
        self.phase = TurnPhase::TurnSettled;
        let next_player = self.state.advance_turn();
        self.phase = TurnPhase::AwaitingRoll;
        self.events.push(GameEvent::TurnEnded { next_player });
        tracing::debug!(%next_player, "turn ended");
        self.persist();
    }

    fn persist(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        let record = SavedGame::from_state(&self.state);
        if let Err(err) = store.save(&record) {
            tracing::warn!(%err, "failed to persist game state");
        }
    }

    fn clear_saved(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(err) = store.clear() {
            tracing::warn!(%err, "failed to clear saved game");
        }
    }
}
