//! Computer-player move selection.
//!
//! A scoring pass over the legal-move list for the current player. The
//! deterministic part of the score is fixed by the move; a small uniform
//! perturbation breaks ties so equal-score moves don't always resolve the
//! same way, while staying reproducible under a seeded [`GameRng`].

use crate::board::{BoardTopology, FINISH};
use crate::core::{GameRng, GameState};
use crate::moves::LegalMove;

const FINISH_SCORE: f32 = 1000.0;
const CAPTURE_SCORE: f32 = 500.0;
const YARD_EXIT_SCORE: f32 = 200.0;
const SAFE_CELL_SCORE: f32 = 100.0;
const TIE_BREAK_RANGE: f32 = 50.0;

/// Deterministic part of a move's score for the current player. Applicable
/// bonuses stack.
#[must_use]
pub fn score_move(state: &GameState, topology: &BoardTopology, mv: &LegalMove) -> f32 {
    let player = state.current_player();
    let mut score = 0.0;

    if mv.target == FINISH {
        score += FINISH_SCORE;
    }
    if player.token(mv.token).in_yard() {
        score += YARD_EXIT_SCORE;
    }
    if topology.is_main_loop(mv.target)
        && !topology.is_safe(mv.target)
        && !state
            .opponent_tokens_on_cell(mv.target, player.color())
            .is_empty()
    {
        score += CAPTURE_SCORE;
    }
    if topology.is_safe(mv.target) {
        score += SAFE_CELL_SCORE;
    }

    score
}

/// Pick the best move for the current player, ties broken by a uniform
/// draw from `rng`. Returns `None` only for an empty move list.
pub fn choose_move<'a>(
    state: &GameState,
    topology: &BoardTopology,
    moves: &'a [LegalMove],
    rng: &mut GameRng,
) -> Option<&'a LegalMove> {
    let mut best = None;
    let mut best_score = f32::NEG_INFINITY;

    for mv in moves {
        let score = score_move(state, topology, mv) + rng.gen_f32() * TIE_BREAK_RANGE;
        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }

    best
}
