//! Legal-move computation.
//!
//! A move is a walk of single steps along the board (see
//! [`BoardTopology::next_cell`]). The resolver produces, for one player and
//! one dice value, every token move that is legal right now:
//!
//! - a yard token may only come out on a 6, directly onto its start cell
//! - an on-board token walks `dice` steps, turning into its stretch at the
//!   home-entry cell
//! - a walk that would pass through the center is an overshoot and the
//!   whole move is illegal
//! - finished tokens never move
//!
//! Moves are listed in token-id order with no other preference.

use smallvec::{smallvec, SmallVec};

use crate::board::{BoardTopology, FINISH};
use crate::core::{Color, Player, TokenId};

/// Cells visited by a move, in order. A path never exceeds one die roll.
pub type MovePath = SmallVec<[i8; 6]>;

/// One legal move for one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub token: TokenId,
    /// Final cell of the move.
    pub target: i8,
    /// Every cell visited, in order; the last entry equals `target`.
    pub steps: MovePath,
}

/// Enumerate legal moves for `player` with a roll of `dice`.
#[must_use]
pub fn legal_moves(topology: &BoardTopology, player: &Player, dice: u8) -> Vec<LegalMove> {
    let mut moves = Vec::new();

    for token in player.tokens() {
        if token.is_finished() {
            continue;
        }

        if token.in_yard() {
            if dice == 6 {
                let start = topology.start_index(token.color());
                moves.push(LegalMove {
                    token: token.id(),
                    target: start,
                    steps: smallvec![start],
                });
            }
            continue;
        }

        let steps = move_path(topology, token.color(), token.position(), dice);
        if let Some(&target) = steps.last() {
            moves.push(LegalMove {
                token: token.id(),
                target,
                steps,
            });
        }
    }

    moves
}

/// Walk `dice` single steps from `from`, stopping early on arrival at the
/// center. Returns an empty path if the walk would pass through the center
/// with steps left to consume (overshoot).
#[must_use]
pub fn move_path(topology: &BoardTopology, color: Color, from: i8, dice: u8) -> MovePath {
    let mut steps = MovePath::new();
    let mut pos = from;

    for i in 0..dice {
        let next = topology.next_cell(color, pos);
        if next == FINISH && i + 1 < dice {
            return MovePath::new();
        }
        pos = next;
        steps.push(pos);
        if pos == FINISH {
            break;
        }
    }

    steps
}
