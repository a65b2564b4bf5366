//! Static board topology: the shared main loop, the private home stretches,
//! and the safe-cell set.
//!
//! ## Cell indexing
//!
//! - `0..=51`: the shared main loop, divided into four 13-cell arcs with
//!   one color entering at the head of each arc
//! - `52..=71`: the private home stretches, five cells per color in seat
//!   order (red `52..=56`, green `57..=61`, yellow `62..=66`, blue `67..=71`)
//! - `72`: the center finish cell
//! - `-1`: the home yard (off the board entirely)
//!
//! A color leaves the loop at its home-entry cell, which sits two cells
//! before its start cell, and walks its stretch toward the center. The last
//! stretch cell pivots into the finish.
//!
//! Everything here is fixed at construction; `BoardTopology` never mutates.

use rustc_hash::FxHashSet;

use crate::core::Color;

/// Number of cells on the shared main loop.
pub const MAIN_LOOP_LEN: i8 = 52;

/// Cells between consecutive color entries on the main loop.
pub const ARC_LEN: i8 = 13;

/// Cells in each color's private home stretch.
pub const HOME_STRETCH_LEN: i8 = 5;

/// Position of a token still in its home yard.
pub const HOME_YARD: i8 = -1;

/// The center finish cell.
pub const FINISH: i8 = 72;

/// Main-loop cells where captures cannot occur: the four start cells plus
/// four star cells.
const SAFE_CELLS: [i8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// The static path model shared by every game.
///
/// Answers the per-color index questions (start, home entry, stretch start)
/// and whether a main-loop cell is protected from capture.
#[derive(Clone, Debug)]
pub struct BoardTopology {
    safe_cells: FxHashSet<i8>,
}

impl BoardTopology {
    /// Build the topology.
    #[must_use]
    pub fn new() -> Self {
        Self {
            safe_cells: SAFE_CELLS.iter().copied().collect(),
        }
    }

    /// The main-loop cell a color's tokens enter on when leaving the yard.
    #[must_use]
    pub fn start_index(&self, color: Color) -> i8 {
        ARC_LEN * color.index() as i8
    }

    /// The last main-loop cell a color visits before turning into its
    /// private stretch.
    #[must_use]
    pub fn home_entry_index(&self, color: Color) -> i8 {
        (self.start_index(color) + MAIN_LOOP_LEN - 2) % MAIN_LOOP_LEN
    }

    /// The first cell of a color's private stretch.
    #[must_use]
    pub fn home_stretch_start(&self, color: Color) -> i8 {
        MAIN_LOOP_LEN + HOME_STRETCH_LEN * color.index() as i8
    }

    /// The last cell of a color's private stretch; the next step from here
    /// is the finish.
    #[must_use]
    pub fn home_stretch_last(&self, color: Color) -> i8 {
        self.home_stretch_start(color) + HOME_STRETCH_LEN - 1
    }

    /// Whether `cell` is on the shared main loop.
    #[must_use]
    pub fn is_main_loop(&self, cell: i8) -> bool {
        (0..MAIN_LOOP_LEN).contains(&cell)
    }

    /// Whether `cell` is a main-loop cell protected from capture.
    #[must_use]
    pub fn is_safe(&self, cell: i8) -> bool {
        self.safe_cells.contains(&cell)
    }

    /// The cell one step ahead of `pos` for a token of `color`.
    ///
    /// The step rule, in order:
    /// 1. the home-entry cell turns into the stretch,
    /// 2. a stretch cell (except the last) advances along the stretch,
    /// 3. the last stretch cell pivots into the finish,
    /// 4. any other main-loop cell advances around the loop.
    #[must_use]
    pub fn next_cell(&self, color: Color, pos: i8) -> i8 {
        let stretch = self.home_stretch_start(color);
        if pos == self.home_entry_index(color) {
            stretch
        } else if pos >= stretch && pos < self.home_stretch_last(color) {
            pos + 1
        } else if pos == self.home_stretch_last(color) {
            FINISH
        } else {
            (pos + 1) % MAIN_LOOP_LEN
        }
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::new()
    }
}
