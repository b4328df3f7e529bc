//! Moves on the board.
//!
//! A `Move` is a `(row, col)` cell. The flat, row-major index
//! `row * size + col` is how moves line up with policy vectors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Legal-move list. Mid-game Othello positions rarely exceed 32 moves.
pub type MoveList = SmallVec<[Move; 32]>;

/// A placement at `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Create a new move.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move for a row-major index on a `size`×`size` board.
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Row-major index on a `size`×`size` board.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Whether the move lies on a `size`×`size` board.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

/// Column letter followed by the 1-based row, e.g. `D3`.
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = (b'A' + (self.col % 26) as u8) as char;
        write!(f, "{}{}", letter, self.row + 1)
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
