//! Game engine trait for board rules.
//!
//! The trainer never interprets Othello rules directly. It asks a
//! `GameEngine` for:
//! - The starting board
//! - Which cells are legal for a color
//! - How a move changes the board
//! - Whether the game is over, and who won

use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, Move, MoveList, Result};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl GameOutcome {
    /// `+1` black wins, `-1` white wins, `0` draw.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            GameOutcome::BlackWins => 1,
            GameOutcome::WhiteWins => -1,
            GameOutcome::Draw => 0,
        }
    }

    /// Outcome for a sign value. Any positive value is a black win.
    #[must_use]
    pub const fn from_sign(sign: i8) -> Self {
        if sign > 0 {
            GameOutcome::BlackWins
        } else if sign < 0 {
            GameOutcome::WhiteWins
        } else {
            GameOutcome::Draw
        }
    }

    /// Outcome where `color` won.
    #[must_use]
    pub const fn won_by(color: Color) -> Self {
        match color {
            Color::Black => GameOutcome::BlackWins,
            Color::White => GameOutcome::WhiteWins,
        }
    }

    /// Winning color, `None` on a draw.
    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::BlackWins => Some(Color::Black),
            GameOutcome::WhiteWins => Some(Color::White),
            GameOutcome::Draw => None,
        }
    }

    /// Check if a color won.
    #[must_use]
    pub fn is_winner(self, color: Color) -> bool {
        self.winner() == Some(color)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::BlackWins => write!(f, "black wins"),
            GameOutcome::WhiteWins => write!(f, "white wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `valid_moves`: row-major order; empty if the color can't move
/// - `execute_move`: mutates in place, must reject illegal moves
/// - `outcome`: `None` while the game continues
pub trait GameEngine {
    /// Side length of the boards this engine plays on.
    fn board_size(&self) -> usize;

    /// Starting position.
    fn new_board(&self) -> Board;

    /// Legal placements for `color`.
    fn valid_moves(&self, board: &Board, color: Color) -> MoveList;

    /// Apply a move for `color`.
    fn execute_move(&self, board: &mut Board, color: Color, mv: Move) -> Result<()>;

    /// Check if the game is over.
    ///
    /// Returns `Some(outcome)` if the game has ended, `None` if it continues.
    fn outcome(&self, board: &Board) -> Option<GameOutcome>;

    // === Convenience Methods ===

    /// Check a single placement.
    ///
    /// Default implementation scans `valid_moves`.
    fn is_valid_move(&self, board: &Board, color: Color, mv: Move) -> bool {
        self.valid_moves(board, color).contains(&mv)
    }

    /// Check if `color` has any legal placement.
    fn has_moves(&self, board: &Board, color: Color) -> bool {
        !self.valid_moves(board, color).is_empty()
    }
}
