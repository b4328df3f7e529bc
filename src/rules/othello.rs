//! Reference Othello rules.
//!
//! - Even-sized N×N board, four centre discs: white on the main diagonal
//!   of the centre square, black on the anti-diagonal. Black moves first.
//! - A placement must flank at least one contiguous run of opponent discs
//!   between the new disc and an existing own disc, in any of the 8
//!   directions. Every flanked run flips.
//! - A color with no placement passes (handled by the game driver).
//! - The game ends when neither color can place; more discs wins.

use smallvec::SmallVec;

use crate::core::{Board, Color, Move, MoveList, Result, TrainError};

use super::engine::{GameEngine, GameOutcome};

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Standard Othello on a configurable even-sized board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OthelloEngine {
    size: usize,
}

impl OthelloEngine {
    /// Create an engine for `size`×`size` boards.
    ///
    /// # Panics
    /// Panics if `size` is odd or smaller than 4.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(
            size >= 4 && size % 2 == 0,
            "Othello board size must be even and at least 4"
        );
        Self { size }
    }

    /// Indices of the opponent discs that `mv` would flip.
    ///
    /// Empty if the move is illegal.
    fn flips(&self, board: &Board, color: Color, mv: Move) -> SmallVec<[usize; 16]> {
        let mut flips = SmallVec::new();
        if !board.is_empty_at(mv) {
            return flips;
        }

        let me = color.sign();
        let opp = color.opponent().sign();
        let cells = board.cells();
        let n = self.size as isize;

        for (dr, dc) in DIRECTIONS {
            let mut ray: SmallVec<[usize; 8]> = SmallVec::new();
            let mut r = mv.row as isize + dr;
            let mut c = mv.col as isize + dc;
            while (0..n).contains(&r) && (0..n).contains(&c) {
                let index = (r * n + c) as usize;
                let cell = cells[index];
                if cell == opp {
                    ray.push(index);
                } else {
                    if cell == me {
                        flips.extend(ray.drain(..));
                    }
                    break;
                }
                r += dr;
                c += dc;
            }
        }
        flips
    }
}

impl GameEngine for OthelloEngine {
    fn board_size(&self) -> usize {
        self.size
    }

    fn new_board(&self) -> Board {
        let mut board = Board::new(self.size);
        let c = self.size / 2;
        board.set(Move::new(c - 1, c - 1), Some(Color::White));
        board.set(Move::new(c, c), Some(Color::White));
        board.set(Move::new(c - 1, c), Some(Color::Black));
        board.set(Move::new(c, c - 1), Some(Color::Black));
        board
    }

    fn valid_moves(&self, board: &Board, color: Color) -> MoveList {
        (0..board.area())
            .map(|index| Move::from_index(index, self.size))
            .filter(|&mv| !self.flips(board, color, mv).is_empty())
            .collect()
    }

    fn is_valid_move(&self, board: &Board, color: Color, mv: Move) -> bool {
        mv.in_bounds(self.size) && !self.flips(board, color, mv).is_empty()
    }

    fn execute_move(&self, board: &mut Board, color: Color, mv: Move) -> Result<()> {
        if !mv.in_bounds(self.size) {
            return Err(TrainError::OutOfBounds {
                mv,
                size: self.size,
            });
        }
        let flips = self.flips(board, color, mv);
        if flips.is_empty() {
            return Err(TrainError::IllegalMove { mv, color });
        }

        board.set(mv, Some(color));
        for index in flips {
            board.set(Move::from_index(index, self.size), Some(color));
        }
        Ok(())
    }

    fn outcome(&self, board: &Board) -> Option<GameOutcome> {
        if self.has_moves(board, Color::Black) || self.has_moves(board, Color::White) {
            return None;
        }
        let black = board.count(Color::Black);
        let white = board.count(Color::White);
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameOutcome::BlackWins,
            std::cmp::Ordering::Less => GameOutcome::WhiteWins,
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        })
    }
}
