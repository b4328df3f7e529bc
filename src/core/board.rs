//! Board grid.
//!
//! An N×N grid of cells holding `0` (empty), `+1` (black) or `-1` (white),
//! stored row-major. `Board` owns its cells, so `clone()` always yields an
//! independent snapshot; nothing in the crate hands out a shared view of a
//! live board.

use serde::{Deserialize, Serialize};

use super::action::Move;
use super::color::Color;
use super::error::{Result, TrainError};

/// Square game board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<i8>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from row-major cell values.
    ///
    /// Values are clamped to their sign, so any positive value is black.
    pub fn from_cells(size: usize, cells: Vec<i8>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(TrainError::InvalidConfig(format!(
                "board of size {size} needs {} cells, got {}",
                size * size,
                cells.len()
            )));
        }
        let cells = cells.into_iter().map(i8::signum).collect();
        Ok(Self { size, cells })
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N²).
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell values.
    #[must_use]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Raw cell value, `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, mv: Move) -> Option<i8> {
        if mv.in_bounds(self.size) {
            Some(self.cells[mv.index(self.size)])
        } else {
            None
        }
    }

    /// Occupant of a cell. `None` for empty or out-of-bounds cells.
    #[must_use]
    pub fn get(&self, mv: Move) -> Option<Color> {
        self.cell(mv).and_then(Color::from_sign)
    }

    /// Whether a cell is on the board and empty.
    #[must_use]
    pub fn is_empty_at(&self, mv: Move) -> bool {
        self.cell(mv) == Some(0)
    }

    /// Place (or clear, with `None`) a disc.
    ///
    /// # Panics
    /// Panics if `mv` is off the board.
    pub fn set(&mut self, mv: Move, occupant: Option<Color>) {
        assert!(
            mv.in_bounds(self.size),
            "move {mv} is outside a {0}x{0} board",
            self.size
        );
        let index = mv.index(self.size);
        self.cells[index] = occupant.map_or(0, Color::sign);
    }

    /// Number of discs of one color.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        let sign = color.sign();
        self.cells.iter().filter(|&&c| c == sign).count()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }
}

/// Text grid: `X` black, `O` white, `.` empty, with column letters and
/// 1-based row numbers.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, " {}", (b'A' + (col % 26) as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>3}", row + 1)?;
            for col in 0..self.size {
                let symbol = match self.get(Move::new(row, col)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
