//! Core type bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::{Board, Color, Move};
use crate::rules::{GameEngine, OthelloEngine};

use super::to_py_err;

/// Python wrapper for Board.
#[pyclass(name = "Board")]
#[derive(Clone, Debug)]
pub struct PyBoard(pub Board);

#[pymethods]
impl PyBoard {
    /// Create an empty board.
    #[new]
    fn new(size: usize) -> Self {
        Self(Board::new(size))
    }

    /// Standard starting position.
    #[staticmethod]
    fn initial(size: usize) -> PyResult<Self> {
        if size < 4 || size % 2 != 0 {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "board size must be even and at least 4, got {size}"
            )));
        }
        Ok(Self(OthelloEngine::new(size).new_board()))
    }

    /// Build a board from a flat row-major list of +1 / -1 / 0.
    #[staticmethod]
    fn from_cells(size: usize, cells: Vec<i8>) -> PyResult<Self> {
        Board::from_cells(size, cells).map(Self).map_err(to_py_err)
    }

    #[getter]
    fn size(&self) -> usize {
        self.0.size()
    }

    /// Cell value: +1 black, -1 white, 0 empty.
    fn get(&self, row: usize, col: usize) -> Option<i8> {
        self.0.cell(Move::new(row, col))
    }

    /// Disc count for a color given by sign.
    fn count(&self, sign: i8) -> usize {
        Color::from_sign(sign).map_or(0, |color| self.0.count(color))
    }

    /// Cells as a flat numpy array.
    fn cells_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i8>> {
        PyArray1::from_slice_bound(py, self.0.cells())
    }

    fn __repr__(&self) -> String {
        format!("Board(size={})", self.0.size())
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
