//! Training data bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::Color;
use crate::training::{expand, TrainingExample};

use super::py_core::PyBoard;
use super::to_py_err;

/// Python wrapper for TrainingExample.
#[pyclass(name = "TrainingExample")]
#[derive(Clone, Debug)]
pub struct PyTrainingExample(pub TrainingExample);

#[pymethods]
impl PyTrainingExample {
    /// Board before the move.
    #[getter]
    fn board(&self) -> PyBoard {
        PyBoard(self.0.board.clone())
    }

    /// Acting color as a sign: +1 black, -1 white.
    #[getter]
    fn color(&self) -> i8 {
        self.0.color.sign()
    }

    /// Index of the target cell.
    fn target_index(&self) -> Option<usize> {
        self.0.target_index()
    }

    /// Target policy as numpy array.
    fn policy_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, &self.0.policy)
    }

    fn __repr__(&self) -> String {
        let color = match self.0.color {
            Color::Black => "black",
            Color::White => "white",
        };
        format!(
            "TrainingExample(color={}, target={:?})",
            color,
            self.0.target_index()
        )
    }
}

/// All 8 rotations/mirrors of a board and its flat target policy.
#[pyfunction]
pub fn expand_symmetries<'py>(
    py: Python<'py>,
    board: &PyBoard,
    policy: Vec<f32>,
) -> PyResult<Vec<(PyBoard, Bound<'py, PyArray1<f32>>)>> {
    let pairs = expand(&board.0, &policy).map_err(to_py_err)?;
    Ok(pairs
        .into_iter()
        .map(|(b, p)| (PyBoard(b), PyArray1::from_vec_bound(py, p)))
        .collect())
}
