//! Python bindings for othello-selfplay.
//!
//! # Quick Start
//!
//! ```python
//! import othello_selfplay as osp
//!
//! config = osp.TrainerConfig(board_size=8, games=100, epochs=10)
//! trainer = osp.SelfPlayTrainer(config)
//!
//! summary = trainer.run(config.games, config.batch_size, config.epochs)
//! print(summary.examples, trainer.record())
//!
//! board = osp.Board.initial(8)
//! scores = trainer.predict(board)   # numpy float32, length 64
//! ```

use pyo3::exceptions::{PyConnectionError, PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::TrainError;

mod py_core;
mod py_self_play;
mod py_training;

pub use py_core::*;
pub use py_self_play::*;
pub use py_training::*;

/// Map a library error to the closest Python exception.
pub(crate) fn to_py_err(err: TrainError) -> PyErr {
    let message = err.to_string();
    match err {
        TrainError::Io(_) => PyIOError::new_err(message),
        TrainError::Disconnected => PyConnectionError::new_err(message),
        TrainError::CorruptModel { .. } | TrainError::ModelSizeMismatch { .. } => {
            PyRuntimeError::new_err(message)
        }
        _ => PyValueError::new_err(message),
    }
}

/// othello_selfplay: self-play policy training for Othello.
#[pymodule]
fn othello_selfplay(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core types
    m.add_class::<PyBoard>()?;

    // Training types
    m.add_class::<PyTrainingExample>()?;
    m.add_function(wrap_pyfunction!(expand_symmetries, m)?)?;

    // Self-play
    m.add_class::<PyTrainerConfig>()?;
    m.add_class::<PyTrainingSummary>()?;
    m.add_class::<PySelfPlayTrainer>()?;

    Ok(())
}
