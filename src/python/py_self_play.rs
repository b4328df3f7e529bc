//! Self-play bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::{Color, TrainerConfig};
use crate::nn::{LinearPolicy, PolicyEvaluator};
use crate::rules::OthelloEngine;
use crate::training::{load_or_init_policy, SelfPlayTrainer, TrainingSummary};

use super::py_core::PyBoard;
use super::py_training::PyTrainingExample;
use super::to_py_err;

/// Python wrapper for TrainerConfig.
#[pyclass(name = "TrainerConfig")]
#[derive(Clone)]
pub struct PyTrainerConfig(pub TrainerConfig);

#[pymethods]
impl PyTrainerConfig {
    /// Create a training configuration.
    ///
    /// # Arguments
    /// - board_size: Side length (default: 10)
    /// - games: Self-play games per run (default: 1000)
    /// - batch_size: Mini-batch size (default: 64)
    /// - epochs: Training epochs per run (default: 50)
    /// - model_dir: Directory for saved models (default: "models")
    /// - learning_rate: Initial learning rate (default: 0.002)
    /// - seed: RNG seed (default: 42)
    /// - verbose: Log every game (default: True)
    #[new]
    #[pyo3(signature = (
        board_size = 10,
        games = 1000,
        batch_size = 64,
        epochs = 50,
        model_dir = String::from("models"),
        learning_rate = 0.002,
        seed = 42,
        verbose = true
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        board_size: usize,
        games: usize,
        batch_size: usize,
        epochs: usize,
        model_dir: String,
        learning_rate: f32,
        seed: u64,
        verbose: bool,
    ) -> PyResult<Self> {
        let config = TrainerConfig::default()
            .with_board_size(board_size)
            .with_games(games)
            .with_batch_size(batch_size)
            .with_epochs(epochs)
            .with_model_dir(model_dir)
            .with_learning_rate(learning_rate)
            .with_seed(seed)
            .with_verbose(verbose);
        config.validate().map_err(to_py_err)?;
        Ok(Self(config))
    }

    /// Parse a TOML document.
    #[staticmethod]
    fn from_toml(text: &str) -> PyResult<Self> {
        TrainerConfig::from_toml_str(text)
            .map(Self)
            .map_err(to_py_err)
    }

    #[getter]
    fn board_size(&self) -> usize {
        self.0.board_size
    }

    #[getter]
    fn games(&self) -> usize {
        self.0.games
    }

    #[getter]
    fn batch_size(&self) -> usize {
        self.0.batch_size
    }

    #[getter]
    fn epochs(&self) -> usize {
        self.0.epochs
    }

    #[getter]
    fn model_dir(&self) -> String {
        self.0.model_dir.display().to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "TrainerConfig(board_size={}, games={}, batch_size={}, epochs={})",
            self.0.board_size, self.0.games, self.0.batch_size, self.0.epochs
        )
    }
}

/// Python wrapper for TrainingSummary.
#[pyclass(name = "TrainingSummary")]
#[derive(Clone)]
pub struct PyTrainingSummary(pub TrainingSummary);

#[pymethods]
impl PyTrainingSummary {
    #[getter]
    fn games(&self) -> usize {
        self.0.games
    }

    #[getter]
    fn examples(&self) -> usize {
        self.0.examples
    }

    /// Whether the evaluator was trained.
    #[getter]
    fn trained(&self) -> bool {
        self.0.fit.is_some()
    }

    /// Final epoch loss, if trained.
    #[getter]
    fn final_loss(&self) -> Option<f32> {
        self.0.fit.as_ref().map(|f| f.final_loss)
    }

    #[getter]
    fn model_path(&self) -> Option<String> {
        self.0.model_path.as_ref().map(|p| p.display().to_string())
    }

    /// (win, lose, draw) percentages, or None before any game.
    #[getter]
    fn percentages(&self) -> Option<(f64, f64, f64)> {
        self.0.percentages.map(|p| (p.win, p.lose, p.draw))
    }

    fn __repr__(&self) -> String {
        format!(
            "TrainingSummary(games={}, examples={}, trained={})",
            self.0.games,
            self.0.examples,
            self.0.fit.is_some()
        )
    }
}

/// Self-play trainer on the standard rules with a linear policy.
///
/// Concrete type so PyO3 does not have to deal with generics.
#[pyclass(name = "SelfPlayTrainer")]
pub struct PySelfPlayTrainer {
    inner: SelfPlayTrainer<OthelloEngine, LinearPolicy>,
}

#[pymethods]
impl PySelfPlayTrainer {
    /// Create a trainer, loading a saved model from `config.model_dir` if
    /// one exists.
    #[new]
    fn new(config: &PyTrainerConfig) -> PyResult<Self> {
        let config = &config.0;
        config.validate().map_err(to_py_err)?;
        let policy = load_or_init_policy(config).map_err(to_py_err)?;
        let inner = SelfPlayTrainer::new(OthelloEngine::new(config.board_size), policy, config)
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Play games, train and save.
    fn run(
        &mut self,
        py: Python<'_>,
        num_games: usize,
        batch_size: usize,
        epochs: usize,
    ) -> PyResult<PyTrainingSummary> {
        // Release the GIL during the run
        let inner = &mut self.inner;
        py.allow_threads(|| inner.run(num_games, batch_size, epochs))
            .map(PyTrainingSummary)
            .map_err(to_py_err)
    }

    /// Play one game and return the examples it contributed.
    fn play_one(&mut self) -> PyResult<Vec<PyTrainingExample>> {
        let report = self.inner.play_one().map_err(to_py_err)?;
        Ok(report.examples.into_iter().map(PyTrainingExample).collect())
    }

    /// Raw evaluator scores for a board.
    fn predict<'py>(&self, py: Python<'py>, board: &PyBoard) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_vec_bound(py, self.inner.evaluator().predict(&board.0))
    }

    /// Scores with illegal cells zeroed, for the color given by sign.
    fn masked_predict<'py>(
        &self,
        py: Python<'py>,
        board: &PyBoard,
        color: i8,
    ) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let color = Color::from_sign(color).ok_or_else(|| {
            pyo3::exceptions::PyValueError::new_err("color must be +1 or -1")
        })?;
        let scores = self
            .inner
            .selector()
            .masked_preferences(&board.0, color)
            .map_err(to_py_err)?;
        Ok(PyArray1::from_vec_bound(py, scores))
    }

    /// (win, lose, draw) counts of the tracked color.
    fn record(&self) -> (u64, u64, u64) {
        let record = self.inner.record();
        (record.wins(), record.losses(), record.draws())
    }

    /// Log the win/lose/draw percentages and return them.
    fn report(&self) -> Option<(f64, f64, f64)> {
        self.inner.record().report().map(|p| (p.win, p.lose, p.draw))
    }

    fn __repr__(&self) -> String {
        let record = self.inner.record();
        format!(
            "SelfPlayTrainer(board_size={}, games={})",
            self.inner.config().board_size,
            record.total()
        )
    }
}
