//! Training configuration.
//!
//! One `TrainerConfig` is built at startup (defaults, then an optional TOML
//! file, then CLI overrides) and passed by reference to the trainer, the
//! action selector and the evaluator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{Result, TrainError};

/// Self-play training parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Side length of the board.
    pub board_size: usize,

    /// Self-play games per training run.
    pub games: usize,

    /// Mini-batch size for `fit`.
    pub batch_size: usize,

    /// Training epochs per run.
    pub epochs: usize,

    /// Seat whose results the win/loss record counts.
    pub tracked_color: Color,

    /// Added to every raw preference before masking, so a legal cell
    /// always outranks an illegal one even when the model scores it 0.
    pub preference_epsilon: f32,

    /// Directory holding persisted models.
    pub model_dir: PathBuf,

    /// Initial learning rate.
    pub learning_rate: f32,

    /// Epochs without loss improvement before the learning rate is cut.
    pub lr_patience: usize,

    /// Multiplier applied to the learning rate on a plateau.
    pub lr_factor: f32,

    /// Floor for the learning rate.
    pub min_learning_rate: f32,

    /// Epochs without loss improvement before training stops.
    pub early_stop_patience: usize,

    /// Seed for weight initialisation and batch shuffling.
    pub seed: u64,

    /// Log every self-play game at info level.
    pub verbose: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            board_size: 10,
            games: 1000,
            batch_size: 64,
            epochs: 50,
            tracked_color: Color::Black,
            preference_epsilon: 1e-30,
            model_dir: PathBuf::from("models"),
            learning_rate: 0.002,
            lr_patience: 5,
            lr_factor: 0.5,
            min_learning_rate: 1e-6,
            early_stop_patience: 10,
            seed: 42,
            verbose: true,
        }
    }
}

impl TrainerConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TrainError::InvalidConfig(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set the board size.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the number of self-play games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the mini-batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the number of epochs.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the tracked color.
    pub fn with_tracked_color(mut self, color: Color) -> Self {
        self.tracked_color = color;
        self
    }

    /// Set the model directory.
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = dir.into();
        self
    }

    /// Set the initial learning rate.
    pub fn with_learning_rate(mut self, lr: f32) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set per-game logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Number of cells, i.e. the policy vector length.
    #[must_use]
    pub fn area(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.board_size < 4 || self.board_size % 2 != 0 {
            return Err(TrainError::InvalidConfig(format!(
                "board_size must be even and at least 4, got {}",
                self.board_size
            )));
        }
        if self.board_size > 26 {
            return Err(TrainError::InvalidConfig(format!(
                "board_size must be at most 26, got {}",
                self.board_size
            )));
        }
        if self.batch_size == 0 {
            return Err(TrainError::InvalidConfig("batch_size must be positive".into()));
        }
        if !(self.learning_rate > 0.0) || !(self.min_learning_rate > 0.0) {
            return Err(TrainError::InvalidConfig(
                "learning rates must be positive".into(),
            ));
        }
        if !(self.lr_factor > 0.0 && self.lr_factor <= 1.0) {
            return Err(TrainError::InvalidConfig(format!(
                "lr_factor must be in (0, 1], got {}",
                self.lr_factor
            )));
        }
        if !(self.preference_epsilon > 0.0) {
            return Err(TrainError::InvalidConfig(
                "preference_epsilon must be positive".into(),
            ));
        }
        Ok(())
    }
}
