//! Policy evaluator contract.
//!
//! The trainer treats the model as opaque: it can score a board, be
//! trained on examples, be written to a directory and be read back from
//! one. Model files are keyed by board size (`model_<N>x<N>.bin`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Board, Result, TrainerConfig};
use crate::training::TrainingExample;

/// Summary of one `fit` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Epochs actually run (may be fewer than requested on early stop).
    pub epochs_run: usize,

    /// Mean loss of the last epoch.
    pub final_loss: f32,

    /// Lowest epoch loss seen. These weights are the ones kept.
    pub best_loss: f32,

    /// Learning rate at the end of training.
    pub learning_rate: f32,

    /// Whether training stopped before `epochs`.
    pub stopped_early: bool,
}

/// Board → per-cell preference model.
///
/// `predict` must return `board_size²` non-negative scores in row-major
/// order. The scores need not be masked to legal moves.
pub trait PolicyEvaluator {
    /// Side length of the boards this model scores.
    fn board_size(&self) -> usize;

    /// Per-cell preference scores.
    fn predict(&self, board: &Board) -> Vec<f32>;

    /// Train in place.
    fn fit(
        &mut self,
        examples: &[TrainingExample],
        batch_size: usize,
        epochs: usize,
    ) -> Result<FitReport>;

    /// Persist under `dir`.
    fn save(&self, dir: &Path) -> Result<()>;

    /// Read a model previously written by `save`.
    ///
    /// `Ok(None)` means nothing is stored for `config.board_size`, so the
    /// caller should start fresh. A stored model that cannot be used is an
    /// error. Evaluators without persistence never find one.
    fn load(_dir: &Path, _config: &TrainerConfig) -> Result<Option<Self>>
    where
        Self: Sized,
    {
        Ok(None)
    }

    /// Where `save` writes for this board size.
    fn model_path(&self, dir: &Path) -> PathBuf {
        model_path(dir, self.board_size())
    }
}

/// Model file for a board size inside `dir`.
#[must_use]
pub fn model_path(dir: &Path, board_size: usize) -> PathBuf {
    dir.join(format!("model_{board_size}x{board_size}.bin"))
}

/// Uniform policy (baseline for testing).
///
/// Scores every cell equally, so after masking the selector always picks
/// the first legal move. Training and saving are no-ops.
#[derive(Clone, Debug, Default)]
pub struct UniformPolicy {
    board_size: usize,
}

impl UniformPolicy {
    /// Create a new uniform policy.
    pub fn new(board_size: usize) -> Self {
        Self { board_size }
    }
}

impl PolicyEvaluator for UniformPolicy {
    fn board_size(&self) -> usize {
        self.board_size
    }

    fn predict(&self, _board: &Board) -> Vec<f32> {
        let area = self.board_size * self.board_size;
        if area == 0 {
            return vec![];
        }
        vec![1.0 / area as f32; area]
    }

    fn fit(
        &mut self,
        _examples: &[TrainingExample],
        _batch_size: usize,
        _epochs: usize,
    ) -> Result<FitReport> {
        Ok(FitReport::default())
    }

    fn save(&self, _dir: &Path) -> Result<()> {
        Ok(())
    }
}
