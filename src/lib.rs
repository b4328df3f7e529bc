//! # othello-selfplay
//!
//! Trains an Othello move-selection policy by self-play.
//!
//! ## Design Principles
//!
//! 1. **Engine and model are collaborators**: the trainer talks to the board
//!    rules through `GameEngine` and to the model through `PolicyEvaluator`.
//!    Either can be swapped for a scripted stand-in.
//!
//! 2. **Copy on capture**: every recorded training example owns its board.
//!    Nothing captured ever aliases the live game board.
//!
//! 3. **Explicit configuration**: one `TrainerConfig` is built at startup and
//!    passed by reference. No globals.
//!
//! ## Modules
//!
//! - `core`: Colors, moves, boards, configuration, errors
//! - `rules`: `GameEngine` trait and the standard Othello rules
//! - `nn`: `PolicyEvaluator` trait, board encoding, linear softmax policy
//! - `training`: Action selection, symmetry augmentation, outcome filtering,
//!   win/loss record, and the self-play trainer
//! - `play`: Move sources, game driver, human move bridge

pub mod core;
pub mod nn;
pub mod play;
pub mod rules;
pub mod training;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{Board, Color, Move, MoveList, Result, TrainError, TrainerConfig};

pub use crate::rules::{GameEngine, GameOutcome, OthelloEngine};

pub use crate::nn::{FitReport, LinearPolicy, PolicyEvaluator, UniformPolicy};

pub use crate::training::{
    expand, filter_by_outcome, load_or_init, load_or_init_policy, ActionSelector, GameReport,
    Percentages, SelfPlayTrainer, Symmetry, TrainingExample, TrainingSummary, WinLossRecord,
};

pub use crate::play::{
    channel, parse_coordinate, play_game, play_self, GameRecord, HumanBridge, MoveRequest,
    MoveSource,
};
