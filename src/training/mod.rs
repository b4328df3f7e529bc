//! Self-play training.
//!
//! ## Pipeline
//!
//! 1. `ActionSelector` picks moves for both seats and, while collecting,
//!    records `(board, one-hot move, color)` for every decision
//! 2. `expand_example` turns each decision into its 8 rotations/mirrors
//! 3. `filter_by_outcome` keeps the winner's decisions (both on a draw)
//! 4. `SelfPlayTrainer` gathers the corpus over many games, trains the
//!    evaluator and saves it
//! 5. `WinLossRecord` counts results for one tracked color
//!
//! ## Usage
//!
//! ```rust,no_run
//! use othello_selfplay::core::TrainerConfig;
//! use othello_selfplay::rules::OthelloEngine;
//! use othello_selfplay::training::{load_or_init_policy, SelfPlayTrainer};
//!
//! let config = TrainerConfig::default().with_board_size(8).with_games(10);
//! let policy = load_or_init_policy(&config).unwrap();
//! let mut trainer = SelfPlayTrainer::new(OthelloEngine::new(8), policy, &config).unwrap();
//! let summary = trainer.run_configured().unwrap();
//! println!("{} examples", summary.examples);
//! ```

pub mod example;
pub mod record;
pub mod selector;
pub mod self_play;
pub mod symmetry;

pub use example::{filter_by_outcome, keeps, TrainingExample};
pub use record::{Percentages, WinLossRecord};
pub use selector::{argmax_first, legal_mask, ActionSelector};
pub use self_play::{load_or_init, load_or_init_policy, GameReport, SelfPlayTrainer, TrainingSummary};
pub use symmetry::{expand, expand_example, Symmetry};
