//! Policy models.
//!
//! ## Overview
//!
//! - **Trait**: `PolicyEvaluator` (predict / fit / save / load)
//! - **Encoding**: one-hot black/white/empty planes
//! - **Models**: `LinearPolicy` (burn `Linear` layer trained with Adam),
//!   `UniformPolicy` (baseline for testing)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use othello_selfplay::core::{Board, TrainerConfig};
//! use othello_selfplay::nn::{LinearPolicy, PolicyEvaluator};
//!
//! let config = TrainerConfig::default().with_board_size(8);
//! let policy = LinearPolicy::load(&config.model_dir, &config)
//!     .unwrap()
//!     .unwrap_or_else(|| LinearPolicy::from_config(&config));
//! let scores = policy.predict(&Board::new(8));
//! assert_eq!(scores.len(), 64);
//! ```

pub mod encoder;
pub mod linear;
pub mod traits;

pub use encoder::{active_features, encode_board, feature_count, PLANES};
pub use linear::{FitSchedule, LinearPolicy};
pub use traits::{model_path, FitReport, PolicyEvaluator, UniformPolicy};
