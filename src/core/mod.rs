//! Core types: colors, moves, boards, configuration, errors.
//!
//! Everything here is independent of any particular rules engine or
//! policy model.

pub mod action;
pub mod board;
pub mod color;
pub mod config;
pub mod error;

pub use action::{Move, MoveList};
pub use board::Board;
pub use color::Color;
pub use config::TrainerConfig;
pub use error::{Result, TrainError};
