use std::path::PathBuf;

use thiserror::Error;

use super::action::Move;
use super::color::Color;

#[derive(Error, Debug)]
pub enum TrainError {
    #[error("Policy vector has length {actual}, expected {expected}")]
    PolicyLength { expected: usize, actual: usize },

    #[error("Evaluator scored legal move {mv} as {value}")]
    NonFiniteScore { mv: Move, value: f32 },

    #[error("No legal moves available for {color}")]
    NoLegalMoves { color: Color },

    #[error("Illegal move {mv} for {color}")]
    IllegalMove { mv: Move, color: Color },

    #[error("Move {mv} is outside a {size}x{size} board")]
    OutOfBounds { mv: Move, size: usize },

    #[error("Corrupt model file {path}: {reason}")]
    CorruptModel { path: PathBuf, reason: String },

    #[error("Model was trained for a {actual}x{actual} board, expected {expected}x{expected}")]
    ModelSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Move source disconnected before answering")]
    Disconnected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrainError>;
