//! Greedy, legality-masked move selection.
//!
//! The selector asks the evaluator for per-cell preferences, lifts every
//! entry by a small epsilon, zeroes the cells the engine forbids, and
//! plays the highest remaining cell (lowest row-major index on ties).
//! While collecting, each decision is recorded as a one-hot example with
//! a copy of the board taken before the move.
//!
//! One selector serves both seats in self-play, so the acting color is
//! always the one passed to `get_action`, never remembered between calls.

use log::trace;

use crate::core::{Board, Color, Move, Result, TrainError, TrainerConfig};
use crate::nn::PolicyEvaluator;
use crate::play::MoveSource;
use crate::rules::GameEngine;

use super::example::TrainingExample;

/// 0/1 mask over `size²` cells, 1 at each legal move.
#[must_use]
pub fn legal_mask(moves: &[Move], size: usize) -> Vec<f32> {
    let mut mask = vec![0.0; size * size];
    for mv in moves {
        if mv.in_bounds(size) {
            mask[mv.index(size)] = 1.0;
        }
    }
    mask
}

/// Index of the maximum value; the first one wins ties.
///
/// `None` for an empty slice. NaN entries never win.
#[must_use]
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b || v.is_nan() => {}
            None if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Policy-driven move source with optional example capture.
pub struct ActionSelector<E, P> {
    engine: E,
    evaluator: P,
    epsilon: f32,
    collecting: bool,
    captured: Vec<TrainingExample>,
}

impl<E: GameEngine, P: PolicyEvaluator> ActionSelector<E, P> {
    /// Create a selector. Collection starts disabled.
    pub fn new(engine: E, evaluator: P, config: &TrainerConfig) -> Self {
        Self {
            engine,
            evaluator,
            epsilon: config.preference_epsilon,
            collecting: false,
            captured: Vec::new(),
        }
    }

    /// Turn example capture on or off.
    pub fn set_collecting(&mut self, collecting: bool) {
        self.collecting = collecting;
    }

    /// Whether decisions are being captured.
    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// Examples captured since the last `take_captured`.
    pub fn captured(&self) -> &[TrainingExample] {
        &self.captured
    }

    /// Drain the capture list.
    pub fn take_captured(&mut self) -> Vec<TrainingExample> {
        std::mem::take(&mut self.captured)
    }

    /// Get the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the evaluator.
    pub fn evaluator(&self) -> &P {
        &self.evaluator
    }

    /// Get the evaluator mutably (for training).
    pub fn evaluator_mut(&mut self) -> &mut P {
        &mut self.evaluator
    }

    /// Consume the selector, returning the engine and evaluator.
    pub fn into_parts(self) -> (E, P) {
        (self.engine, self.evaluator)
    }

    /// Evaluator preferences with illegal cells zeroed.
    ///
    /// Fails if the evaluator returns the wrong number of scores, scores a
    /// legal cell as NaN or infinite, or if `color` has no legal move
    /// (terminal detection is the caller's job).
    pub fn masked_preferences(&self, board: &Board, color: Color) -> Result<Vec<f32>> {
        self.score_legal(board, color).map(|(scores, _)| scores)
    }

    /// Masked scores plus the legal cell indices in ascending order.
    fn score_legal(&self, board: &Board, color: Color) -> Result<(Vec<f32>, Vec<usize>)> {
        let area = board.area();
        let size = board.size();
        let mut scores = self.evaluator.predict(board);
        if scores.len() != area {
            return Err(TrainError::PolicyLength {
                expected: area,
                actual: scores.len(),
            });
        }

        let moves = self.engine.valid_moves(board, color);
        if moves.is_empty() {
            return Err(TrainError::NoLegalMoves { color });
        }

        let mask = legal_mask(&moves, size);
        let mut legal = Vec::with_capacity(moves.len());
        for (index, (score, &allowed)) in scores.iter_mut().zip(&mask).enumerate() {
            if allowed == 0.0 {
                *score = 0.0;
                continue;
            }
            if !score.is_finite() {
                return Err(TrainError::NonFiniteScore {
                    mv: Move::from_index(index, size),
                    value: *score,
                });
            }
            *score = (*score + self.epsilon) * allowed;
            legal.push(index);
        }
        Ok((scores, legal))
    }

    /// Choose a move for `color` on `board`.
    ///
    /// Only legal cells compete, so the result is always a legal move.
    pub fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
        let (scores, legal) = self.score_legal(board, color)?;
        let index = legal
            .iter()
            .copied()
            .reduce(|best, i| if scores[i] > scores[best] { i } else { best })
            .ok_or(TrainError::NoLegalMoves { color })?;

        if self.collecting {
            self.captured
                .push(TrainingExample::one_hot(board.clone(), index, color)?);
        }

        let mv = Move::from_index(index, board.size());
        trace!("{color} selects {mv} (score {:.4})", scores[index]);
        Ok(mv)
    }
}

impl<E: GameEngine, P: PolicyEvaluator> MoveSource for ActionSelector<E, P> {
    fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
        ActionSelector::get_action(self, board, color)
    }
}
