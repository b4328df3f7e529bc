//! Training examples and outcome-conditioned filtering.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, Move, Result, TrainError};
use crate::rules::GameOutcome;

/// One recorded decision: the board before the move, the target policy,
/// and the color that acted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Snapshot of the board before the move was applied.
    pub board: Board,

    /// Target policy, `N²` entries row-major. One-hot at the chosen cell
    /// when captured from play.
    pub policy: Vec<f32>,

    /// Color that made the decision.
    pub color: Color,
}

impl TrainingExample {
    /// Create a new example.
    pub fn new(board: Board, policy: Vec<f32>, color: Color) -> Self {
        Self {
            board,
            policy,
            color,
        }
    }

    /// Example whose target is one-hot at `index`.
    ///
    /// Fails with `OutOfBounds` if `index` is not a cell of `board`.
    pub fn one_hot(board: Board, index: usize, color: Color) -> Result<Self> {
        let size = board.size();
        let mut policy = vec![0.0; board.area()];
        let slot = policy.get_mut(index).ok_or(TrainError::OutOfBounds {
            mv: Move::from_index(index, size.max(1)),
            size,
        })?;
        *slot = 1.0;
        Ok(Self::new(board, policy, color))
    }

    /// Index of the largest target entry (first on ties).
    pub fn target_index(&self) -> Option<usize> {
        super::selector::argmax_first(&self.policy)
    }
}

/// Whether an example from `color` is positive signal for `outcome`.
///
/// Draws keep both sides; otherwise only the winner's decisions count.
#[must_use]
pub fn keeps(outcome: GameOutcome, color: Color) -> bool {
    match outcome.winner() {
        None => true,
        Some(winner) => winner == color,
    }
}

/// Drop the losing side's examples.
pub fn filter_by_outcome(
    examples: impl IntoIterator<Item = TrainingExample>,
    outcome: GameOutcome,
) -> Vec<TrainingExample> {
    examples
        .into_iter()
        .filter(|e| keeps(outcome, e.color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(color: Color) -> TrainingExample {
        TrainingExample::one_hot(Board::new(4), 5, color).unwrap()
    }

    #[test]
    fn test_one_hot() {
        let e = example(Color::Black);
        assert_eq!(e.policy.len(), 16);
        assert_eq!(e.policy.iter().sum::<f32>(), 1.0);
        assert_eq!(e.target_index(), Some(5));
    }

    #[test]
    fn test_one_hot_off_board_is_error() {
        let err = TrainingExample::one_hot(Board::new(4), 16, Color::Black).unwrap_err();
        assert!(matches!(err, TrainError::OutOfBounds { size: 4, .. }));
    }

    #[test]
    fn test_keeps() {
        assert!(keeps(GameOutcome::BlackWins, Color::Black));
        assert!(!keeps(GameOutcome::BlackWins, Color::White));
        assert!(keeps(GameOutcome::WhiteWins, Color::White));
        assert!(!keeps(GameOutcome::WhiteWins, Color::Black));
        assert!(keeps(GameOutcome::Draw, Color::Black));
        assert!(keeps(GameOutcome::Draw, Color::White));
    }

    #[test]
    fn test_filter_by_outcome() {
        let examples = vec![
            example(Color::Black),
            example(Color::White),
            example(Color::Black),
        ];

        let kept = filter_by_outcome(examples.clone(), GameOutcome::WhiteWins);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].color, Color::White);

        let kept = filter_by_outcome(examples.clone(), GameOutcome::BlackWins);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.color == Color::Black));

        let kept = filter_by_outcome(examples, GameOutcome::Draw);
        assert_eq!(kept.len(), 3);
    }
}
