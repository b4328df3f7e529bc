//! Dihedral augmentation.
//!
//! Othello legality is invariant under the 8 symmetries of the square
//! (4 quarter turns, each optionally mirrored left-right), so every
//! captured example yields 8 valid examples. Board and target always go
//! through the same `Symmetry`, which keeps the action label on the cell
//! it marked before the transform.

use crate::core::{Board, Move, Result, TrainError};

use super::example::TrainingExample;

/// One element of the square's symmetry group.
///
/// Applied as `rotations` clockwise quarter turns, then an optional
/// left-right mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symmetry {
    /// Clockwise quarter turns, `0..4`.
    pub rotations: u8,
    /// Mirror columns after rotating.
    pub mirror: bool,
}

impl Symmetry {
    pub const IDENTITY: Symmetry = Symmetry {
        rotations: 0,
        mirror: false,
    };

    /// All 8 symmetries, in emission order: one to four quarter turns
    /// (four being the identity), each unmirrored then mirrored.
    #[must_use]
    pub fn all() -> [Symmetry; 8] {
        let mut out = [Symmetry::IDENTITY; 8];
        for k in 1..=4u8 {
            for (m, mirror) in [false, true].into_iter().enumerate() {
                out[(k as usize - 1) * 2 + m] = Symmetry {
                    rotations: k % 4,
                    mirror,
                };
            }
        }
        out
    }

    /// Where a cell lands on a `size`×`size` board.
    #[must_use]
    pub fn map(self, mv: Move, size: usize) -> Move {
        let (mut row, mut col) = (mv.row, mv.col);
        for _ in 0..self.rotations % 4 {
            (row, col) = (col, size - 1 - row);
        }
        if self.mirror {
            col = size - 1 - col;
        }
        Move::new(row, col)
    }

    /// Transform a row-major `size`×`size` grid.
    pub fn apply_grid<T: Copy>(self, values: &[T], size: usize) -> Vec<T> {
        debug_assert_eq!(values.len(), size * size);
        let mut out = values.to_vec();
        for (index, &value) in values.iter().enumerate() {
            let target = self.map(Move::from_index(index, size), size);
            out[target.index(size)] = value;
        }
        out
    }

    /// Transform a board.
    #[must_use]
    pub fn apply_board(self, board: &Board) -> Board {
        let size = board.size();
        let mut out = Board::new(size);
        for index in 0..board.area() {
            let mv = Move::from_index(index, size);
            out.set(self.map(mv, size), board.get(mv));
        }
        out
    }
}

/// Expand a board and its flat target into the 8 symmetric pairs.
pub fn expand(board: &Board, policy: &[f32]) -> Result<Vec<(Board, Vec<f32>)>> {
    if policy.len() != board.area() {
        return Err(TrainError::PolicyLength {
            expected: board.area(),
            actual: policy.len(),
        });
    }
    let size = board.size();
    Ok(Symmetry::all()
        .into_iter()
        .map(|sym| (sym.apply_board(board), sym.apply_grid(policy, size)))
        .collect())
}

/// Expand an example, tagging every variant with the original color.
pub fn expand_example(example: &TrainingExample) -> Result<Vec<TrainingExample>> {
    Ok(expand(&example.board, &example.policy)?
        .into_iter()
        .map(|(board, policy)| TrainingExample::new(board, policy, example.color))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_all_has_eight_distinct() {
        let all = Symmetry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(all.contains(&Symmetry::IDENTITY));
        assert_eq!(all[6], Symmetry::IDENTITY);
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        let turn = Symmetry {
            rotations: 1,
            mirror: false,
        };
        assert_eq!(turn.map(Move::new(0, 0), 4), Move::new(0, 3));
        assert_eq!(turn.map(Move::new(0, 3), 4), Move::new(3, 3));
        assert_eq!(turn.map(Move::new(1, 0), 4), Move::new(0, 2));
    }

    #[test]
    fn test_mirror() {
        let mirror = Symmetry {
            rotations: 0,
            mirror: true,
        };
        assert_eq!(mirror.map(Move::new(1, 0), 4), Move::new(1, 3));
        assert_eq!(mirror.map(Move::new(2, 2), 4), Move::new(2, 1));
    }

    #[test]
    fn test_apply_grid() {
        let grid = [1, 2, 3, 4];
        let turn = Symmetry {
            rotations: 1,
            mirror: false,
        };
        // 1 2      3 1
        // 3 4  ->  4 2
        assert_eq!(turn.apply_grid(&grid, 2), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_expand_keeps_label_on_marked_cell() {
        let mut board = Board::new(4);
        board.set(Move::new(0, 1), Some(Color::Black));
        let mut policy = vec![0.0; 16];
        policy[Move::new(0, 1).index(4)] = 1.0;

        let pairs = expand(&board, &policy).unwrap();
        assert_eq!(pairs.len(), 8);
        for (b, p) in &pairs {
            let hot = p.iter().position(|&v| v == 1.0).unwrap();
            assert_eq!(b.get(Move::from_index(hot, 4)), Some(Color::Black));
        }
    }

    #[test]
    fn test_expand_rejects_wrong_length() {
        assert!(expand(&Board::new(4), &[0.0; 15]).is_err());
    }

    #[test]
    fn test_expand_example_keeps_color() {
        let example = TrainingExample::one_hot(Board::new(4), 3, Color::White).unwrap();
        let variants = expand_example(&example).unwrap();
        assert_eq!(variants.len(), 8);
        assert!(variants.iter().all(|v| v.color == Color::White));
    }
}
