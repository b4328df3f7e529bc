//! Board encoding for policy models.
//!
//! Three one-hot planes per board, each N×N row-major:
//! plane 0 black discs, plane 1 white discs, plane 2 empty cells.
//! Every cell is hot in exactly one plane.

use crate::core::Board;

/// Number of feature planes.
pub const PLANES: usize = 3;

/// Plane holding a cell value.
#[inline]
fn plane_of(cell: i8) -> usize {
    match cell {
        c if c > 0 => 0,
        c if c < 0 => 1,
        _ => 2,
    }
}

/// Number of features for a `size`×`size` board.
#[must_use]
pub fn feature_count(size: usize) -> usize {
    PLANES * size * size
}

/// Dense encoding, `PLANES * N²` floats.
#[must_use]
pub fn encode_board(board: &Board) -> Vec<f32> {
    let mut features = vec![0.0; feature_count(board.size())];
    for index in active_features(board) {
        features[index] = 1.0;
    }
    features
}

/// Indices of the hot features, one per cell, in cell order.
pub fn active_features(board: &Board) -> impl Iterator<Item = usize> + '_ {
    let area = board.area();
    board
        .cells()
        .iter()
        .enumerate()
        .map(move |(cell, &value)| plane_of(value) * area + cell)
}
