//! Playing games: move sources, the game driver, and the human bridge.
//!
//! Anything that can answer "which move for `color` on this board" is a
//! [`MoveSource`]. The trainer's `ActionSelector` is one; a
//! [`HumanBridge`] that waits on a presentation worker is another. The
//! driver in [`game`] does not care which it is talking to.

pub mod bridge;
pub mod coords;
pub mod game;

pub use bridge::{channel, HumanBridge, MoveRequest, RequestReceiver};
pub use coords::parse_coordinate;
pub use game::{play_game, play_self, GameRecord};

use crate::core::{Board, Color, Move, Result};

/// Produces a move for `color` on `board`.
///
/// Callers only ask when `color` has at least one legal move.
pub trait MoveSource {
    fn get_action(&mut self, board: &Board, color: Color) -> Result<Move>;
}

impl<S: MoveSource + ?Sized> MoveSource for &mut S {
    fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
        (**self).get_action(board, color)
    }
}

impl<S: MoveSource + ?Sized> MoveSource for Box<S> {
    fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
        (**self).get_action(board, color)
    }
}
