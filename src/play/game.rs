//! Game driver.
//!
//! Black moves first. A color with no legal move passes; the game ends
//! when the engine reports an outcome.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, Move, Result, TrainError};
use crate::rules::{GameEngine, GameOutcome};

use super::MoveSource;

/// A finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Final position.
    pub board: Board,

    /// Result as reported by the engine.
    pub outcome: GameOutcome,

    /// Every placement, in order.
    pub moves: Vec<(Color, Move)>,

    /// Turns forfeited because the side to move had no placement.
    pub passes: usize,
}

impl GameRecord {
    /// Number of placements made.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Play a match between two move sources.
pub fn play_game<E: GameEngine + ?Sized>(
    engine: &E,
    black: &mut dyn MoveSource,
    white: &mut dyn MoveSource,
) -> Result<GameRecord> {
    drive(engine, |board, color| match color {
        Color::Black => black.get_action(board, color),
        Color::White => white.get_action(board, color),
    })
}

/// Play a game where one source takes both seats.
pub fn play_self<E, S>(engine: &E, source: &mut S) -> Result<GameRecord>
where
    E: GameEngine + ?Sized,
    S: MoveSource + ?Sized,
{
    drive(engine, |board, color| source.get_action(board, color))
}

fn drive<E, F>(engine: &E, mut pick: F) -> Result<GameRecord>
where
    E: GameEngine + ?Sized,
    F: FnMut(&Board, Color) -> Result<Move>,
{
    let mut board = engine.new_board();
    let mut color = Color::Black;
    let mut moves = Vec::new();
    let mut passes = 0;
    let mut consecutive_passes = 0;

    loop {
        if let Some(outcome) = engine.outcome(&board) {
            debug!(
                "game over after {} moves ({} passes): {}",
                moves.len(),
                passes,
                outcome
            );
            return Ok(GameRecord {
                board,
                outcome,
                moves,
                passes,
            });
        }

        if !engine.has_moves(&board, color) {
            // Neither side can move but the engine still says "not over".
            if consecutive_passes == 1 {
                return Err(TrainError::NoLegalMoves { color });
            }
            trace!("{color} passes");
            passes += 1;
            consecutive_passes += 1;
            color = color.opponent();
            continue;
        }
        consecutive_passes = 0;

        let mv = pick(&board, color)?;
        engine.execute_move(&mut board, color, mv)?;
        trace!("{color} plays {mv}");
        moves.push((color, mv));
        color = color.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::OthelloEngine;

    /// Always plays the first legal move.
    struct FirstLegal(OthelloEngine);

    impl MoveSource for FirstLegal {
        fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
            self.0
                .valid_moves(board, color)
                .first()
                .copied()
                .ok_or(TrainError::NoLegalMoves { color })
        }
    }

    /// Always plays the last legal move.
    struct LastLegal(OthelloEngine);

    impl MoveSource for LastLegal {
        fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
            self.0
                .valid_moves(board, color)
                .last()
                .copied()
                .ok_or(TrainError::NoLegalMoves { color })
        }
    }

    /// Ignores legality.
    struct Stubborn;

    impl MoveSource for Stubborn {
        fn get_action(&mut self, _board: &Board, _color: Color) -> Result<Move> {
            Ok(Move::new(0, 0))
        }
    }

    #[test]
    fn test_play_self_terminates() {
        let engine = OthelloEngine::new(6);
        let mut source = FirstLegal(engine);
        let record = play_self(&engine, &mut source).unwrap();

        assert_eq!(engine.outcome(&record.board), Some(record.outcome));
        assert!(!record.is_empty());
        assert_eq!(record.moves[0].0, Color::Black);
    }

    #[test]
    fn test_colors_alternate_without_passes() {
        let engine = OthelloEngine::new(6);
        let mut source = FirstLegal(engine);
        let record = play_self(&engine, &mut source).unwrap();

        if record.passes == 0 {
            for pair in record.moves.windows(2) {
                assert_eq!(pair[1].0, pair[0].0.opponent());
            }
        }
    }

    #[test]
    fn test_play_game_uses_both_sources() {
        let engine = OthelloEngine::new(6);
        let mut black = FirstLegal(engine);
        let mut white = LastLegal(engine);
        let record = play_game(&engine, &mut black, &mut white).unwrap();

        let initial = engine.new_board();
        let (c, mv) = record.moves[0];
        assert_eq!(c, Color::Black);
        assert_eq!(mv, engine.valid_moves(&initial, Color::Black)[0]);
        assert_eq!(
            record.board.count(Color::Black) + record.board.count(Color::White)
                + record.board.empty_count(),
            36
        );
    }

    #[test]
    fn test_illegal_source_move_is_error() {
        let engine = OthelloEngine::new(4);
        let err = play_self(&engine, &mut Stubborn).unwrap_err();
        assert!(matches!(err, TrainError::IllegalMove { .. }));
    }
}
