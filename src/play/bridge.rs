//! Bridge between the game driver and an interactive front end.
//!
//! `HumanBridge` is a [`MoveSource`] that hands each decision to a
//! presentation worker as a [`MoveRequest`] and blocks until the worker
//! answers. Each request carries its own board copy and a single-use
//! responder, so nothing is shared with the live game board.
//!
//! ```no_run
//! use std::thread;
//! use othello_selfplay::play::{channel, play_self};
//! use othello_selfplay::rules::OthelloEngine;
//!
//! let engine = OthelloEngine::new(8);
//! let (mut bridge, requests) = channel(engine);
//! thread::spawn(move || {
//!     for request in requests {
//!         let mv = request.valid_moves()[0];
//!         if request.resolve(mv).is_err() {
//!             break;
//!         }
//!     }
//! });
//! let record = play_self(&engine, &mut bridge).unwrap();
//! println!("{}", record.outcome);
//! ```

use std::sync::mpsc::{self, Receiver, Sender};

use log::warn;

use crate::core::{Board, Color, Move, MoveList, Result, TrainError};
use crate::rules::GameEngine;

use super::MoveSource;

/// Receiving end held by the presentation worker.
pub type RequestReceiver = Receiver<MoveRequest>;

/// One pending decision. Resolved exactly once by [`MoveRequest::resolve`].
#[derive(Debug)]
pub struct MoveRequest {
    board: Board,
    color: Color,
    valid_moves: MoveList,
    reply: Sender<Move>,
}

impl MoveRequest {
    /// Position to decide on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Color to move.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Legal placements, row-major.
    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    /// Whether `mv` would be accepted.
    pub fn is_valid(&self, mv: Move) -> bool {
        self.valid_moves.contains(&mv)
    }

    /// Answer the request.
    ///
    /// An illegal answer is not rejected here; the bridge re-issues a fresh
    /// request. Fails with `Disconnected` if the game side has gone away.
    pub fn resolve(self, mv: Move) -> Result<()> {
        self.reply.send(mv).map_err(|_| TrainError::Disconnected)
    }
}

/// Move source backed by a presentation worker.
pub struct HumanBridge<E> {
    engine: E,
    requests: Sender<MoveRequest>,
}

/// Create a bridge and the receiver its worker should drain.
pub fn channel<E: GameEngine>(engine: E) -> (HumanBridge<E>, RequestReceiver) {
    let (requests, receiver) = mpsc::channel();
    (HumanBridge { engine, requests }, receiver)
}

impl<E: GameEngine> HumanBridge<E> {
    /// Get the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn request(&self, board: &Board, color: Color, valid_moves: MoveList) -> Result<Move> {
        let (reply, answer) = mpsc::channel();
        let request = MoveRequest {
            board: board.clone(),
            color,
            valid_moves,
            reply,
        };
        self.requests
            .send(request)
            .map_err(|_| TrainError::Disconnected)?;
        answer.recv().map_err(|_| TrainError::Disconnected)
    }
}

impl<E: GameEngine> MoveSource for HumanBridge<E> {
    fn get_action(&mut self, board: &Board, color: Color) -> Result<Move> {
        let valid_moves = self.engine.valid_moves(board, color);
        if valid_moves.is_empty() {
            return Err(TrainError::NoLegalMoves { color });
        }

        loop {
            let mv = self.request(board, color, valid_moves.clone())?;
            if valid_moves.contains(&mv) {
                return Ok(mv);
            }
            warn!("rejected {mv} for {color}: not a legal placement");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::rules::OthelloEngine;

    #[test]
    fn test_resolves_with_worker_answer() {
        let engine = OthelloEngine::new(4);
        let board = engine.new_board();
        let (mut bridge, requests) = channel(engine);

        let worker = thread::spawn(move || {
            let request = requests.recv().unwrap();
            assert_eq!(request.color(), Color::Black);
            let mv = *request.valid_moves().last().unwrap();
            request.resolve(mv).unwrap();
            mv
        });

        let mv = bridge.get_action(&board, Color::Black).unwrap();
        assert_eq!(mv, worker.join().unwrap());
    }

    #[test]
    fn test_illegal_answer_is_reissued() {
        let engine = OthelloEngine::new(4);
        let board = engine.new_board();
        let (mut bridge, requests) = channel(engine);

        let worker = thread::spawn(move || {
            let first = requests.recv().unwrap();
            assert!(!first.is_valid(Move::new(0, 0)));
            first.resolve(Move::new(0, 0)).unwrap();

            let second = requests.recv().unwrap();
            let mv = second.valid_moves()[0];
            second.resolve(mv).unwrap();
            mv
        });

        let mv = bridge.get_action(&board, Color::Black).unwrap();
        assert_eq!(mv, worker.join().unwrap());
    }

    #[test]
    fn test_request_board_is_a_copy() {
        let engine = OthelloEngine::new(4);
        let mut board = engine.new_board();
        let (mut bridge, requests) = channel(engine);
        let snapshot = board.clone();

        let worker = thread::spawn(move || {
            let request = requests.recv().unwrap();
            let seen = request.board().clone();
            let mv = request.valid_moves()[0];
            request.resolve(mv).unwrap();
            seen
        });

        let mv = bridge.get_action(&board, Color::Black).unwrap();
        engine.execute_move(&mut board, Color::Black, mv).unwrap();
        assert_eq!(worker.join().unwrap(), snapshot);
    }

    #[test]
    fn test_dropped_worker_is_disconnected() {
        let engine = OthelloEngine::new(4);
        let board = engine.new_board();
        let (mut bridge, requests) = channel(engine);
        drop(requests);

        let err = bridge.get_action(&board, Color::Black).unwrap_err();
        assert!(matches!(err, TrainError::Disconnected));
    }

    #[test]
    fn test_unanswered_request_is_disconnected() {
        let engine = OthelloEngine::new(4);
        let board = engine.new_board();
        let (mut bridge, requests) = channel(engine);

        let worker = thread::spawn(move || {
            let request = requests.recv().unwrap();
            drop(request);
        });

        let err = bridge.get_action(&board, Color::Black).unwrap_err();
        worker.join().unwrap();
        assert!(matches!(err, TrainError::Disconnected));
    }
}
