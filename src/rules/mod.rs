//! Board rules.
//!
//! `GameEngine` is the contract the trainer relies on: legality, move
//! execution and terminal detection. `OthelloEngine` is the standard
//! rule set, used by the binaries, the tests and the benches.

pub mod engine;
pub mod othello;

pub use engine::{GameEngine, GameOutcome};
pub use othello::OthelloEngine;
