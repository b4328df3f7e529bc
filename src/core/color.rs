//! Seat identification.
//!
//! ## Color
//!
//! Othello has exactly two seats. Each color carries the sign used on the
//! board (`+1` black, `-1` white); flipping the sign gives the opponent.

use serde::{Deserialize, Serialize};

/// The two seats of a game.
///
/// Black moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colors in turn order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// The opposing seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Cell value used for this color on a board (`+1` or `-1`).
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Color for a non-zero cell value.
    ///
    /// Returns `None` for `0` (an empty cell).
    #[must_use]
    pub const fn from_sign(value: i8) -> Option<Self> {
        if value > 0 {
            Some(Color::Black)
        } else if value < 0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" | "1" | "+1" => Ok(Color::Black),
            "white" | "w" | "-1" => Ok(Color::White),
            other => Err(format!("unknown color '{other}'")),
        }
    }
}
