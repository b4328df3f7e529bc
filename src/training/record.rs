//! Win/loss bookkeeping for one tracked seat.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::rules::GameOutcome;

/// Monotonic win/lose/draw counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossRecord {
    win: u64,
    lose: u64,
    draw: u64,
}

/// Share of each result, in percent. The three fields sum to 100.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub win: f64,
    pub lose: f64,
    pub draw: f64,
}

impl WinLossRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished game from `tracked`'s point of view.
    pub fn record(&mut self, outcome: GameOutcome, tracked: Color) {
        match outcome.winner() {
            Some(winner) if winner == tracked => self.win += 1,
            Some(_) => self.lose += 1,
            None => self.draw += 1,
        }
    }

    pub fn wins(&self) -> u64 {
        self.win
    }

    pub fn losses(&self) -> u64 {
        self.lose
    }

    pub fn draws(&self) -> u64 {
        self.draw
    }

    /// Games recorded so far.
    pub fn total(&self) -> u64 {
        self.win + self.lose + self.draw
    }

    /// Percentages, or `None` before any game is recorded.
    #[must_use]
    pub fn percentages(&self) -> Option<Percentages> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let pct = |n: u64| n as f64 / total as f64 * 100.0;
        Some(Percentages {
            win: pct(self.win),
            lose: pct(self.lose),
            draw: pct(self.draw),
        })
    }

    /// Log the percentages at info level.
    pub fn report(&self) -> Option<Percentages> {
        let percentages = self.percentages();
        match percentages {
            Some(p) => {
                for line in p.to_string().lines() {
                    info!("{line}");
                }
            }
            None => info!("No games recorded yet."),
        }
        percentages
    }
}

impl fmt::Display for Percentages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Win Percentage: {:.2}%", self.win)?;
        writeln!(f, "Lose Percentage: {:.2}%", self.lose)?;
        write!(f, "Draw Percentage: {:.2}%", self.draw)
    }
}
