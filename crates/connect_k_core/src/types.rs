//! Core domain types for connect-k.

use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::instrument;

/// Index of a vertical line on the board. Unbounded in both directions.
pub type Column = i64;

/// Player identity occupying a cell.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Red (player 0).
    #[default]
    Red,
    /// Blue (player 1).
    Blue,
}

impl Mark {
    /// Returns the other mark.
    pub fn toggle(self) -> Self {
        match self {
            Mark::Red => Mark::Blue,
            Mark::Blue => Mark::Red,
        }
    }

    /// Single-letter symbol used on the board.
    pub fn symbol(self) -> char {
        match self {
            Mark::Red => 'R',
            Mark::Blue => 'B',
        }
    }
}

/// Who sits across from the human.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum OpponentKind {
    /// A second human on the same keyboard.
    #[default]
    Human,
    /// The move advisor.
    Computer,
}

/// One-time game setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameConfig {
    /// Connection length needed to win.
    k: usize,
    /// Mark assigned to the human.
    human: Mark,
    /// Mark that moves first.
    first: Mark,
    /// Opponent kind.
    opponent: OpponentKind,
}

impl GameConfig {
    /// Creates a configuration. Values are expected to be validated by the caller.
    #[instrument]
    pub fn new(k: usize, human: Mark, first: Mark, opponent: OpponentKind) -> Self {
        Self {
            k,
            human,
            first,
            opponent,
        }
    }

    /// Mark played by the computer (or the second human).
    pub fn computer(&self) -> Mark {
        self.human.toggle()
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// One mark connected k.
    #[display("{} wins", _0)]
    Winner(Mark),
    /// Both marks connected k on the same settle.
    #[display("draw")]
    Draw,
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GameStatus {
    /// Not configured yet.
    #[default]
    #[display("not started")]
    NotStarted,
    /// Moves are being played.
    #[display("in progress")]
    InProgress,
    /// Game has ended.
    #[display("over: {}", _0)]
    Over(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_toggle_is_involution() {
        assert_eq!(Mark::Red.toggle(), Mark::Blue);
        assert_eq!(Mark::Blue.toggle(), Mark::Red);
        assert_eq!(Mark::Red.toggle().toggle(), Mark::Red);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Mark::from_str("blue").unwrap(), Mark::Blue);
        assert_eq!(Mark::from_str("Red").unwrap(), Mark::Red);
        assert_eq!(
            OpponentKind::from_str("computer").unwrap(),
            OpponentKind::Computer
        );
        assert!(Mark::from_str("green").is_err());
    }

    #[test]
    fn test_computer_mark_is_opposite_of_human() {
        let config = GameConfig::new(4, Mark::Blue, Mark::Red, OpponentKind::Computer);
        assert_eq!(config.computer(), Mark::Red);
        assert_eq!(*config.k(), 4);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            GameStatus::Over(Outcome::Winner(Mark::Blue)).to_string(),
            "over: Blue wins"
        );
        assert_eq!(GameStatus::Over(Outcome::Draw).to_string(), "over: draw");
    }
}
