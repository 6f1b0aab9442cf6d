//! Move engine: applies and reverses moves over the board.
//!
//! The engine is the only writer of the [`Board`]. Hypothetical positions are
//! explored through [`MoveEngine::forecast`], whose guard takes the move back
//! when it goes out of scope.

use super::board::Board;
use super::types::{Column, Mark};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Deref;
use tracing::{instrument, trace};

/// Board plus move history and the side to move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEngine {
    board: Board,
    /// Columns played, most recent first.
    history: VecDeque<Column>,
    to_move: Mark,
}

impl MoveEngine {
    /// Creates an engine on an empty board with `first` to move.
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(),
            history: VecDeque::new(),
            to_move: first,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history, most recent first.
    pub fn history(&self) -> &VecDeque<Column> {
        &self.history
    }

    /// Returns the mark that plays next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the most recently played column.
    pub fn last_move(&self) -> Option<Column> {
        self.history.front().copied()
    }

    /// Plays the active mark into `column` and passes the turn.
    ///
    /// Any column is accepted; whether the game is still open is the
    /// caller's concern.
    #[instrument(level = "trace", skip(self), fields(mark = %self.to_move))]
    pub fn play(&mut self, column: Column) {
        self.board.push(column, self.to_move);
        self.history.push_front(column);
        self.toggle_player();
    }

    /// Takes back the most recent move. No-op on an empty history.
    #[instrument(level = "trace", skip(self))]
    pub fn unplay(&mut self) -> Option<Column> {
        let column = self.history.pop_front()?;
        self.toggle_player();
        self.board.pop(column);
        trace!(column, "Move taken back");
        Some(column)
    }

    /// Flips the side to move without playing.
    pub fn toggle_player(&mut self) {
        self.to_move = self.to_move.toggle();
    }

    /// Plays `column` as `mark` for as long as the returned guard lives.
    ///
    /// Dropping the guard unplays the move and restores the side to move,
    /// whichever way the caller leaves the scope.
    pub fn forecast(&mut self, column: Column, mark: Mark) -> Forecast<'_> {
        let restore = self.to_move;
        self.to_move = mark;
        self.play(column);
        Forecast {
            engine: self,
            restore,
        }
    }
}

/// A temporarily played move. Read the position through `Deref`.
#[derive(Debug)]
pub struct Forecast<'a> {
    engine: &'a mut MoveEngine,
    restore: Mark,
}

impl Deref for Forecast<'_> {
    type Target = MoveEngine;

    fn deref(&self) -> &MoveEngine {
        self.engine
    }
}

impl Drop for Forecast<'_> {
    fn drop(&mut self) {
        self.engine.unplay();
        self.engine.to_move = self.restore;
    }
}
