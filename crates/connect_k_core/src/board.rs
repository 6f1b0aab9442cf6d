//! Sparse board over an unbounded line of columns.
//!
//! Each column is a stack of marks ordered by recency: depth 0 is the most
//! recently played mark. Empty columns are never stored, so "is this column
//! occupied" is a key lookup.

use super::types::{Column, Mark};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Per-column mark stacks, keyed by column index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: BTreeMap<Column, VecDeque<Mark>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column indices holding at least one mark, ascending.
    pub fn occupied_columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.keys().copied()
    }

    /// Leftmost and rightmost occupied columns.
    pub fn span(&self) -> Option<(Column, Column)> {
        let lo = self.columns.keys().next()?;
        let hi = self.columns.keys().next_back()?;
        Some((*lo, *hi))
    }

    /// Puts `mark` on top of `column`, creating the column if needed.
    pub fn push(&mut self, column: Column, mark: Mark) {
        self.columns.entry(column).or_default().push_front(mark);
    }

    /// Removes the most recent mark of `column`.
    ///
    /// Drops the column entry once it is empty. Returns `None` for an
    /// unoccupied column.
    pub fn pop(&mut self, column: Column) -> Option<Mark> {
        let stack = self.columns.get_mut(&column)?;
        let mark = stack.pop_front();
        if stack.is_empty() {
            self.columns.remove(&column);
        }
        mark
    }

    /// Mark at `depth` in `column` (0 = most recent).
    pub fn mark_at(&self, column: Column, depth: usize) -> Option<Mark> {
        self.columns.get(&column)?.get(depth).copied()
    }

    /// Number of marks in `column`.
    pub fn height(&self, column: Column) -> usize {
        self.columns.get(&column).map_or(0, VecDeque::len)
    }

    /// Height of the tallest column.
    pub fn tallest(&self) -> usize {
        self.columns.values().map(VecDeque::len).max().unwrap_or(0)
    }

    /// True when no marks have been played.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total marks on the board.
    pub fn len(&self) -> usize {
        self.columns.values().map(VecDeque::len).sum()
    }

    /// Formats the occupied span as text, bottom row (depth 0) last.
    pub fn display(&self) -> String {
        let Some((lo, hi)) = self.span() else {
            return String::new();
        };
        let mut result = String::new();
        for depth in (0..self.tallest()).rev() {
            for column in lo..=hi {
                let symbol = self.mark_at(column, depth).map_or('.', Mark::symbol);
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
