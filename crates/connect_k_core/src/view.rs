//! Viewport projection of the unbounded board.
//!
//! Derived on demand from the board; never stored with it.

use super::board::Board;
use super::types::{Column, Mark};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Contents of one displayed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing played here.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

/// Dense window onto the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Cells, top row first. The last row is depth 0.
    pub rows: Vec<Vec<Cell>>,
    /// First column shown.
    pub first_column: Column,
    /// Last column shown.
    pub last_column: Column,
}

impl Projection {
    /// Columns shown, and therefore playable from this view.
    pub fn columns(&self) -> RangeInclusive<Column> {
        self.first_column..=self.last_column
    }

    /// Number of rows shown.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Depth displayed on row `row` (0 = top).
    pub fn depth_of_row(&self, row: usize) -> usize {
        self.rows.len().saturating_sub(row + 1)
    }
}

/// Projects `width` columns around `center`.
///
/// At least `height` rows are produced, more when a column is taller. The
/// window shifts inward near the ends of the column range.
pub fn project(board: &Board, height: usize, width: usize, center: Column) -> Projection {
    let height = height.max(board.tallest());
    let extent = Column::try_from(width.max(1) - 1).unwrap_or(Column::MAX);
    let first_column = center
        .saturating_sub(extent / 2 + extent % 2)
        .min(Column::MAX - extent);
    let last_column = first_column + extent;

    let rows = (0..height)
        .rev()
        .map(|depth| {
            (first_column..=last_column)
                .map(|column| match board.mark_at(column, depth) {
                    Some(mark) => Cell::Occupied(mark),
                    None => Cell::Empty,
                })
                .collect()
        })
        .collect();

    Projection {
        rows,
        first_column,
        last_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_shape() {
        let projection = project(&Board::new(), 9, 16, 0);
        assert_eq!(projection.height(), 9);
        assert!(projection.rows.iter().all(|row| row.len() == 16));
        assert_eq!(projection.columns(), -8..=7);
    }

    #[test]
    fn test_centered_on_column() {
        let projection = project(&Board::new(), 3, 5, 100);
        assert_eq!(projection.columns(), 98..=102);
    }

    #[test]
    fn test_bottom_row_is_most_recent() {
        let mut board = Board::new();
        board.push(0, Mark::Red);
        board.push(0, Mark::Blue);
        let projection = project(&board, 3, 3, 0);
        assert_eq!(projection.rows[2][1], Cell::Occupied(Mark::Blue));
        assert_eq!(projection.rows[1][1], Cell::Occupied(Mark::Red));
        assert_eq!(projection.rows[0][1], Cell::Empty);
        assert_eq!(projection.depth_of_row(2), 0);
    }

    #[test]
    fn test_window_stays_inside_column_range() {
        let projection = project(&Board::new(), 2, 16, Column::MAX);
        assert_eq!(projection.columns(), (Column::MAX - 15)..=Column::MAX);
        assert_eq!(projection.rows[0].len(), 16);

        let projection = project(&Board::new(), 2, 16, Column::MIN);
        assert_eq!(projection.columns(), Column::MIN..=(Column::MIN + 15));
    }

    #[test]
    fn test_grows_to_tallest_column() {
        let mut board = Board::new();
        for _ in 0..6 {
            board.push(-1, Mark::Red);
        }
        let projection = project(&board, 4, 3, 0);
        assert_eq!(projection.height(), 6);
        assert_eq!(projection.rows[0][0], Cell::Occupied(Mark::Red));
    }
}
