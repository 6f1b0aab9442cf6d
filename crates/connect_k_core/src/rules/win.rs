//! Win detection for connect-k.
//!
//! Only vertical runs (from the front of one column) and horizontal runs
//! (same depth across adjacent columns) count. Diagonals are never checked.

use super::super::{Board, Column, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Direction of a winning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Consecutive marks at the front of one column.
    Vertical,
    /// Same depth across adjacent columns.
    Horizontal,
}

/// A detected k-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningRun {
    /// Mark that connected.
    pub mark: Mark,
    /// Column in which the run was found.
    pub column: Column,
    /// Stack depth of the run (the tie-break index); 0 for vertical runs.
    pub depth: usize,
    /// Vertical or horizontal.
    pub orientation: Orientation,
}

/// Checks whether `player` has `k` in a row anywhere on the board.
///
/// Columns are scanned in ascending order and the first run found is
/// reported.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board, k: usize, player: Mark) -> Option<WinningRun> {
    board
        .occupied_columns()
        .find_map(|column| check_column(board, k, player, column))
}

fn check_column(board: &Board, k: usize, player: Mark, column: Column) -> Option<WinningRun> {
    let mut count = 0;
    while count < k && board.mark_at(column, count) == Some(player) {
        count += 1;
    }
    if count == k {
        return Some(WinningRun {
            mark: player,
            column,
            depth: 0,
            orientation: Orientation::Vertical,
        });
    }

    (0..board.height(column))
        .filter(|&depth| board.mark_at(column, depth) == Some(player))
        .find(|&depth| {
            let left = run_length(board, player, depth, column, -1);
            let right = run_length(board, player, depth, column, 1);
            1 + left + right >= k
        })
        .map(|depth| WinningRun {
            mark: player,
            column,
            depth,
            orientation: Orientation::Horizontal,
        })
}

/// Counts columns next to `column`, stepping by `step`, that hold `player` at `depth`.
///
/// Stops at the ends of the column range.
fn run_length(board: &Board, player: Mark, depth: usize, column: Column, step: Column) -> usize {
    std::iter::successors(column.checked_add(step), |next| next.checked_add(step))
        .take_while(|&next| board.mark_at(next, depth) == Some(player))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(board: &mut Board, column: Column, marks: &[Mark]) {
        // Pushed oldest first so `marks[0]` ends up deepest.
        for &mark in marks {
            board.push(column, mark);
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board, 1, Mark::Red), None);
    }

    #[test]
    fn test_single_mark_wins_when_k_is_one() {
        let mut board = Board::new();
        board.push(-4, Mark::Blue);
        let run = check_winner(&board, 1, Mark::Blue).unwrap();
        assert_eq!(run.column, -4);
        assert_eq!(run.orientation, Orientation::Vertical);
        assert_eq!(check_winner(&board, 1, Mark::Red), None);
    }

    #[test]
    fn test_vertical_k_wins_k_minus_one_does_not() {
        for k in 1..=6 {
            let mut board = Board::new();
            stack(&mut board, 2, &vec![Mark::Red; k - 1]);
            assert_eq!(check_winner(&board, k, Mark::Red), None, "k = {k}");
            board.push(2, Mark::Red);
            let run = check_winner(&board, k, Mark::Red).unwrap();
            assert_eq!(run.depth, 0);
            assert_eq!(run.orientation, Orientation::Vertical);
        }
    }

    #[test]
    fn test_vertical_run_must_start_at_front() {
        let mut board = Board::new();
        stack(&mut board, 0, &[Mark::Red, Mark::Red, Mark::Red, Mark::Blue]);
        assert_eq!(check_winner(&board, 3, Mark::Red), None);
    }

    #[test]
    fn test_horizontal_at_same_depth() {
        let mut board = Board::new();
        for column in -1..=1 {
            stack(&mut board, column, &[Mark::Blue, Mark::Red]);
        }
        let run = check_winner(&board, 3, Mark::Blue).unwrap();
        assert_eq!(run.depth, 1);
        assert_eq!(run.orientation, Orientation::Horizontal);
        let run = check_winner(&board, 3, Mark::Red).unwrap();
        assert_eq!(run.depth, 0);
    }

    #[test]
    fn test_horizontal_broken_by_other_mark() {
        let mut board = Board::new();
        board.push(0, Mark::Red);
        board.push(1, Mark::Blue);
        board.push(2, Mark::Red);
        board.push(3, Mark::Red);
        assert_eq!(check_winner(&board, 3, Mark::Red), None);
        assert!(check_winner(&board, 2, Mark::Red).is_some());
    }

    #[test]
    fn test_horizontal_broken_by_gap() {
        let mut board = Board::new();
        board.push(0, Mark::Red);
        board.push(1, Mark::Red);
        board.push(3, Mark::Red);
        assert_eq!(check_winner(&board, 3, Mark::Red), None);
    }

    #[test]
    fn test_horizontal_broken_by_short_column() {
        let mut board = Board::new();
        stack(&mut board, 0, &[Mark::Red, Mark::Blue]);
        board.push(1, Mark::Blue);
        stack(&mut board, 2, &[Mark::Red, Mark::Blue]);
        assert_eq!(check_winner(&board, 3, Mark::Red), None);
        assert!(check_winner(&board, 3, Mark::Blue).is_some());
    }

    #[test]
    fn test_runs_at_ends_of_column_range() {
        let mut board = Board::new();
        board.push(Column::MAX, Mark::Red);
        board.push(Column::MAX - 1, Mark::Red);
        board.push(Column::MIN, Mark::Blue);
        board.push(Column::MIN + 1, Mark::Blue);
        assert_eq!(check_winner(&board, 2, Mark::Red).unwrap().column, Column::MAX - 1);
        assert_eq!(check_winner(&board, 2, Mark::Blue).unwrap().column, Column::MIN);
        assert_eq!(check_winner(&board, 3, Mark::Red), None);
    }

    #[test]
    fn test_diagonal_not_a_win() {
        let mut board = Board::new();
        board.push(0, Mark::Red);
        stack(&mut board, 1, &[Mark::Red, Mark::Blue]);
        stack(&mut board, 2, &[Mark::Red, Mark::Blue, Mark::Blue]);
        assert_eq!(check_winner(&board, 3, Mark::Red), None);
    }
}
