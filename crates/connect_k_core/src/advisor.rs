//! Move advisor for the computer opponent.
//!
//! Three passes over the columns next to and inside the occupied span, first
//! hit wins:
//!
//! 1. a column that wins outright for the computer,
//! 2. a column that denies a human win available next move,
//! 3. the best heuristic score, skipping columns after which the human
//!    already has k in a row.
//!
//! Every candidate is explored with [`MoveEngine::forecast`], so the engine
//! is unchanged when [`recommend`] returns.

use super::engine::MoveEngine;
use super::rules::check_winner;
use super::{Board, Column, Mark};
use std::cmp::Reverse;
use std::ops::RangeInclusive;
use tracing::{debug, instrument, trace};

/// Picks a column for `computer` to play.
///
/// Returns column 0 on an empty board.
#[instrument(skip(engine), fields(moves = engine.history().len()))]
pub fn recommend(engine: &mut MoveEngine, k: usize, computer: Mark) -> Column {
    let span = engine.board().span();
    let Some((lo, hi)) = span.filter(|_| !engine.history().is_empty()) else {
        debug!("Opening move");
        return 0;
    };
    let human = computer.toggle();
    let candidates = lo.saturating_sub(1)..=hi.saturating_add(1);

    if let Some(column) = winning_move(engine, k, computer, candidates.clone()) {
        debug!(column, "Taking the win");
        return column;
    }
    if let Some(column) = blocking_move(engine, k, human, candidates.clone()) {
        debug!(column, "Blocking");
        return column;
    }
    let column = scored_move(engine, k, computer, candidates);
    debug!(column, "Heuristic choice");
    column
}

fn winning_move(
    engine: &mut MoveEngine,
    k: usize,
    computer: Mark,
    candidates: RangeInclusive<Column>,
) -> Option<Column> {
    candidates.into_iter().find(|&column| {
        let forecast = engine.forecast(column, computer);
        check_winner(forecast.board(), k, computer).is_some()
    })
}

fn blocking_move(
    engine: &mut MoveEngine,
    k: usize,
    human: Mark,
    candidates: RangeInclusive<Column>,
) -> Option<Column> {
    for column in candidates {
        let threat = {
            let forecast = engine.forecast(column, human);
            check_winner(forecast.board(), k, human)
        };
        if let Some(run) = threat {
            trace!(column, depth = run.depth, "Human threat found");
            return Some(denial(engine.board(), human, column, run.depth));
        }
    }
    None
}

/// Column that breaks the human run completed by playing `column`.
///
/// Pushing into any column of a run shifts that column's marks by one depth,
/// so the block lands on the threatened column itself for a vertical run and
/// on a column of the run otherwise.
fn denial(board: &Board, human: Mark, column: Column, depth: usize) -> Column {
    if depth == 0 && board.mark_at(column, 0) == Some(human) {
        return column;
    }
    let left = column
        .checked_sub(1)
        .filter(|&left| board.mark_at(left, depth) == Some(human));
    left.or_else(|| column.checked_add(1)).unwrap_or(column)
}

/// Heuristic evaluation of one forecast position.
#[derive(Debug, Clone, Copy)]
struct Score {
    /// Not ranked; reported in traces only.
    own_blocks: usize,
    opponent_blocks: usize,
    displaces: bool,
}

impl Score {
    /// Fewer opponent blocks first; displacing an opponent piece breaks ties.
    fn key(self) -> (Reverse<usize>, bool) {
        (Reverse(self.opponent_blocks), self.displaces)
    }
}

fn scored_move(
    engine: &mut MoveEngine,
    k: usize,
    computer: Mark,
    candidates: RangeInclusive<Column>,
) -> Column {
    let human = computer.toggle();
    let mut best_safe: Option<((Reverse<usize>, bool), Column)> = None;
    let mut best_any: Option<((Reverse<usize>, bool), Column)> = None;

    for column in candidates {
        let forecast = engine.forecast(column, computer);
        let board = forecast.board();
        let score = Score {
            own_blocks: adjacent_blocks(board, column, computer),
            opponent_blocks: adjacent_blocks(board, column, human),
            displaces: board.mark_at(column, 1) == Some(human),
        };
        let hands_over = check_winner(board, k, human).is_some();
        trace!(column, ?score, hands_over, "Scored candidate");

        let key = score.key();
        if best_any.is_none_or(|(best, _)| key > best) {
            best_any = Some((key, column));
        }
        if !hands_over && best_safe.is_none_or(|(best, _)| key > best) {
            best_safe = Some((key, column));
        }
    }

    best_safe.or(best_any).map_or(0, |(_, column)| column)
}

/// Same-mark neighbors of `player` around `column`.
///
/// Counts adjacent equal pairs in the run at the front of the column, plus
/// left and right neighbors holding `player` at each depth where the column
/// holds `player`.
pub(crate) fn adjacent_blocks(board: &Board, column: Column, player: Mark) -> usize {
    let height = board.height(column);
    let vertical = (0..height.saturating_sub(1))
        .take_while(|&depth| {
            board.mark_at(column, depth) == Some(player)
                && board.mark_at(column, depth + 1) == Some(player)
        })
        .count();

    let horizontal: usize = (0..height)
        .filter(|&depth| board.mark_at(column, depth) == Some(player))
        .map(|depth| {
            [column.checked_sub(1), column.checked_add(1)]
                .into_iter()
                .flatten()
                .filter(|&side| board.mark_at(side, depth) == Some(player))
                .count()
        })
        .sum();

    vertical + horizontal
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays `column` as `mark` regardless of whose turn it is.
    fn place(engine: &mut MoveEngine, column: Column, mark: Mark) {
        if engine.to_move() != mark {
            engine.toggle_player();
        }
        engine.play(column);
    }

    fn engine_with(moves: &[(Column, Mark)], to_move: Mark) -> MoveEngine {
        let mut engine = MoveEngine::new(to_move);
        for &(column, mark) in moves {
            place(&mut engine, column, mark);
        }
        if engine.to_move() != to_move {
            engine.toggle_player();
        }
        engine
    }

    fn human_can_win_next(engine: &mut MoveEngine, k: usize, human: Mark) -> bool {
        let Some((lo, hi)) = engine.board().span() else {
            return false;
        };
        ((lo - 1)..=(hi + 1)).any(|column| {
            let forecast = engine.forecast(column, human);
            check_winner(forecast.board(), k, human).is_some()
        })
    }

    #[test]
    fn test_empty_board_opens_at_zero() {
        let mut engine = MoveEngine::new(Mark::Blue);
        assert_eq!(recommend(&mut engine, 4, Mark::Blue), 0);
        assert_eq!(engine, MoveEngine::new(Mark::Blue));
    }

    #[test]
    fn test_blocks_open_horizontal_pair() {
        let mut engine = engine_with(&[(0, Mark::Red), (1, Mark::Red)], Mark::Blue);
        let before = engine.clone();

        let column = recommend(&mut engine, 3, Mark::Blue);
        assert_eq!(engine, before);
        // Threat at -1 is met by pushing into the run's own column 0.
        assert_eq!(column, 0);

        engine.play(column);
        assert!(!human_can_win_next(&mut engine, 3, Mark::Red));
    }

    #[test]
    fn test_blocks_gap_from_the_left() {
        let mut engine = engine_with(&[(0, Mark::Red), (2, Mark::Red)], Mark::Blue);
        // Threat at 1; its left neighbor holds the run at depth 0.
        let column = recommend(&mut engine, 3, Mark::Blue);
        assert_eq!(column, 0);

        engine.play(column);
        assert!(!human_can_win_next(&mut engine, 3, Mark::Red));
    }

    #[test]
    fn test_blocks_vertical_threat_in_place() {
        let mut engine = engine_with(&[(4, Mark::Red), (4, Mark::Red)], Mark::Blue);
        assert_eq!(recommend(&mut engine, 3, Mark::Blue), 4);
    }

    #[test]
    fn test_win_beats_block() {
        let mut engine = engine_with(
            &[
                (0, Mark::Red),
                (5, Mark::Blue),
                (1, Mark::Red),
                (5, Mark::Blue),
            ],
            Mark::Blue,
        );
        assert_eq!(recommend(&mut engine, 3, Mark::Blue), 5);
    }

    #[test]
    fn test_heuristic_prefers_displacing() {
        let mut engine = engine_with(&[(0, Mark::Red)], Mark::Blue);
        assert_eq!(recommend(&mut engine, 4, Mark::Blue), 0);
    }

    #[test]
    fn test_all_unsafe_falls_back_to_best_score() {
        // Red already holds 10-11, so nothing in 0..=2 is safe.
        let mut engine = engine_with(
            &[(1, Mark::Red), (10, Mark::Red), (11, Mark::Red)],
            Mark::Blue,
        );
        // Column 1 is the only push that displaces a red mark.
        assert_eq!(scored_move(&mut engine, 2, Mark::Blue, 0..=2), 1);
    }

    #[test]
    fn test_recommend_at_ends_of_column_range() {
        let mut engine = engine_with(&[(Column::MAX, Mark::Red)], Mark::Blue);
        let column = recommend(&mut engine, 3, Mark::Blue);
        assert!(column >= Column::MAX - 1);

        let mut engine = engine_with(&[(Column::MIN, Mark::Red)], Mark::Blue);
        let column = recommend(&mut engine, 3, Mark::Blue);
        assert!(column <= Column::MIN + 1);
    }

    #[test]
    fn test_adjacent_blocks_counts_vertical_pairs_and_neighbors() {
        let mut board = Board::new();
        board.push(0, Mark::Red);
        board.push(0, Mark::Red);
        board.push(0, Mark::Red);
        board.push(1, Mark::Red);
        board.push(-1, Mark::Blue);
        // Two vertical pairs, one right neighbor at depth 0.
        assert_eq!(adjacent_blocks(&board, 0, Mark::Red), 3);
        assert_eq!(adjacent_blocks(&board, 0, Mark::Blue), 0);
        assert_eq!(adjacent_blocks(&board, 5, Mark::Red), 0);
    }

    #[test]
    fn test_recommend_leaves_engine_untouched() {
        let mut engine = engine_with(
            &[
                (0, Mark::Red),
                (0, Mark::Blue),
                (1, Mark::Red),
                (-1, Mark::Blue),
                (2, Mark::Red),
            ],
            Mark::Blue,
        );
        let before = engine.clone();
        for k in 1..=5 {
            recommend(&mut engine, k, Mark::Blue);
            assert_eq!(engine, before);
        }
    }
}
