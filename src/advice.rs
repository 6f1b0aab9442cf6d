//! Headless advisor queries.
//!
//! Replays a list of columns and asks the advisor for the next move. Used by
//! the `advise` subcommand and handy for scripting positions.

use crate::config::{ConfigError, validate_k};
use connect_k_core::{Column, Game, GameConfig, GameStatus, Mark, OpponentKind};
use serde::Serialize;
use tracing::{debug, instrument};

/// Advisor answer for a replayed position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    /// Column the advisor recommends.
    pub recommendation: Column,
    /// Mark the recommendation is for.
    pub side: Mark,
    /// Mark to move after the replay.
    pub to_move: Mark,
    /// Status after the replay.
    pub status: GameStatus,
    /// Board as text, top row first.
    pub board: String,
}

/// Replays `moves` (alternating from `first`) and asks for a move for `side`.
///
/// `side` defaults to the mark to move.
#[instrument]
pub fn advise(
    k: usize,
    first: Mark,
    moves: &[Column],
    side: Option<Mark>,
) -> Result<Advice, ConfigError> {
    validate_k(k)?;
    let to_move = if moves.len() % 2 == 0 {
        first
    } else {
        first.toggle()
    };
    let side = side.unwrap_or(to_move);

    let mut game = Game::new();
    game.configure(GameConfig::new(k, side.toggle(), first, OpponentKind::Computer));
    for &column in moves {
        game.play(column);
    }
    let status = game.settle();
    let recommendation = game.recommend();
    debug!(recommendation, %side, "Advice computed");

    Ok(Advice {
        recommendation,
        side,
        to_move: game.to_move(),
        status,
        board: game.engine().board().display(),
    })
}
