//! Game state: configuration, status and the operations exposed to callers.
//!
//! A [`Game`] is a plain value. Session layers serialize it whole between
//! interactions; nothing here outlives a single call.

use super::advisor;
use super::engine::MoveEngine;
use super::rules::{WinningRun, check_winner};
use super::types::{Column, GameConfig, GameStatus, Mark, OpponentKind, Outcome};
use super::view::{Projection, project};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Connect-k game engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    config: Option<GameConfig>,
    engine: MoveEngine,
    status: GameStatus,
}

impl Game {
    /// Creates an unconfigured game.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the one-time setup.
    ///
    /// Returns `false` and changes nothing if the game is already configured.
    #[instrument(skip(self))]
    pub fn configure(&mut self, config: GameConfig) -> bool {
        if self.config.is_some() {
            debug!("Already configured, ignoring");
            return false;
        }
        self.engine = MoveEngine::new(*config.first());
        self.config = Some(config);
        self.status = GameStatus::InProgress;
        info!(k = config.k(), human = %config.human(), first = %config.first(), "Game configured");
        true
    }

    /// Returns the configuration, if set.
    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    /// Returns the move engine.
    pub fn engine(&self) -> &MoveEngine {
        &self.engine
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the mark that plays next.
    pub fn to_move(&self) -> Mark {
        self.engine.to_move()
    }

    /// Plays the active mark into `column`.
    ///
    /// Moves are not rejected after the game is over; callers stop offering
    /// them.
    #[instrument(skip(self), fields(mark = %self.engine.to_move()))]
    pub fn play(&mut self, column: Column) {
        self.engine.play(column);
        debug!(moves = self.engine.history().len(), "Move played");
    }

    /// Takes back the most recent move and re-settles the status.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Option<Column> {
        let column = self.engine.unplay()?;
        if self.config.is_some() {
            self.status = GameStatus::InProgress;
            self.settle();
        }
        debug!(column, "Move undone");
        Some(column)
    }

    /// Column the computer would play. Column 0 before configuration.
    #[instrument(skip(self))]
    pub fn recommend(&mut self) -> Column {
        let Some(config) = self.config else {
            return 0;
        };
        advisor::recommend(&mut self.engine, *config.k(), config.computer())
    }

    /// Column the advisor suggests for the side to move.
    #[instrument(skip(self))]
    pub fn hint(&mut self) -> Column {
        let Some(config) = self.config else {
            return 0;
        };
        let mark = self.engine.to_move();
        advisor::recommend(&mut self.engine, *config.k(), mark)
    }

    /// Checks `mark` for a win and records it if the game is still open.
    #[instrument(skip(self))]
    pub fn check(&mut self, mark: Mark) -> Option<WinningRun> {
        let run = self.check_forecast(mark)?;
        if !self.is_over() {
            info!(%mark, depth = run.depth, orientation = ?run.orientation, "Game won");
            self.status = GameStatus::Over(Outcome::Winner(mark));
        }
        Some(run)
    }

    /// Checks `mark` for a win without touching the status.
    pub fn check_forecast(&self, mark: Mark) -> Option<WinningRun> {
        let k = *self.config.as_ref()?.k();
        check_winner(self.engine.board(), k, mark)
    }

    /// Checks both marks on the current position and records the result.
    ///
    /// Both marks winning on the same pair of checks is a draw.
    #[instrument(skip(self))]
    pub fn settle(&mut self) -> GameStatus {
        if self.is_over() || self.config.is_none() {
            return self.status;
        }
        let red = self.check_forecast(Mark::Red);
        let blue = self.check_forecast(Mark::Blue);
        self.status = match (red, blue) {
            (Some(_), Some(_)) => GameStatus::Over(Outcome::Draw),
            (Some(run), None) | (None, Some(run)) => GameStatus::Over(Outcome::Winner(run.mark)),
            (None, None) => GameStatus::InProgress,
        };
        if self.is_over() {
            info!(status = %self.status, "Game settled");
        }
        self.status
    }

    /// True once a result has been recorded.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    /// Result of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Winning mark, if the game ended with one.
    pub fn winner(&self) -> Option<Mark> {
        match self.outcome()? {
            Outcome::Winner(mark) => Some(mark),
            Outcome::Draw => None,
        }
    }

    /// True when the computer is configured and it is its turn.
    pub fn is_computer_turn(&self) -> bool {
        self.config.is_some_and(|config| {
            *config.opponent() == OpponentKind::Computer
                && self.engine.to_move() == config.computer()
        })
    }

    /// Returns everything to a fresh, unconfigured game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Game reset");
    }

    /// Display grid centered on the most recent move.
    pub fn projection(&self, height: usize, width: usize) -> Projection {
        let center = self.engine.last_move().unwrap_or(0);
        project(self.engine.board(), height, width, center)
    }
}
