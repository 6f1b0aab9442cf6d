//! Game session management.
//!
//! Each session keeps its game as a JSON snapshot. Every interaction loads
//! the snapshot, mutates the game, and saves it back, so no live `Game`
//! outlives a call.

use connect_k_core::{Column, Game, GameConfig, GameStatus};
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// What went wrong in a session call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionErrorKind {
    /// No session with the given id.
    #[display("unknown session")]
    UnknownSession,
    /// The game has not been configured.
    #[display("game not started")]
    NotStarted,
    /// The game already has a result.
    #[display("game over")]
    GameOver,
    /// The computer is to move.
    #[display("not your turn")]
    NotYourTurn,
    /// Snapshot could not be written or read.
    #[display("encoding")]
    Encoding,
    /// The store lock was poisoned.
    #[display("storage")]
    Storage,
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error ({}): {} at {}:{}", kind, message, file, line)]
pub struct SessionError {
    /// Error category.
    pub kind: SessionErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: SessionErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Keyed store of serialized games.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, String>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, String>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::new(SessionErrorKind::Storage, "Session store lock poisoned"))
    }

    /// Starts a new configured game and returns its id.
    #[instrument(skip(self))]
    pub fn create(&self, config: GameConfig) -> Result<SessionId, SessionError> {
        let id = format!("game-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut game = Game::new();
        game.configure(config);
        self.save(&id, &game)?;
        info!(session_id = %id, "Created new session");
        Ok(id)
    }

    /// Loads the game stored under `id`.
    #[instrument(skip(self))]
    pub fn load(&self, id: &str) -> Result<Game, SessionError> {
        let snapshot = self.lock()?.get(id).cloned().ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::new(SessionErrorKind::UnknownSession, format!("No session {}", id))
        })?;
        serde_json::from_str(&snapshot).map_err(|e| {
            SessionError::new(
                SessionErrorKind::Encoding,
                format!("Failed to decode session {}: {}", id, e),
            )
        })
    }

    /// Stores `game` under `id`, replacing any previous snapshot.
    #[instrument(skip(self, game))]
    pub fn save(&self, id: &str, game: &Game) -> Result<(), SessionError> {
        let snapshot = serde_json::to_string(game).map_err(|e| {
            SessionError::new(
                SessionErrorKind::Encoding,
                format!("Failed to encode session {}: {}", id, e),
            )
        })?;
        self.lock()?.insert(id.to_string(), snapshot);
        debug!(session_id = id, "Session saved");
        Ok(())
    }

    /// Drops a session. Returns whether it existed.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Result<bool, SessionError> {
        Ok(self.lock()?.remove(id).is_some())
    }

    /// Lists all session ids.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<SessionId>, SessionError> {
        let ids: Vec<_> = self.lock()?.keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }

    /// Loads, mutates and saves the game under `id`.
    fn with_game<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Game) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut game = self.load(id)?;
        let value = f(&mut game)?;
        self.save(id, &game)?;
        Ok(value)
    }

    /// Plays a human move and settles the result.
    #[instrument(skip(self))]
    pub fn human_move(&self, id: &str, column: Column) -> Result<GameStatus, SessionError> {
        self.with_game(id, |game| {
            match game.status() {
                GameStatus::NotStarted => {
                    return Err(SessionError::new(
                        SessionErrorKind::NotStarted,
                        "Configure the game before playing",
                    ));
                }
                GameStatus::Over(outcome) => {
                    warn!(%outcome, "Move after game over");
                    return Err(SessionError::new(
                        SessionErrorKind::GameOver,
                        format!("Game is over: {}", outcome),
                    ));
                }
                GameStatus::InProgress => {}
            }
            if game.is_computer_turn() {
                warn!(column, "Human tried to move out of turn");
                return Err(SessionError::new(
                    SessionErrorKind::NotYourTurn,
                    format!("Waiting for the computer ({})", game.to_move()),
                ));
            }
            game.play(column);
            let status = game.settle();
            info!(column, %status, "Human move completed");
            Ok(status)
        })
    }

    /// Lets the computer move if it is its turn.
    ///
    /// Returns the column played, or `None` when there was nothing to do.
    #[instrument(skip(self))]
    pub fn computer_move(&self, id: &str) -> Result<Option<Column>, SessionError> {
        self.with_game(id, |game| {
            if game.is_over() || !game.is_computer_turn() {
                return Ok(None);
            }
            let column = game.recommend();
            game.play(column);
            let status = game.settle();
            info!(column, %status, "Computer move completed");
            Ok(Some(column))
        })
    }

    /// Takes back the last move, or the last full round against the computer.
    ///
    /// Returns the columns taken back, most recent first.
    #[instrument(skip(self))]
    pub fn undo(&self, id: &str) -> Result<Vec<Column>, SessionError> {
        self.with_game(id, |game| {
            let mut undone: Vec<Column> = game.undo().into_iter().collect();
            if game.is_computer_turn() {
                undone.extend(game.undo());
            }
            debug!(?undone, "Undo completed");
            Ok(undone)
        })
    }

    /// Applies a configuration to the game under `id`. No-op once configured.
    #[instrument(skip(self))]
    pub fn configure(&self, id: &str, config: GameConfig) -> Result<bool, SessionError> {
        self.with_game(id, |game| Ok(game.configure(config)))
    }

    /// Returns the game under `id` to a fresh, unconfigured state.
    #[instrument(skip(self))]
    pub fn reset(&self, id: &str) -> Result<(), SessionError> {
        self.with_game(id, |game| {
            game.reset();
            Ok(())
        })
    }
}
