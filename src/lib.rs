//! Connect-k application library.
//!
//! Wraps the pure game crate with the pieces a playable program needs.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with defaults and validation
//! - **Session**: keyed store of serialized games with turn handling
//! - **Advice**: headless advisor queries over a replayed move list
//!
//! # Example
//!
//! ```
//! use connect_k::{SessionManager, Settings};
//!
//! # fn example() -> anyhow::Result<()> {
//! let sessions = SessionManager::new();
//! let id = sessions.create(Settings::default().game_config())?;
//! sessions.human_move(&id, 0)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod advice;
mod config;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, DisplaySettings, MAX_K, Settings, validate_k};

// Crate-level exports - Session management
pub use session::{SessionError, SessionErrorKind, SessionId, SessionManager};

// Crate-level exports - Advice
pub use advice::{Advice, advise};

// Crate-level exports - Game types
pub use connect_k_core::{
    Cell, Column, Game, GameConfig, GameStatus, Mark, OpponentKind, Outcome, Projection,
};
