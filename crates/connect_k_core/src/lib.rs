//! Pure connect-k game logic.
//!
//! Two players take turns pushing marks into columns of an unbounded board.
//! A new mark enters a column at depth 0 and pushes the marks already there
//! one depth further. A player wins with `k` of their marks in a row, either
//! at the front of one column or at the same depth across adjacent columns.
//!
//! # Architecture
//!
//! - **Board**: sparse per-column stacks ([`Board`])
//! - **Engine**: play/unplay with history and forecast guards ([`MoveEngine`])
//! - **Rules**: vertical and horizontal win detection ([`rules`])
//! - **Advisor**: three-pass heuristic for the computer ([`advisor`])
//! - **Game**: configuration and status over the engine ([`Game`])
//!
//! # Example
//!
//! ```
//! use connect_k_core::{Game, GameConfig, Mark, OpponentKind};
//!
//! let mut game = Game::new();
//! game.configure(GameConfig::new(3, Mark::Red, Mark::Red, OpponentKind::Computer));
//! game.play(0);
//! let reply = game.recommend();
//! game.play(reply);
//! assert!(!game.is_over());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod advisor;
mod board;
mod engine;
mod game;
pub mod rules;
mod types;
mod view;

pub use board::Board;
pub use engine::{Forecast, MoveEngine};
pub use game::Game;
pub use rules::{Orientation, WinningRun, check_winner};
pub use types::{Column, GameConfig, GameStatus, Mark, OpponentKind, Outcome};
pub use view::{Cell, Projection, project};
