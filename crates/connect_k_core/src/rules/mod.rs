//! Game rules for connect-k.
//!
//! Pure functions over the [`Board`](super::Board). Rules never mutate
//! state; recording a result is up to [`Game`](super::Game).

pub mod win;

pub use win::{Orientation, WinningRun, check_winner};
