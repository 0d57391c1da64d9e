//! NES-style Tetris engine (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/` and are re-exported
//! here as `nestris::{types,core,engine,input}`. This package adds the
//! collaborator services that sit between the deterministic engine and a
//! host program: high score persistence and a wall-clock driven session.

pub mod highscore;
pub mod session;

pub use nestris_core as core;
pub use nestris_engine as engine;
pub use nestris_input as input;
pub use nestris_types as types;

pub use highscore::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use session::Session;
