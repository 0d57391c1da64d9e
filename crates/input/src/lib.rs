//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events to game [`Key`]s and folds presses and releases into the per-frame
//! input the engine consumes: a FIFO of [`types::Action`]s plus the sampled
//! [`types::HeldInputs`].

pub mod handler;
pub mod map;

pub use nestris_types as types;

pub use handler::{ActionQueue, InputHandler, ACTION_QUEUE_CAPACITY};
pub use map::{map_key, should_quit, Key};
