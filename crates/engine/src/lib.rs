//! Game engine - frame-stepped orchestration on top of `nestris-core`
//!
//! The engine owns the [`GameState`] aggregate and advances it one logical
//! frame at a time. Everything here is deterministic: no wall-clock reads
//! happen inside a step, and the only source of randomness is the seeded
//! randomizer carried in the state.
//!
//! # Module Structure
//!
//! - [`game`]: the aggregate, status transitions and the frame step
//! - [`snapshot`]: serializable read-only view for presentation layers
//! - [`clock`]: wall time to 60 Hz frame conversion
//! - [`replay`]: recorded inputs and deterministic playback
//! - [`error`]: step errors
//!
//! # Example
//!
//! ```
//! use nestris_engine::types::{GameEvent, HeldInputs, Status};
//! use nestris_engine::GameState;
//!
//! let state = GameState::with_seed(12345, 0).start_new_game(0);
//! assert_eq!(state.status(), Status::Playing);
//!
//! let mut state = state;
//! let mut falls = 0;
//! for _ in 0..48 {
//!     let frame = state.step_frame(&[], HeldInputs::default()).unwrap();
//!     falls += frame.events.iter().filter(|e| **e == GameEvent::PieceFell).count();
//!     state = frame.state;
//! }
//! assert_eq!(falls, 1);
//! ```

pub mod clock;
pub mod error;
pub mod game;
pub mod replay;
pub mod snapshot;

pub use nestris_core as core;
pub use nestris_types as types;

pub use clock::FrameClock;
pub use error::EngineError;
pub use game::{Frame, FrameEvents, GameOverAnimation, GameState};
pub use replay::{run_replay, run_replay_from, FrameInput, Replay, ReplayOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
