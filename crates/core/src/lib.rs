//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and nothing else. It has **no**
//! dependencies on rendering, input devices, storage or wall-clock time, and
//! every operation returns a new value instead of mutating its input:
//!
//! - **Deterministic**: the same seed and the same per-frame inputs always
//!   produce the same states
//! - **Frame-counted**: gravity and auto-shift are driven by logical frames at
//!   60 Hz, never by elapsed milliseconds
//! - **Snapshot-safe**: [`Board`] is a `Copy` value, so a board handed out
//!   earlier can never change underneath its holder
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid (2 hidden rows) with line clearing
//! - [`pieces`]: tetromino catalog and the active [`Piece`]
//! - [`collision`]: collision, movement and no-kick rotation
//! - [`rng`]: seeded LCG piece randomizer
//! - [`gravity`]: per-level frame-counted drop timer
//! - [`das`]: delayed auto shift for held directions
//! - [`lock`]: lock and line clear pipeline
//! - [`scoring`]: line clear and soft drop points
//! - [`level`]: level progression tied to the gravity timer
//! - [`error`]: typed errors
//!
//! # Game Rules
//!
//! - **Randomizer**: plain LCG draws, repeats allowed (no bag)
//! - **Rotation**: in place only; a colliding rotation is cancelled, never
//!   kicked
//! - **Locking**: immediate once the piece cannot fall; no lock delay
//! - **DAS**: immediate shift, 16-frame delay, then a shift every 6 frames
//! - **Scoring**: 40/100/300/1200 x (level + 1), plus 1 point per soft-drop cell
//! - **Levels**: one per 10 lines on top of the start level, capped at 99
//!
//! # Example
//!
//! ```
//! use nestris_core::{collision, Board, Piece, Randomizer};
//!
//! let rng = Randomizer::new(12345);
//! let (kind, _rng) = rng.next_piece();
//!
//! let board = Board::new();
//! let piece = Piece::spawn(kind);
//! assert!(collision::can_spawn(&board, kind));
//!
//! let moved = collision::try_move(&board, &piece, 1, 0).unwrap();
//! assert_eq!(moved.x, piece.x + 1);
//! ```

pub mod board;
pub mod collision;
pub mod das;
pub mod error;
pub mod gravity;
pub mod level;
pub mod lock;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use nestris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineClear};
pub use das::{Das, DasTick};
pub use error::{CoreError, LockError};
pub use gravity::{Gravity, GravityTick};
pub use level::{calculate_level, LevelState, LevelUpdate};
pub use lock::{lock_and_clear, lock_piece, should_lock, LockOutcome};
pub use pieces::{cells_for, get_shape, spawn_position, Piece, RawPiece};
pub use rng::Randomizer;
pub use scoring::{calculate_line_clear_score, calculate_soft_drop_score, Score};
