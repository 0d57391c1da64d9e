//! Typed errors for the simulation core.
//!
//! None of these are fatal. Raw-input validation reports [`CoreError`]; the
//! lock pipeline reports [`LockError`] when it is invoked outside its
//! preconditions, which indicates a caller bug rather than a player action.

/// Validation failures for untyped piece data
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid piece kind: {0} (expected 1-7)")]
    InvalidPieceKind(u8),

    #[error("piece origin ({x}, {y}) is outside the representable range")]
    CoordinateOutOfRange { x: i32, y: i32 },
}

/// Lock pipeline precondition failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    #[error("invalid piece: {0}")]
    InvalidPiece(#[source] CoreError),

    #[error("piece overlaps the board or lies outside it")]
    PieceInInvalidPosition,

    #[error("piece can still fall")]
    PieceNotTouchingFloor,
}
