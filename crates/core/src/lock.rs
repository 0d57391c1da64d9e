//! Lock and line-clear pipeline
//!
//! A piece locks the instant it cannot fall any further; there is no lock
//! delay and no sliding window after floor contact.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collision::{is_touching_floor, is_valid_position};
use crate::error::LockError;
use crate::pieces::{Piece, RawPiece};
use crate::types::BOARD_ROWS;

/// Board and clear details after a successful lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    pub board: Board,
    pub cleared_lines: u8,
    /// Cleared row indices on the board as it was right after the lock
    pub cleared_rows: ArrayVec<u8, { BOARD_ROWS as usize }>,
}

pub fn should_lock(board: &Board, piece: &Piece) -> bool {
    is_touching_floor(board, piece)
}

/// Commit the piece's cells into the board
pub fn lock_piece(board: &Board, piece: &Piece) -> Result<Board, LockError> {
    if !is_valid_position(board, piece) {
        return Err(LockError::PieceInInvalidPosition);
    }
    if !should_lock(board, piece) {
        return Err(LockError::PieceNotTouchingFloor);
    }
    board
        .place_piece(piece)
        .ok_or(LockError::PieceInInvalidPosition)
}

/// [`lock_piece`] on untyped piece data
pub fn lock_raw(board: &Board, raw: RawPiece) -> Result<Board, LockError> {
    let piece = Piece::try_from(raw).map_err(LockError::InvalidPiece)?;
    lock_piece(board, &piece)
}

/// Lock the piece, then remove completed rows
pub fn lock_and_clear(board: &Board, piece: &Piece) -> Result<LockOutcome, LockError> {
    let locked = lock_piece(board, piece)?;
    let clear = locked.clear_lines();
    Ok(LockOutcome {
        board: clear.board,
        cleared_lines: clear.rows.len() as u8,
        cleared_rows: clear.rows,
    })
}
