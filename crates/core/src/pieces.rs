//! Pieces module - tetromino catalog and the active piece value
//!
//! Every kind has a fixed spawn origin and exactly four rotation states, each a
//! list of four cell offsets from the piece origin (x grows right, y grows
//! down). I, S and Z only have two distinct orientations, so their third and
//! fourth states repeat the first two; all four O states are identical.
//!
//! Offsets are laid out so that every kind occupies row 0 or 1 at its spawn
//! origin, i.e. the hidden buffer rows.

use crate::error::CoreError;
use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Absolute board coordinates of a piece's four minos
pub type PieceCells = [(i8, i8); 4];

const I_HORIZONTAL: PieceShape = [(0, 1), (1, 1), (2, 1), (3, 1)];
const I_VERTICAL: PieceShape = [(2, 0), (2, 1), (2, 2), (2, 3)];

const O_SHAPE: PieceShape = [(1, 0), (2, 0), (1, 1), (2, 1)];

const S_HORIZONTAL: PieceShape = [(1, 1), (2, 1), (0, 2), (1, 2)];
const S_VERTICAL: PieceShape = [(1, 0), (1, 1), (2, 1), (2, 2)];

const Z_HORIZONTAL: PieceShape = [(0, 1), (1, 1), (1, 2), (2, 2)];
const Z_VERTICAL: PieceShape = [(2, 0), (1, 1), (2, 1), (1, 2)];

/// Rotation tables indexed by `[kind - 1][rotation]`
const CATALOG: [[PieceShape; 4]; 7] = [
    // I
    [I_HORIZONTAL, I_VERTICAL, I_HORIZONTAL, I_VERTICAL],
    // O
    [O_SHAPE, O_SHAPE, O_SHAPE, O_SHAPE],
    // T (spawns pointing down)
    [
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
    ],
    // S
    [S_HORIZONTAL, S_VERTICAL, S_HORIZONTAL, S_VERTICAL],
    // Z
    [Z_HORIZONTAL, Z_VERTICAL, Z_HORIZONTAL, Z_VERTICAL],
    // J
    [
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
    ],
    // L
    [
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    CATALOG[usize::from(kind.as_u8() - 1)][usize::from(rotation.index())]
}

/// Absolute cells for `kind` at origin `(x, y)`; `rotation_state` is
/// normalized modulo 4.
///
/// Returns None if a cell would leave the `i8` coordinate range. No such
/// cell can be on the board, so callers treat it as a collision.
pub fn cells_for(kind: PieceKind, x: i8, y: i8, rotation_state: i32) -> Option<PieceCells> {
    let shape = get_shape(kind, Rotation::from_index(rotation_state));
    let mut cells = [(0, 0); 4];
    for (cell, (dx, dy)) in cells.iter_mut().zip(shape) {
        *cell = (x.checked_add(dx)?, y.checked_add(dy)?);
    }
    Some(cells)
}

/// Spawn origin used whenever a piece of `kind` first appears
///
/// Three-wide pieces center their pivot on column 5; I and O sit one column
/// further left so their footprint covers columns 3-6 and 4-5 respectively.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::I | PieceKind::O => (3, 0),
        PieceKind::T | PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L => (4, 0),
    }
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl Piece {
    /// Create a new piece at its spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            x,
            y,
            rotation: Rotation::North,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells occupied by this piece; None if unrepresentable
    pub fn cells(&self) -> Option<PieceCells> {
        cells_for(self.kind, self.x, self.y, i32::from(self.rotation.index()))
    }

    /// Same piece translated by `(dx, dy)`; `None` if the origin would leave
    /// the `i8` coordinate range.
    pub fn shifted(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }

    pub fn with_rotation(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }
}

/// Untyped piece data as it arrives from scenario files or external callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPiece {
    pub kind: u8,
    pub x: i32,
    pub y: i32,
    pub rotation: i32,
}

impl TryFrom<RawPiece> for Piece {
    type Error = CoreError;

    fn try_from(raw: RawPiece) -> Result<Self, Self::Error> {
        let kind = PieceKind::from_u8(raw.kind).ok_or(CoreError::InvalidPieceKind(raw.kind))?;
        let (Ok(x), Ok(y)) = (i8::try_from(raw.x), i8::try_from(raw.y)) else {
            return Err(CoreError::CoordinateOutOfRange { x: raw.x, y: raw.y });
        };
        Ok(Self {
            kind,
            x,
            y,
            rotation: Rotation::from_index(raw.rotation),
        })
    }
}
