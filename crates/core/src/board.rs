//! Board module - the locked-cell grid
//!
//! The board is a 10x22 grid where each cell can be empty or hold the kind of
//! piece that was locked there. Rows 0-1 are the hidden spawn buffer, rows
//! 2-21 are visible. Coordinates: (x, y) where x ranges 0..9 (left to right),
//! y ranges 0..21 (top to bottom).
//!
//! Storage is a flat `Copy` array, and every operation that changes cells
//! returns a new `Board` instead of mutating in place. A board handed out to a
//! renderer or kept in a replay log can therefore never change underneath it.

use arrayvec::ArrayVec;

use crate::error::CoreError;
use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, BOARD_ROWS, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH as usize * BOARD_ROWS as usize;

/// One board row as raw kind codes (0 = empty)
pub type U8Row = [u8; BOARD_WIDTH as usize];

/// The whole board as raw kind codes, row-major
pub type U8Grid = [U8Row; BOARD_ROWS as usize];

/// Result of [`Board::clear_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub board: Board,
    /// Indices (in the input board) of the rows that were removed, top to bottom
    pub rows: ArrayVec<u8, { BOARD_ROWS as usize }>,
}

impl LineClear {
    pub fn cleared_count(&self) -> usize {
        self.rows.len()
    }
}

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from raw kind codes
    ///
    /// Fails with [`CoreError::InvalidPieceKind`] on the first value above 7.
    pub fn from_u8_grid(grid: &U8Grid) -> Result<Self, CoreError> {
        let mut cells = [None; BOARD_SIZE];
        for (y, row) in grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                cells[y * BOARD_WIDTH as usize + x] = match value {
                    0 => None,
                    v => Some(PieceKind::from_u8(v).ok_or(CoreError::InvalidPieceKind(v))?),
                };
            }
        }
        Ok(Self { cells })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_ROWS as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get total row count of the board, hidden rows included
    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Copy of this board with one cell replaced
    /// Returns None if out of bounds
    pub fn with_cell(&self, x: i8, y: i8, cell: Cell) -> Option<Self> {
        let idx = Self::index(x, y)?;
        let mut next = *self;
        next.cells[idx] = cell;
        Some(next)
    }

    /// Copy of this board with row `y` replaced
    /// Returns None if out of bounds
    pub fn with_row(&self, y: i8, row: [Cell; BOARD_WIDTH as usize]) -> Option<Self> {
        let start = Self::index(0, y)?;
        let mut next = *self;
        next.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(&row);
        Some(next)
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Get one row, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_ROWS as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every complete row
    ///
    /// Scans top to bottom, keeps incomplete rows in their original order and
    /// prepends one empty row per removed row, so the row count never changes.
    pub fn clear_lines(&self) -> LineClear {
        let width = BOARD_WIDTH as usize;
        let mut rows = ArrayVec::new();
        let mut kept: ArrayVec<usize, { BOARD_ROWS as usize }> = ArrayVec::new();

        for y in 0..BOARD_ROWS as usize {
            if self.is_row_complete(y) {
                rows.push(y as u8);
            } else {
                kept.push(y);
            }
        }

        if rows.is_empty() {
            return LineClear { board: *self, rows };
        }

        let mut next = Self::new();
        let offset = rows.len();
        for (i, &src_y) in kept.iter().enumerate() {
            let src = src_y * width;
            let dst = (offset + i) * width;
            next.cells[dst..dst + width].copy_from_slice(&self.cells[src..src + width]);
        }

        LineClear { board: next, rows }
    }

    /// Copy of this board with the piece's four cells written in
    ///
    /// Returns None if any cell lies outside the grid. Occupancy is not
    /// checked here; callers go through collision first.
    pub fn place_piece(&self, piece: &Piece) -> Option<Self> {
        let mut next = *self;
        for (x, y) in piece.cells()? {
            let idx = Self::index(x, y)?;
            next.cells[idx] = Some(piece.kind);
        }
        Some(next)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Project to raw kind codes (0 = empty, 1-7 = kind)
    pub fn to_u8_grid(&self) -> U8Grid {
        let mut out = [[0u8; BOARD_WIDTH as usize]; BOARD_ROWS as usize];
        self.write_u8_grid(&mut out);
        out
    }

    /// Write raw kind codes into an existing grid
    pub fn write_u8_grid(&self, out: &mut U8Grid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            for (dst, cell) in row.iter_mut().zip(&self.cells[start..start + width]) {
                *dst = cell.map_or(0, PieceKind::as_u8);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
