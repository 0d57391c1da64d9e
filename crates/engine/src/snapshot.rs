//! Read-only view of a game for display and serialization
//!
//! A snapshot copies everything a presentation layer needs out of the
//! aggregate. It owns its data, so holding one never observes later frames.

use serde::{Deserialize, Serialize};

use nestris_core::board::U8Grid;
use nestris_core::pieces::PieceCells;
use nestris_core::Piece;

use crate::game::GameState;
use crate::types::{PieceKind, Rotation, Status, BOARD_ROWS, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    /// Absolute board cells of the four minos
    pub cells: PieceCells,
}

impl ActiveSnapshot {
    /// None if the piece's cells fall outside the coordinate range
    pub fn new(piece: Piece) -> Option<Self> {
        Some(Self {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
            rotation: piece.rotation,
            cells: piece.cells()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Full 22-row grid, hidden rows included; 0 is empty, 1-7 is the kind
    pub board: U8Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub status: Status,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub tetrises: u32,
    pub frame: u64,
    pub seed: u32,
    pub pieces_spawned: u32,
    /// Rows covered by the game-over fill, `None` while the game is running
    pub game_over_rows: Option<u8>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_ROWS as usize],
            active: None,
            next: None,
            status: Status::Title,
            score: 0,
            high_score: 0,
            level: 0,
            lines: 0,
            tetrises: 0,
            frame: 0,
            seed: 0,
            pieces_spawned: 0,
            game_over_rows: None,
        }
    }
}

impl GameSnapshot {
    /// True while pieces are falling
    pub fn playable(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill an existing snapshot in place, reusing its board buffer
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board().write_u8_grid(&mut out.board);
        out.active = self.active().and_then(ActiveSnapshot::new);
        out.next = self.next_kind();
        out.status = self.status();
        out.score = self.score();
        out.high_score = self.high_score();
        out.level = self.level();
        out.lines = self.lines();
        out.tetrises = self.score_state().tetrises;
        out.frame = self.frame();
        out.seed = self.seed();
        out.pieces_spawned = self.pieces_spawned();
        out.game_over_rows = self.animation().map(|a| a.rows_filled());
    }
}
