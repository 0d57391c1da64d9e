//! Shared data types and rule constants.
//!
//! Everything here is plain data with no game logic, so it can be used by the
//! simulation core, the orchestrator, input translation and any renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Rows**: 22 rows (indexed 0-21), of which rows 0-1 are a hidden spawn
//!   buffer and rows 2-21 are visible
//!
//! # Timing
//!
//! All timing is counted in logical frames at 60 frames per second. There are
//! no millisecond timers anywhere in the simulation.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMES_PER_SECOND` | 60 | Logical clock rate |
//! | `DAS_DELAY_FRAMES` | 16 | Frames before a held direction auto-repeats |
//! | `DAS_REPEAT_FRAMES` | 6 | Frames between repeats once DAS is active |
//!
//! # Gravity
//!
//! Frames per one-cell drop, indexed by level (levels above 20 use the last
//! entry):
//!
//! | Level | Frames |
//! |-------|--------|
//! | 0 | 48 |
//! | 1 | 43 |
//! | 5 | 23 |
//! | 8 | 8 |
//! | 9 | 6 |
//! | 10-12 | 5 |
//! | 13-15 | 4 |
//! | 16-18 | 3 |
//! | 19-20 | 2 |
//!
//! # Examples
//!
//! ```
//! use nestris_types::{PieceKind, Rotation, BOARD_WIDTH, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::from_u8(3), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.as_u8(), 3);
//! assert_eq!(PieceKind::from_u8(8), None);
//!
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_ROWS, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Total board rows including the hidden spawn buffer
pub const BOARD_ROWS: u8 = 22;

/// Rows at the top of the board that are never displayed
pub const HIDDEN_ROWS: u8 = 2;

/// Rows shown to the player
pub const VISIBLE_ROWS: u8 = BOARD_ROWS - HIDDEN_ROWS;

/// Logical clock rate
pub const FRAMES_PER_SECOND: u32 = 60;

/// Frames a direction must be held before auto-repeat kicks in
pub const DAS_DELAY_FRAMES: u32 = 16;

/// Frames between auto-repeat shifts once DAS is active
pub const DAS_REPEAT_FRAMES: u32 = 6;

/// Frames per one-cell drop for levels 0-20
pub const GRAVITY_TABLE: [u32; 21] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2, 2,
];

/// Highest level with its own gravity entry
pub const MAX_GRAVITY_LEVEL: u32 = (GRAVITY_TABLE.len() - 1) as u32;

/// Line clear scoring table
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per cell descended with soft drop (level independent)
pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;

/// Lines needed per level increase
pub const LINES_PER_LEVEL: u32 = 10;

/// Level cap
pub const MAX_LEVEL: u32 = 99;

/// Rows covered by the game-over fill animation, one per frame
pub const GAME_OVER_FILL_ROWS: u8 = VISIBLE_ROWS;

/// The seven tetromino piece kinds, encoded 1-7 on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I = 1,
    O = 2,
    T = 3,
    S = 4,
    Z = 5,
    J = 6,
    L = 7,
}

impl PieceKind {
    /// All kinds in encoding order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Decode a board/randomizer value (1-7)
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation state, cycling North → East → South → West → North
///
/// The numeric index is 0-3; any integer is accepted by [`Rotation::from_index`]
/// and normalized modulo 4 (always positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Normalize any integer rotation state into 0-3
    ///
    /// ```
    /// use nestris_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(0), Rotation::North);
    /// assert_eq!(Rotation::from_index(5), Rotation::East);
    /// assert_eq!(Rotation::from_index(-2), Rotation::South);
    /// ```
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(self) -> Self {
        Self::from_index(i32::from(self.index()) + 1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(i32::from(self.index()) - 1)
    }
}

/// Horizontal input direction held by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Column offset applied by one shift in this direction
    pub fn dx(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::None => 0,
        }
    }
}

/// Discrete actions queued between frames and consumed in FIFO order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause
    Pause,
    /// Begin a new game from title or game over
    Start,
    /// Return to the title screen
    Reset,
}

impl Action {
    /// Actions consumed by the frame step itself; the rest are control
    /// transitions applied by the caller.
    pub fn is_rotation(self) -> bool {
        matches!(self, Action::RotateCw | Action::RotateCcw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::RotateCw => "rotateCw",
            Action::RotateCcw => "rotateCcw",
            Action::Pause => "pause",
            Action::Start => "start",
            Action::Reset => "reset",
        }
    }
}

/// Continuous input state sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HeldInputs {
    pub direction: Direction,
    pub soft_drop: bool,
}

/// Discrete game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Title,
    Playing,
    Paused,
    GameOver,
}

/// Events emitted by a single frame step, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    PieceFell,
    PieceLocked {
        #[serde(rename = "linesCleared")]
        lines_cleared: u8,
    },
    PieceSpawned,
    GameOver,
    GameOverAnimationComplete,
}

/// A board cell: `None` is empty, `Some(kind)` is a locked block
pub type Cell = Option<PieceKind>;
