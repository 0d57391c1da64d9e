//! Level progression
//!
//! `level = start_level + total_lines / 10`, capped at 99. The embedded
//! gravity timer is kept on the same level and is only rebuilt (counter
//! zeroed) when the level actually goes up.

use crate::gravity::Gravity;
use crate::types::{LINES_PER_LEVEL, MAX_LEVEL};

/// Level reached after `total_lines` cleared lines when starting at `start_level`
pub fn calculate_level(total_lines: u32, start_level: u32) -> u32 {
    start_level
        .saturating_add(total_lines / LINES_PER_LEVEL)
        .min(MAX_LEVEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelState {
    pub current_level: u32,
    pub start_level: u32,
    pub total_lines: u32,
    /// Lines still needed for the next level; 0 once the cap is reached
    pub lines_until_next: u32,
    pub gravity: Gravity,
}

/// Result of [`LevelState::update_after_clear`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpdate {
    pub level: LevelState,
    pub leveled_up: bool,
}

fn lines_until_next(level: u32, total_lines: u32) -> u32 {
    if level >= MAX_LEVEL {
        0
    } else {
        LINES_PER_LEVEL - total_lines % LINES_PER_LEVEL
    }
}

impl LevelState {
    /// Level state for a new game; `start_level` is capped at 99
    pub fn new(start_level: u32) -> Self {
        let start_level = start_level.min(MAX_LEVEL);
        Self {
            current_level: start_level,
            start_level,
            total_lines: 0,
            lines_until_next: lines_until_next(start_level, 0),
            gravity: Gravity::new(start_level),
        }
    }

    /// Same state with a different gravity timer (level unchanged)
    pub fn with_gravity(&self, gravity: Gravity) -> Self {
        Self { gravity, ..*self }
    }

    /// Account for `lines_cleared` new lines
    pub fn update_after_clear(&self, lines_cleared: u32) -> LevelUpdate {
        let total_lines = self.total_lines.saturating_add(lines_cleared);
        let current_level = calculate_level(total_lines, self.start_level);
        let leveled_up = current_level > self.current_level;
        let gravity = if leveled_up {
            self.gravity.with_level(current_level)
        } else {
            self.gravity
        };

        LevelUpdate {
            level: Self {
                current_level,
                start_level: self.start_level,
                total_lines,
                lines_until_next: lines_until_next(current_level, total_lines),
                gravity,
            },
            leveled_up,
        }
    }
}
