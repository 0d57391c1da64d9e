//! Gravity timer - frame-counted automatic drop
//!
//! `frames_per_drop` comes from the fixed 21-entry table indexed by
//! `min(level, 20)`. The counter resets when it reaches `frames_per_drop`
//! (a fall is due), when the level changes, and on spawn/lock.

use crate::types::{GRAVITY_TABLE, MAX_GRAVITY_LEVEL};

/// Frames per one-cell drop at `level`
pub fn frames_per_drop(level: u32) -> u32 {
    GRAVITY_TABLE[level.min(MAX_GRAVITY_LEVEL) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gravity {
    level: u32,
    frames_per_drop: u32,
    frame_counter: u32,
}

/// Result of [`Gravity::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTick {
    pub should_fall: bool,
    pub gravity: Gravity,
}

impl Gravity {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            frames_per_drop: frames_per_drop(level),
            frame_counter: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn frames_per_drop(&self) -> u32 {
        self.frames_per_drop
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Ticks remaining until the next fall, counting the falling tick
    pub fn frames_until_drop(&self) -> u32 {
        self.frames_per_drop - self.frame_counter
    }

    /// Advance one frame
    pub fn tick(&self) -> GravityTick {
        let counter = self.frame_counter + 1;
        if counter >= self.frames_per_drop {
            GravityTick {
                should_fall: true,
                gravity: self.reset_counter(),
            }
        } else {
            GravityTick {
                should_fall: false,
                gravity: Self {
                    frame_counter: counter,
                    ..*self
                },
            }
        }
    }

    /// Switch to `level`, recomputing the interval and zeroing the counter
    pub fn with_level(&self, level: u32) -> Self {
        Self::new(level)
    }

    /// Zero the counter without touching the level
    pub fn reset_counter(&self) -> Self {
        Self {
            frame_counter: 0,
            ..*self
        }
    }
}
