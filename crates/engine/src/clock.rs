//! Fixed-rate frame clock
//!
//! Converts wall-clock durations into a whole number of 60 Hz logical frames.
//! Time is accumulated in `nanoseconds * FRAMES_PER_SECOND` so that a frame
//! costs exactly one second's worth of nanoseconds and no rounding error
//! builds up across calls.

use std::time::Duration;

use crate::types::FRAMES_PER_SECOND;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameClock {
    /// Scaled leftover time, always below one frame
    accumulator: u128,
    /// Upper bound on frames returned by a single `advance`
    max_catch_up: Option<u32>,
    frames_emitted: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many frames a single long stall may produce
    ///
    /// Time beyond the limit is dropped rather than carried forward.
    pub fn with_max_catch_up(max_frames: u32) -> Self {
        Self {
            max_catch_up: Some(max_frames),
            ..Self::default()
        }
    }

    /// Duration of one logical frame, truncated to whole nanoseconds
    pub fn frame_duration() -> Duration {
        Duration::from_nanos((NANOS_PER_SECOND / u128::from(FRAMES_PER_SECOND)) as u64)
    }

    /// Add `elapsed` wall time and return how many frames are now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.as_nanos() * u128::from(FRAMES_PER_SECOND);
        let due = self.accumulator / NANOS_PER_SECOND;
        self.accumulator %= NANOS_PER_SECOND;

        let due = u32::try_from(due).unwrap_or(u32::MAX);
        let frames = match self.max_catch_up {
            Some(max) => due.min(max),
            None => due,
        };
        self.frames_emitted += u64::from(frames);
        frames
    }

    /// Time left until the next frame is due
    pub fn until_next_frame(&self) -> Duration {
        let remaining = (NANOS_PER_SECOND - self.accumulator).div_ceil(u128::from(FRAMES_PER_SECOND));
        Duration::from_nanos(remaining as u64)
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Drop any partial frame, e.g. after resuming from pause
    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}
