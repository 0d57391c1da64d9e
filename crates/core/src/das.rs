//! DAS (delayed auto shift) timer
//!
//! Holding a direction produces an immediate shift, then nothing for
//! `DAS_DELAY_FRAMES`, then one shift every `DAS_REPEAT_FRAMES`. For a
//! direction held from a neutral state the moving ticks are at frame offsets
//! 0, 16, 22, 28, ...
//!
//! The timer only decides *when* to shift. Whether the shift succeeds is up to
//! the caller's collision check; a blocked shift does not pause the timer.

use crate::types::{Direction, DAS_DELAY_FRAMES, DAS_REPEAT_FRAMES};

/// Counter value right after the activation tick
const ACTIVE_BASE: u32 = DAS_DELAY_FRAMES + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Das {
    direction: Direction,
    counter: u32,
    active: bool,
}

/// Result of [`Das::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DasTick {
    pub should_move: bool,
    pub direction: Direction,
    pub das: Das,
}

impl Das {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Update the held direction
    ///
    /// A different direction restarts the timing; the same direction leaves the
    /// state untouched, so re-pressing does not restart the delay.
    pub fn set_direction(&self, direction: Direction) -> Self {
        if direction == self.direction {
            *self
        } else {
            Self {
                direction,
                counter: 0,
                active: false,
            }
        }
    }

    /// Advance one frame
    pub fn tick(&self) -> DasTick {
        let direction = self.direction;

        if direction == Direction::None {
            return DasTick {
                should_move: false,
                direction,
                das: Self::new(),
            };
        }

        // First tick after a direction is set: immediate shift.
        if self.counter == 0 {
            return DasTick {
                should_move: true,
                direction,
                das: Self {
                    direction,
                    counter: 1,
                    active: false,
                },
            };
        }

        let counter = self.counter + 1;

        if !self.active {
            let activates = counter > DAS_DELAY_FRAMES;
            return DasTick {
                should_move: activates,
                direction,
                das: Self {
                    direction,
                    counter,
                    active: activates,
                },
            };
        }

        // Active: the counter cycles through ACTIVE_BASE..ACTIVE_BASE + REPEAT.
        if counter - ACTIVE_BASE >= DAS_REPEAT_FRAMES {
            DasTick {
                should_move: true,
                direction,
                das: Self {
                    direction,
                    counter: ACTIVE_BASE,
                    active: true,
                },
            }
        } else {
            DasTick {
                should_move: false,
                direction,
                das: Self {
                    direction,
                    counter,
                    active: true,
                },
            }
        }
    }

    /// Non-moving ticks left before the next shift, or None when no direction
    /// is held
    pub fn frames_until_next_move(&self) -> Option<u32> {
        match (self.direction, self.counter, self.active) {
            (Direction::None, _, _) => None,
            (_, 0, _) => Some(0),
            (_, c, false) => Some(DAS_DELAY_FRAMES.saturating_sub(c)),
            (_, c, true) => Some((ACTIVE_BASE + DAS_REPEAT_FRAMES - 1).saturating_sub(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_frames(direction: Direction, frames: u32) -> Vec<u32> {
        let mut das = Das::new();
        let mut moves = Vec::new();
        for frame in 0..frames {
            das = das.set_direction(direction);
            let tick = das.tick();
            if tick.should_move {
                moves.push(frame);
            }
            das = tick.das;
        }
        moves
    }

    #[test]
    fn test_cadence_over_sixty_frames() {
        assert_eq!(
            moving_frames(Direction::Left, 60),
            vec![0, 16, 22, 28, 34, 40, 46, 52, 58]
        );
    }

    #[test]
    fn test_activation_edge() {
        let mut das = Das::new().set_direction(Direction::Right);
        for _ in 0..16 {
            das = das.tick().das;
            assert!(!das.is_active());
        }
        let tick = das.tick();
        assert!(tick.should_move);
        assert!(tick.das.is_active());
    }

    #[test]
    fn test_no_direction_never_moves() {
        assert!(moving_frames(Direction::None, 100).is_empty());
    }

    #[test]
    fn test_same_direction_keeps_timing() {
        let mut das = Das::new().set_direction(Direction::Left);
        for _ in 0..10 {
            das = das.tick().das;
        }
        let again = das.set_direction(Direction::Left);
        assert_eq!(again, das);
        assert_eq!(again.counter(), 10);
    }

    #[test]
    fn test_direction_change_restarts() {
        let mut das = Das::new().set_direction(Direction::Left);
        for _ in 0..30 {
            das = das.tick().das;
        }
        assert!(das.is_active());

        let flipped = das.set_direction(Direction::Right);
        assert_eq!(flipped.counter(), 0);
        assert!(!flipped.is_active());

        let tick = flipped.tick();
        assert!(tick.should_move);
        assert_eq!(tick.direction, Direction::Right);
    }

    #[test]
    fn test_release_resets() {
        let mut das = Das::new().set_direction(Direction::Left);
        for _ in 0..20 {
            das = das.tick().das;
        }
        let released = das.set_direction(Direction::None).tick();
        assert!(!released.should_move);
        assert_eq!(released.das, Das::new());
    }

    #[test]
    fn test_frames_until_next_move_agrees_with_ticks() {
        let mut das = Das::new().set_direction(Direction::Right);
        for _ in 0..80 {
            let predicted = das.frames_until_next_move().unwrap();
            let mut ahead = das;
            let mut idle = 0;
            loop {
                let tick = ahead.tick();
                if tick.should_move {
                    break;
                }
                idle += 1;
                ahead = tick.das;
            }
            assert_eq!(predicted, idle);
            das = das.tick().das;
        }
    }
}
