//! Held-key tracker and action queue.
//!
//! Between frames, key presses and releases are folded into a small amount
//! of state: which horizontal direction is held, whether soft drop is held,
//! and a FIFO queue of discrete actions. Once per frame the game loop calls
//! [`InputHandler::drain`] to take the queued actions and sample the held
//! inputs.
//!
//! When both left and right are held, the most recently pressed one wins;
//! releasing it falls back to the other.
//!
//! Terminals that never report key releases can enable a frame-counted
//! auto release so that a single tap does not turn into a permanent hold.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::debug;

use crate::map::{map_key, Key};
use crate::types::{Action, Direction, HeldInputs};

/// Maximum actions buffered between two frames; extra presses are dropped
pub const ACTION_QUEUE_CAPACITY: usize = 16;

pub type ActionQueue = ArrayVec<Action, ACTION_QUEUE_CAPACITY>;

#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    left_held: bool,
    right_held: bool,
    /// Most recently pressed horizontal key still held
    last_horizontal: Direction,
    soft_drop_held: bool,
    queue: ActionQueue,
    /// Presses lost to a full queue since the handler was created
    dropped_actions: u64,
    /// Release held keys after this many frames without a key event
    auto_release_frames: Option<u32>,
    frames_since_event: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_release_frames(mut self, frames: u32) -> Self {
        self.auto_release_frames = Some(frames);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.frames_since_event = 0;
        match key {
            Key::Left => {
                self.left_held = true;
                self.last_horizontal = Direction::Left;
            }
            Key::Right => {
                self.right_held = true;
                self.last_horizontal = Direction::Right;
            }
            Key::SoftDrop => self.soft_drop_held = true,
            other => {
                if let Some(action) = other.action() {
                    if self.queue.try_push(action).is_err() {
                        self.dropped_actions += 1;
                        debug!(
                            action = ?action,
                            dropped = self.dropped_actions,
                            "action queue full, dropping press"
                        );
                    }
                }
            }
        }
    }

    pub fn release(&mut self, key: Key) {
        self.frames_since_event = 0;
        match key {
            Key::Left => {
                self.left_held = false;
                if self.last_horizontal == Direction::Left {
                    self.last_horizontal = if self.right_held { Direction::Right } else { Direction::None };
                }
            }
            Key::Right => {
                self.right_held = false;
                if self.last_horizontal == Direction::Right {
                    self.last_horizontal = if self.left_held { Direction::Left } else { Direction::None };
                }
            }
            Key::SoftDrop => self.soft_drop_held = false,
            _ => {}
        }
    }

    /// Release every held key; queued actions are kept
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
        self.last_horizontal = Direction::None;
        self.soft_drop_held = false;
    }

    /// Feed a raw terminal event; returns false for keys the game ignores
    ///
    /// Auto-repeat events refresh the auto-release timer but never queue a
    /// second action.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        let Some(key) = map_key(event.code) else {
            return false;
        };
        match event.kind {
            KeyEventKind::Press => self.press(key),
            KeyEventKind::Release => self.release(key),
            KeyEventKind::Repeat => self.frames_since_event = 0,
        }
        true
    }

    pub fn dropped_actions(&self) -> u64 {
        self.dropped_actions
    }

    /// Current horizontal direction after last-pressed-wins resolution
    pub fn direction(&self) -> Direction {
        self.last_horizontal
    }

    pub fn held(&self) -> HeldInputs {
        HeldInputs {
            direction: self.direction(),
            soft_drop: self.soft_drop_held,
        }
    }

    pub fn pending(&self) -> &[Action] {
        &self.queue
    }

    /// Take every queued action (oldest first) and sample the held inputs
    ///
    /// Call exactly once per logical frame.
    pub fn drain(&mut self) -> (ActionQueue, HeldInputs) {
        let actions = std::mem::take(&mut self.queue);
        let held = self.held();

        if let Some(limit) = self.auto_release_frames {
            self.frames_since_event = self.frames_since_event.saturating_add(1);
            if self.frames_since_event > limit {
                self.release_all();
            }
        }

        (actions, held)
    }
}
