//! Wall-clock driven game session.
//!
//! A [`Session`] glues the deterministic engine to the outside world: key
//! events go into an [`InputHandler`], elapsed time goes into a
//! [`FrameClock`], and every due frame drains the input and steps the game.
//! When a game ends with a new record, the high score is written back to the
//! [`HighScoreStore`].

use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyEvent;
use tracing::{info, trace, warn};

use crate::engine::{FrameClock, FrameInput, GameSnapshot, GameState, Replay};
use crate::highscore::HighScoreStore;
use crate::input::InputHandler;
use crate::types::{GameEvent, Status};

#[derive(Debug)]
pub struct Session<S: HighScoreStore> {
    game: GameState,
    input: InputHandler,
    clock: FrameClock,
    store: S,
    /// Last value known to be in the store
    stored_high_score: u32,
    recording: Option<Replay>,
}

impl<S: HighScoreStore> Session<S> {
    /// New session on the title screen
    ///
    /// A store that cannot be read is logged and treated as empty.
    pub fn new(store: S, seed: Option<u32>, start_level: u32) -> Self {
        let stored_high_score = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not load high score, starting from 0");
            0
        });
        let game = match seed {
            Some(seed) => GameState::with_seed(seed, start_level),
            None => GameState::new(start_level),
        };
        info!(seed = game.seed(), start_level, high_score = stored_high_score, "session created");

        Self {
            game: game.with_high_score(stored_high_score),
            input: InputHandler::new(),
            clock: FrameClock::new(),
            store,
            stored_high_score,
            recording: None,
        }
    }

    /// Record every stepped frame so the session can be replayed later
    pub fn with_recording(mut self) -> Self {
        self.recording = Some(Replay::new(self.game.seed(), self.game.level_state().start_level));
        self
    }

    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_input(mut self, input: InputHandler) -> Self {
        self.input = input;
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Feed a terminal key event into the held-key tracker
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        self.input.handle_key_event(event)
    }

    /// Run every frame that became due during `elapsed`
    pub fn advance(&mut self, elapsed: Duration) -> Result<Vec<GameEvent>> {
        let frames = self.clock.advance(elapsed);
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(self.step()?);
        }
        Ok(events)
    }

    /// Run exactly one frame, regardless of the clock
    pub fn step(&mut self) -> Result<Vec<GameEvent>> {
        let (actions, held) = self.input.drain();

        let before = self.game.status();
        let mut game = self.game.clone();
        for &action in actions.iter().filter(|a| !a.is_rotation()) {
            game = game.apply_control(action);
        }
        if before == Status::Paused && game.status() == Status::Playing {
            self.clock.reset();
        }

        let frame = game.step_frame(&actions, held)?;
        self.game = frame.state;

        if let Some(recording) = self.recording.as_mut() {
            recording.push(FrameInput::new(&actions, held));
        }

        if frame.events.contains(&GameEvent::GameOver) {
            self.persist_high_score();
        }
        if !frame.events.is_empty() {
            trace!(frame = self.game.frame(), events = frame.events.len(), "frame events");
        }

        Ok(frame.events.to_vec())
    }

    fn persist_high_score(&mut self) {
        let high_score = self.game.high_score();
        if high_score <= self.stored_high_score {
            return;
        }
        match self.store.save(high_score) {
            Ok(()) => {
                info!(high_score, previous = self.stored_high_score, "new high score saved");
                self.stored_high_score = high_score;
            }
            Err(err) => warn!(error = %err, high_score, "could not save high score"),
        }
    }

    /// Stop recording and hand back what was captured
    pub fn take_recording(&mut self) -> Option<Replay> {
        self.recording.take()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
