//! Game state module - the authoritative aggregate and its frame step
//!
//! [`GameState`] ties together the board, the active piece, the randomizer,
//! the gravity and DAS timers, scoring and levels. It is advanced one logical
//! frame at a time by [`GameState::step_frame`], which returns a brand-new
//! state plus the events of that frame. The input state is never modified, so
//! two runs fed the same seed and the same per-frame inputs produce equal
//! states at every frame.
//!
//! Status transitions:
//!
//! ```text
//! title ──start──▶ playing ◀──pause/resume──▶ paused
//!                    │
//!                    └──spawn blocked──▶ gameover ──start──▶ playing
//! ```

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use nestris_core::collision::{can_spawn, try_move, try_rotate};
use nestris_core::{
    lock_and_clear, Board, Das, Gravity, LevelState, Piece, Randomizer, Score,
};

use crate::error::EngineError;
use crate::types::{Action, GameEvent, HeldInputs, PieceKind, Status, BOARD_ROWS, GAME_OVER_FILL_ROWS};

/// Events of one frame. A frame emits at most two, so four never fills.
pub type FrameEvents = ArrayVec<GameEvent, 4>;

/// Result of one frame step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub state: GameState,
    pub events: FrameEvents,
}

/// Bottom-to-top fill shown after the game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameOverAnimation {
    rows_filled: u8,
}

impl GameOverAnimation {
    /// Visible rows covered so far, counted from the bottom
    pub fn rows_filled(&self) -> u8 {
        self.rows_filled
    }

    pub fn is_complete(&self) -> bool {
        self.rows_filled >= GAME_OVER_FILL_ROWS
    }

    fn advance(&self) -> Self {
        Self {
            rows_filled: (self.rows_filled + 1).min(GAME_OVER_FILL_ROWS),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    status: Status,
    board: Board,
    active: Option<Piece>,
    next: Option<PieceKind>,
    score: Score,
    level: LevelState,
    randomizer: Randomizer,
    das: Das,
    /// Rows removed by the most recent lock (empty if it cleared nothing)
    last_cleared_rows: ArrayVec<u8, { BOARD_ROWS as usize }>,
    animation: Option<GameOverAnimation>,
    /// Monotonic logical frame counter; frozen while paused or on the title
    frame: u64,
    /// Pieces spawned in the current game, first piece included
    pieces_spawned: u32,
}

impl GameState {
    /// Create a game on the title screen with a random seed
    pub fn new(start_level: u32) -> Self {
        Self::with_randomizer(Randomizer::from_entropy(), start_level)
    }

    /// Create a game on the title screen with a fixed seed
    pub fn with_seed(seed: u32, start_level: u32) -> Self {
        Self::with_randomizer(Randomizer::new(seed), start_level)
    }

    fn with_randomizer(randomizer: Randomizer, start_level: u32) -> Self {
        Self {
            status: Status::Title,
            board: Board::new(),
            active: None,
            next: None,
            score: Score::default(),
            level: LevelState::new(start_level),
            randomizer,
            das: Das::new(),
            last_cleared_rows: ArrayVec::new(),
            animation: None,
            frame: 0,
            pieces_spawned: 0,
        }
    }

    /// Inject a previously persisted high score
    ///
    /// The value is only ever compared against in-session totals, so a stale
    /// or bogus store value cannot hide a better score.
    pub fn with_high_score(&self, high_score: u32) -> Self {
        let mut next = self.clone();
        next.score.high_score = high_score.max(self.score.total_score);
        next
    }

    /// Replace the board, e.g. to set up a puzzle or a test scenario
    pub fn with_board(&self, board: Board) -> Self {
        Self {
            board,
            ..self.clone()
        }
    }

    /// Replace the active piece
    pub fn with_active_piece(&self, piece: Piece) -> Self {
        Self {
            active: Some(piece),
            ..self.clone()
        }
    }

    /// Replace the level state (and its gravity timer)
    pub fn with_level_state(&self, level: LevelState) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// Begin play at `start_level`
    ///
    /// Clears the board and score (keeping the high score) and makes the
    /// first two randomizer draws: the active piece and the next piece. The
    /// randomizer continues from its current state.
    pub fn start_new_game(&self, start_level: u32) -> Self {
        let (first, rng) = self.randomizer.next_piece();
        let (second, rng) = rng.next_piece();

        info!(
            seed = self.randomizer.seed(),
            start_level,
            first = first.as_str(),
            "new game"
        );

        Self {
            status: Status::Playing,
            board: Board::new(),
            active: Some(Piece::spawn(first)),
            next: Some(second),
            score: Score::with_high_score(self.score.high_score),
            level: LevelState::new(start_level),
            randomizer: rng,
            das: Das::new(),
            last_cleared_rows: ArrayVec::new(),
            animation: None,
            frame: self.frame,
            pieces_spawned: 1,
        }
    }

    fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Playing → paused; other statuses unchanged
    pub fn pause(&self) -> Self {
        match self.status {
            Status::Playing => self.with_status(Status::Paused),
            _ => self.clone(),
        }
    }

    /// Paused → playing; other statuses unchanged
    pub fn resume(&self) -> Self {
        match self.status {
            Status::Paused => self.with_status(Status::Playing),
            _ => self.clone(),
        }
    }

    pub fn toggle_pause(&self) -> Self {
        match self.status {
            Status::Playing => self.pause(),
            Status::Paused => self.resume(),
            _ => self.clone(),
        }
    }

    /// Back to the title screen; board, score and randomizer are kept
    pub fn return_to_title(&self) -> Self {
        self.with_status(Status::Title)
    }

    /// Apply a control action that the frame step leaves to its caller
    ///
    /// `Start` begins a new game at the configured start level from the title
    /// or game-over screen. Rotations are ignored here.
    pub fn apply_control(&self, action: Action) -> Self {
        match action {
            Action::Pause => self.toggle_pause(),
            Action::Start => match self.status {
                Status::Title | Status::GameOver => self.start_new_game(self.level.start_level),
                Status::Playing | Status::Paused => self.clone(),
            },
            Action::Reset => self.return_to_title(),
            Action::RotateCw | Action::RotateCcw => self.clone(),
        }
    }

    /// Advance one logical frame
    ///
    /// While playing, in order: queued rotations (all of them, FIFO), DAS
    /// shift, soft drop, gravity (fall or lock + clear + score + spawn).
    /// While the game is over, the fill animation advances one row. Title and
    /// paused states are returned unchanged.
    ///
    /// On error no part of the new state is kept; `self` is still valid.
    pub fn step_frame(&self, actions: &[Action], held: HeldInputs) -> Result<Frame, EngineError> {
        match self.status {
            Status::Playing => self.step_playing(actions, held),
            Status::GameOver => Ok(self.step_game_over()),
            Status::Title | Status::Paused => Ok(Frame {
                state: self.clone(),
                events: FrameEvents::new(),
            }),
        }
    }

    fn step_playing(&self, actions: &[Action], held: HeldInputs) -> Result<Frame, EngineError> {
        let mut next = self.clone();
        let mut events = FrameEvents::new();
        next.frame += 1;

        let mut piece = next.active.ok_or(EngineError::NoActivePiece)?;

        for &action in actions {
            let clockwise = match action {
                Action::RotateCw => true,
                Action::RotateCcw => false,
                other => {
                    trace!(action = other.as_str(), "control action left to caller");
                    continue;
                }
            };
            if let Some(rotated) = try_rotate(&next.board, &piece, clockwise) {
                piece = rotated;
            }
        }

        let das_tick = next.das.set_direction(held.direction).tick();
        next.das = das_tick.das;
        if das_tick.should_move {
            if let Some(moved) = try_move(&next.board, &piece, das_tick.direction.dx(), 0) {
                piece = moved;
            }
        }

        if held.soft_drop {
            if let Some(moved) = try_move(&next.board, &piece, 0, 1) {
                piece = moved;
                next.score = next.score.add_soft_drop_score(1);
            }
        }

        let gravity_tick = next.level.gravity.tick();
        next.level = next.level.with_gravity(gravity_tick.gravity);

        if !gravity_tick.should_fall {
            next.active = Some(piece);
            return Ok(Frame { state: next, events });
        }

        match try_move(&next.board, &piece, 0, 1) {
            Some(fallen) => {
                next.active = Some(fallen);
                events.push(GameEvent::PieceFell);
            }
            None => next.lock_and_spawn(&piece, &mut events)?,
        }

        Ok(Frame { state: next, events })
    }

    fn lock_and_spawn(&mut self, piece: &Piece, events: &mut FrameEvents) -> Result<(), EngineError> {
        let outcome = lock_and_clear(&self.board, piece)?;
        let lines = u32::from(outcome.cleared_lines);

        debug!(
            frame = self.frame,
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines,
            "piece locked"
        );
        events.push(GameEvent::PieceLocked {
            lines_cleared: outcome.cleared_lines,
        });

        self.score = self
            .score
            .add_line_clear_score(lines, self.level.current_level);

        let update = self.level.update_after_clear(lines);
        if update.leveled_up {
            debug!(
                level = update.level.current_level,
                frames_per_drop = update.level.gravity.frames_per_drop(),
                "level up"
            );
        }
        self.level = update
            .level
            .with_gravity(update.level.gravity.reset_counter());

        self.board = outcome.board;
        self.last_cleared_rows = outcome.cleared_rows;
        self.active = None;

        self.spawn_next(events)
    }

    fn spawn_next(&mut self, events: &mut FrameEvents) -> Result<(), EngineError> {
        let kind = self.next.ok_or(EngineError::NotStarted)?;

        if !can_spawn(&self.board, kind) {
            info!(
                frame = self.frame,
                score = self.score.total_score,
                lines = self.level.total_lines,
                level = self.level.current_level,
                "game over"
            );
            self.status = Status::GameOver;
            self.animation = Some(GameOverAnimation::default());
            events.push(GameEvent::GameOver);
            return Ok(());
        }

        let (drawn, rng) = self.randomizer.next_piece();
        self.active = Some(Piece::spawn(kind));
        self.next = Some(drawn);
        self.randomizer = rng;
        self.level = self.level.with_gravity(self.level.gravity.reset_counter());
        self.pieces_spawned += 1;

        trace!(kind = kind.as_str(), next = drawn.as_str(), "piece spawned");
        events.push(GameEvent::PieceSpawned);
        Ok(())
    }

    fn step_game_over(&self) -> Frame {
        let mut next = self.clone();
        let mut events = FrameEvents::new();
        next.frame += 1;

        if let Some(animation) = next.animation.filter(|a| !a.is_complete()) {
            let advanced = animation.advance();
            if advanced.is_complete() {
                events.push(GameEvent::GameOverAnimationComplete);
            }
            next.animation = Some(advanced);
        }

        Frame {
            state: next,
            events,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score.total_score
    }

    pub fn score_state(&self) -> &Score {
        &self.score
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score
    }

    pub fn level(&self) -> u32 {
        self.level.current_level
    }

    pub fn level_state(&self) -> &LevelState {
        &self.level
    }

    pub fn lines(&self) -> u32 {
        self.level.total_lines
    }

    pub fn gravity(&self) -> &Gravity {
        &self.level.gravity
    }

    pub fn das(&self) -> &Das {
        &self.das
    }

    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn last_cleared_rows(&self) -> &[u8] {
        &self.last_cleared_rows
    }

    pub fn animation(&self) -> Option<GameOverAnimation> {
        self.animation
    }

    /// True once the game-over fill has reached the top
    pub fn is_animation_complete(&self) -> bool {
        self.animation.is_some_and(|a| a.is_complete())
    }
}
