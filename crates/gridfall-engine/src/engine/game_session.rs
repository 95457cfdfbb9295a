use std::time::Duration;

use crate::{
    PieceCollisionError,
    core::{Direction, FallingPiece, Field, PieceKind},
};

use super::{
    input::InputIntent,
    piece_bag::BagSeed,
    play_field::PlayField,
};

/// Gravity interval at the start of a run.
pub const START_GRAVITY_MS: u64 = 1000;
/// How much a clearing turn shortens the gravity interval.
const GRAVITY_STEP_MS: u64 = 10;
/// Fastest gravity the difficulty ramp can reach.
const GRAVITY_FLOOR_MS: u64 = 25;

/// Overall run state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Score for a turn that cleared `cleared` rows: `cleared^2 * 100`.
///
/// Rewards simultaneous clears superlinearly: 1 row scores 100, 4 rows 1600.
#[expect(clippy::cast_possible_truncation)]
const fn turn_score(cleared: usize) -> u32 {
    (cleared * cleared * 100) as u32
}

/// A full game run: play field, score, gravity timing, and the
/// playing/game-over state machine.
///
/// The session is frame-driven: an external fixed-rate loop calls
/// [`Self::apply_intent`] and [`Self::increment_frame`] once per frame, and
/// gravity steps fire every time the current gravity interval worth of
/// frames has elapsed. Everything is synchronous and owned by that loop.
#[derive(Debug, Clone)]
pub struct GameSession {
    play_field: PlayField,
    state: SessionState,
    score: u32,
    gravity_ms: u64,
    fps: u64,
    total_frames: u64,
    gravity_frames: u64,
}

fn gravity_frames(gravity_ms: u64, fps: u64) -> u64 {
    (gravity_ms * fps / 1000).max(1)
}

impl GameSession {
    #[must_use]
    pub fn new(fps: u64) -> Self {
        Self::with_play_field(fps, PlayField::new())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(fps: u64, seed: BagSeed) -> Self {
        Self::with_play_field(fps, PlayField::with_seed(seed))
    }

    fn with_play_field(fps: u64, play_field: PlayField) -> Self {
        assert!(fps > 0, "session frame rate must be positive");
        Self {
            play_field,
            state: SessionState::Playing,
            score: 0,
            gravity_ms: START_GRAVITY_MS,
            fps,
            total_frames: 0,
            gravity_frames: gravity_frames(START_GRAVITY_MS, fps),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current gravity interval.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_ms)
    }

    /// Elapsed game clock, derived from the frame count.
    #[must_use]
    pub fn duration(&self) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let secs = self.total_frames / self.fps;
        let nanos = (self.total_frames % self.fps) * NANOS_PER_SEC / self.fps;
        Duration::new(secs, nanos.try_into().unwrap())
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        self.play_field.field()
    }

    #[must_use]
    pub fn falling_piece(&self) -> &FallingPiece {
        self.play_field.falling_piece()
    }

    /// Read-only hard-drop projection for rendering.
    #[must_use]
    pub fn ghost_piece(&self) -> FallingPiece {
        self.play_field.drop_position()
    }

    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.play_field.next_kind()
    }

    pub fn try_shift(&mut self, direction: Direction) -> Result<(), PieceCollisionError> {
        self.play_field.try_shift(direction)
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.play_field.try_rotate()
    }

    /// Drops the falling piece to rest and completes the turn immediately,
    /// without waiting for the next gravity frame.
    pub fn hard_drop_and_complete(&mut self) {
        while self.play_field.try_shift(Direction::Down).is_ok() {}
        self.complete_turn();
        self.gravity_frames = gravity_frames(self.gravity_ms, self.fps);
    }

    /// Applies one frame's debounced input.
    ///
    /// While playing, up is accepted from the interpreter but deliberately
    /// ignored; reset only acts from the game-over state, where all other
    /// gameplay intents are ignored. Quit is the caller's concern.
    pub fn apply_intent(&mut self, intent: &InputIntent) {
        match self.state {
            SessionState::Playing => {
                if let Some(direction @ (Direction::Left | Direction::Right | Direction::Down)) =
                    intent.direction
                {
                    _ = self.try_shift(direction);
                }
                if intent.rotate {
                    _ = self.try_rotate();
                }
                if intent.hard_drop {
                    self.hard_drop_and_complete();
                }
            }
            SessionState::GameOver => {
                if intent.reset {
                    self.reset();
                }
            }
        }
    }

    /// Advances the frame clock, firing a gravity step when due.
    ///
    /// A blocked gravity step ends the turn; a top-out flips the session to
    /// game over, after which frames no longer advance the clock.
    pub fn increment_frame(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.total_frames += 1;
        self.gravity_frames = self.gravity_frames.saturating_sub(1);
        if self.gravity_frames == 0 {
            self.gravity_frames = gravity_frames(self.gravity_ms, self.fps);
            if self.play_field.try_shift(Direction::Down).is_err() {
                self.complete_turn();
            }
        }
    }

    fn complete_turn(&mut self) {
        let (cleared, result) = self.play_field.complete_turn();
        if result.is_err() {
            self.state = SessionState::GameOver;
            return;
        }
        self.score += turn_score(cleared);
        // Only turns that cleared something speed the game up.
        if cleared > 0 {
            self.gravity_ms = self
                .gravity_ms
                .saturating_sub(GRAVITY_STEP_MS)
                .max(GRAVITY_FLOOR_MS);
        }
    }

    /// Starts the run over: empty field, zero score, starting gravity, fresh
    /// piece, back to playing.
    pub fn reset(&mut self) {
        self.play_field.reset();
        self.score = 0;
        self.total_frames = 0;
        self.gravity_ms = START_GRAVITY_MS;
        self.gravity_frames = gravity_frames(START_GRAVITY_MS, self.fps);
        self.state = SessionState::Playing;
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        self.play_field.field_mut()
    }
}
