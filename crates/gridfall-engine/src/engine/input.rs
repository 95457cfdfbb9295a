use crate::core::Direction;

/// How long a held direction waits before re-firing.
const DIRECTION_REPEAT_MS: u64 = 100;
/// Held rotate/hard-drop re-trigger interval (twice the direction delay).
const RETRIGGER_FACTOR: u64 = 2;

/// Raw device state sampled once per frame, before any game mutation.
///
/// The input collaborator fills this from whatever it polls (keyboard,
/// gamepad); the interpreter turns it into debounced [`InputIntent`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldInput {
    pub direction: Option<Direction>,
    pub rotate: bool,
    pub hard_drop: bool,
    pub reset: bool,
    pub quit: bool,
}

/// The debounced intents actually applied on one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub direction: Option<Direction>,
    pub rotate: bool,
    pub hard_drop: bool,
    pub reset: bool,
    pub quit: bool,
}

/// Edge-triggered button with a re-trigger interval while held.
#[derive(Debug, Clone, Copy, Default)]
struct EdgeTrigger {
    prev_held: bool,
    fired_at: u64,
}

impl EdgeTrigger {
    fn fire(&mut self, held: bool, frame: u64, retrigger_frames: u64) -> bool {
        if self.prev_held != held || frame.saturating_sub(self.fired_at) > retrigger_frames {
            self.prev_held = held;
            self.fired_at = frame;
            held
        } else {
            false
        }
    }
}

/// Turns per-frame [`HeldInput`] snapshots into debounced [`InputIntent`]s.
///
/// All repeat/debounce state lives in explicit fields and is counted in
/// frames from the configured rate, so interpretation is deterministic. A
/// newly pressed direction fires immediately and then repeats every 100 ms
/// while held; rotate and hard drop fire on press and re-trigger every
/// 200 ms while held; reset and quit pass straight through.
#[derive(Debug, Clone)]
pub struct InputInterpreter {
    repeat_frames: u64,
    frame: u64,
    prev_direction: Option<Direction>,
    direction_fired_at: u64,
    rotate: EdgeTrigger,
    hard_drop: EdgeTrigger,
}

impl InputInterpreter {
    #[must_use]
    pub fn new(fps: u64) -> Self {
        assert!(fps > 0, "interpreter frame rate must be positive");
        Self {
            repeat_frames: (DIRECTION_REPEAT_MS * fps / 1000).max(1),
            frame: 0,
            prev_direction: None,
            direction_fired_at: 0,
            rotate: EdgeTrigger::default(),
            hard_drop: EdgeTrigger::default(),
        }
    }

    /// Interprets one frame's sampled input. Call exactly once per frame.
    pub fn interpret(&mut self, held: HeldInput) -> InputIntent {
        self.frame += 1;
        let retrigger_frames = self.repeat_frames * RETRIGGER_FACTOR;
        InputIntent {
            direction: self.fire_direction(held.direction),
            rotate: self.rotate.fire(held.rotate, self.frame, retrigger_frames),
            hard_drop: self
                .hard_drop
                .fire(held.hard_drop, self.frame, retrigger_frames),
            reset: held.reset,
            quit: held.quit,
        }
    }

    fn fire_direction(&mut self, held: Option<Direction>) -> Option<Direction> {
        if held.is_some() && held == self.prev_direction {
            if self.frame - self.direction_fired_at > self.repeat_frames {
                self.direction_fired_at = self.frame;
                held
            } else {
                None
            }
        } else {
            self.prev_direction = held;
            self.direction_fired_at = self.frame;
            held
        }
    }

    /// Clears all timers and latches (session reset / state transitions).
    pub fn reset(&mut self) {
        self.frame = 0;
        self.prev_direction = None;
        self.direction_fired_at = 0;
        self.rotate = EdgeTrigger::default();
        self.hard_drop = EdgeTrigger::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FPS: u64 = 100;

    fn held_left() -> HeldInput {
        HeldInput {
            direction: Some(Direction::Left),
            ..HeldInput::default()
        }
    }

    #[test]
    fn test_direction_fires_on_press_then_waits_for_repeat() {
        let mut interp = InputInterpreter::new(FPS);
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));

        // Held: suppressed until the 100 ms repeat delay has fully passed.
        for _ in 0..10 {
            assert_eq!(interp.interpret(held_left()).direction, None);
        }
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));
        // And suppressed again right after re-firing.
        assert_eq!(interp.interpret(held_left()).direction, None);
    }

    #[test]
    fn test_changing_direction_fires_immediately() {
        let mut interp = InputInterpreter::new(FPS);
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));
        let right = HeldInput {
            direction: Some(Direction::Right),
            ..HeldInput::default()
        };
        assert_eq!(interp.interpret(right).direction, Some(Direction::Right));
    }

    #[test]
    fn test_releasing_direction_rearms_it() {
        let mut interp = InputInterpreter::new(FPS);
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));
        assert_eq!(interp.interpret(HeldInput::default()).direction, None);
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));
    }

    #[test]
    fn test_rotate_is_edge_triggered_with_retrigger() {
        let mut interp = InputInterpreter::new(FPS);
        let rotate = HeldInput {
            rotate: true,
            ..HeldInput::default()
        };
        assert!(interp.interpret(rotate).rotate);
        // Held: suppressed for the 200 ms re-trigger window.
        for _ in 0..20 {
            assert!(!interp.interpret(rotate).rotate);
        }
        assert!(interp.interpret(rotate).rotate);
    }

    #[test]
    fn test_rotate_release_and_press_fires_again_at_once() {
        let mut interp = InputInterpreter::new(FPS);
        let rotate = HeldInput {
            rotate: true,
            ..HeldInput::default()
        };
        assert!(interp.interpret(rotate).rotate);
        assert!(!interp.interpret(HeldInput::default()).rotate);
        assert!(interp.interpret(rotate).rotate);
    }

    #[test]
    fn test_reset_and_quit_pass_through() {
        let mut interp = InputInterpreter::new(FPS);
        let held = HeldInput {
            reset: true,
            quit: true,
            ..HeldInput::default()
        };
        let intent = interp.interpret(held);
        assert!(intent.reset);
        assert!(intent.quit);
        // No debounce: they fire every frame they are held.
        let intent = interp.interpret(held);
        assert!(intent.reset);
        assert!(intent.quit);
    }

    #[test]
    fn test_reset_clears_latches() {
        let mut interp = InputInterpreter::new(FPS);
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));
        assert_eq!(interp.interpret(held_left()).direction, None);

        interp.reset();
        assert_eq!(interp.interpret(held_left()).direction, Some(Direction::Left));
    }
}
