use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, KeyCode, KeyEventKind};
use gridfall_engine::{BagSeed, Direction, GameSession, HeldInput, InputInterpreter};
use ratatui::{DefaultTerminal, Frame};

use crate::view::SessionDisplay;

#[derive(Debug)]
pub(crate) struct App {
    session: GameSession,
    interpreter: InputInterpreter,
    frame_duration: Duration,
}

impl App {
    pub(crate) fn new(fps: u64, seed: Option<BagSeed>) -> Self {
        let session = match seed {
            Some(seed) => GameSession::with_seed(fps, seed),
            None => GameSession::new(fps),
        };
        Self {
            session,
            interpreter: InputInterpreter::new(fps),
            frame_duration: Duration::from_secs(1) / u32::try_from(fps.max(1)).unwrap_or(u32::MAX),
        }
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        loop {
            let deadline = Instant::now() + self.frame_duration;
            terminal.draw(|frame| self.draw(frame))?;

            let held = sample_input(deadline)?;
            let was_game_over = self.session.state().is_game_over();

            let intent = self.interpreter.interpret(held);
            if intent.quit {
                break;
            }
            self.session.apply_intent(&intent);
            self.session.increment_frame();

            // A restart invalidates the repeat timers carried from the
            // previous run.
            if was_game_over && self.session.state().is_playing() {
                self.interpreter.reset();
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        SessionDisplay::new(&self.session).draw(frame);
    }
}

/// Drains terminal events until the frame deadline and folds them into one
/// per-frame input snapshot.
///
/// Terminals report key presses (and auto-repeats) but no releases, so the
/// snapshot treats every key seen during the frame as held for that frame.
fn sample_input(deadline: Instant) -> io::Result<HeldInput> {
    let mut held = HeldInput::default();
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            break;
        }
        let Some(key) = event::read()?.as_key_event() else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Left => held.direction = Some(Direction::Left),
            KeyCode::Right => held.direction = Some(Direction::Right),
            KeyCode::Down => held.direction = Some(Direction::Down),
            KeyCode::Up | KeyCode::Char('z') => held.rotate = true,
            KeyCode::Char(' ') => held.hard_drop = true,
            KeyCode::Char('r') => held.reset = true,
            KeyCode::Char('q') | KeyCode::Esc => held.quit = true,
            _ => {}
        }
    }
    Ok(held)
}
