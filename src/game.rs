//! Host-facing game wrapper
//!
//! Owns the simulation state, the frame clock and the input latch. The host
//! forwards key transitions, calls `frame` once per display refresh and
//! draws the returned snapshot.

use crate::driver::FixedTimestep;
use crate::feedback::{self, Feedback};
use crate::levels;
use crate::render::{self, RenderSnapshot, SpriteTable};
use crate::settings::Settings;
use crate::sim::{GameState, Level, LevelError, TickInput, tick};

/// Logical keys (arrows/WASD, Space, Enter, Escape on a keyboard)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Jumps in play and confirms on menus
    Jump,
    Confirm,
    Cancel,
}

impl Key {
    const COUNT: usize = 7;
}

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    clock: FixedTimestep,
    input: TickInput,
    held: [bool; Key::COUNT],
    sprites: SpriteTable,
}

impl Game {
    pub fn new(levels: Vec<Level>, settings: Settings) -> Result<Self, LevelError> {
        let state = GameState::new(levels, settings.seed)?;
        log::info!(
            "Game ready: {} levels, seed {}",
            state.levels.len(),
            settings.seed
        );
        Ok(Self {
            state,
            clock: FixedTimestep::new(settings.max_backlog_ms),
            settings,
            input: TickInput::default(),
            held: [false; Key::COUNT],
            sprites: SpriteTable::new(),
        })
    }

    pub fn with_builtin_levels(settings: Settings) -> Result<Self, LevelError> {
        Self::new(levels::builtin_levels()?, settings)
    }

    /// Key went down. Auto-repeat (down while already held) is not a new press.
    pub fn key_down(&mut self, key: Key) {
        let was_held = std::mem::replace(&mut self.held[key as usize], true);
        let edge = !was_held;
        let input = &mut self.input;
        match key {
            Key::Left => input.left = true,
            Key::Right => input.right = true,
            Key::Up => input.up_pressed |= edge,
            Key::Down => input.down_pressed |= edge,
            Key::Jump => {
                input.jump_held = true;
                input.jump_pressed |= edge;
                input.confirm_pressed |= edge;
            }
            Key::Confirm => input.confirm_pressed |= edge,
            Key::Cancel => input.cancel_pressed |= edge,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key as usize] = false;
        match key {
            Key::Left => self.input.left = false,
            Key::Right => self.input.right = false,
            Key::Jump => self.input.jump_held = false,
            _ => {}
        }
    }

    /// Advance by wall-clock time and forward feedback. Returns ticks run.
    pub fn frame(&mut self, timestamp_ms: f64, sink: &mut dyn Feedback) -> u32 {
        let ticks = self.clock.advance(timestamp_ms);
        for _ in 0..ticks {
            self.run_tick();
        }
        self.flush(sink);
        ticks
    }

    /// Run exactly one tick regardless of the clock
    pub fn step(&mut self, sink: &mut dyn Feedback) {
        self.run_tick();
        self.flush(sink);
    }

    fn run_tick(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.clear_edges();
    }

    fn flush(&mut self, sink: &mut dyn Feedback) {
        let events = self.state.drain_events();
        feedback::dispatch(&events, sink, &self.settings);
    }

    /// Host was suspended; don't try to catch up on the gap
    pub fn resume(&mut self) {
        self.clock.reset();
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        render::snapshot(&self.state, &self.sprites)
    }
}
