//! Fixed timestep simulation tick
//!
//! One call advances the active screen by exactly one step.

use super::events::{GameEvent, MusicCue};
use super::interact::{InteractionOutcome, interact};
use super::state::{GameState, Screen};
use crate::consts::{DEATH_DELAY_TICKS, LEVEL_COMPLETE_DELAY_TICKS};

/// Input for a single tick.
///
/// Held flags mirror the current key state. `*_pressed` flags are edges:
/// true only on the first tick after the press, cleared by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,
    /// Enter / Space on menus
    pub confirm_pressed: bool,
    /// Escape: pause toggle
    pub cancel_pressed: bool,
}

impl TickInput {
    /// -1, 0 or 1. Right wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }

    /// Drop one-shot edges once a tick has consumed them
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.up_pressed = false;
        self.down_pressed = false;
        self.confirm_pressed = false;
        self.cancel_pressed = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    state.screen_ticks = state.screen_ticks.saturating_add(1);

    match state.screen {
        Screen::Title => {
            if input.confirm_pressed {
                state.selected_level = 0;
                state.set_screen(Screen::LevelSelect);
                state.emit(GameEvent::MenuSelect);
            }
        }
        Screen::LevelSelect => tick_level_select(state, input),
        Screen::Playing => {
            if input.cancel_pressed {
                state.set_screen(Screen::Paused);
                state.emit(GameEvent::Music(MusicCue::Stop));
                return;
            }
            tick_playing(state, input);
        }
        Screen::Paused => {
            if input.cancel_pressed {
                state.set_screen(Screen::Playing);
                state.emit(GameEvent::Music(MusicCue::Start));
            } else if input.confirm_pressed {
                state.set_screen(Screen::Title);
                state.emit(GameEvent::Music(MusicCue::Stop));
            }
        }
        Screen::LevelComplete => {
            if state.screen_ticks > LEVEL_COMPLETE_DELAY_TICKS && input.confirm_pressed {
                if state.is_last_level() {
                    state.set_screen(Screen::Title);
                } else {
                    let next = state.current_level + 1;
                    state.load_level(next);
                    state.set_screen(Screen::Playing);
                    state.emit(GameEvent::Music(MusicCue::Start));
                }
            }
        }
        Screen::GameOver => {
            if input.confirm_pressed {
                state.set_screen(Screen::Title);
            }
        }
    }
}

fn tick_level_select(state: &mut GameState, input: &TickInput) {
    let count = state.levels.len();
    if input.up_pressed {
        state.selected_level = (state.selected_level + count - 1) % count;
        state.emit(GameEvent::MenuSelect);
    }
    if input.down_pressed {
        state.selected_level = (state.selected_level + 1) % count;
        state.emit(GameEvent::MenuSelect);
    }
    if input.confirm_pressed {
        state.emit(GameEvent::MenuSelect);
        state.start_game(state.selected_level);
    }
}

/// What the death countdown decided this tick
enum DeathStep {
    Waiting,
    Respawn,
    OutOfLives,
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    let Some(player) = state.player.as_mut() else {
        log::warn!("Playing screen without a player, returning to title");
        state.set_screen(Screen::Title);
        return;
    };

    if player.dead {
        state.death_delay += 1;
        let step = if state.death_delay <= DEATH_DELAY_TICKS {
            DeathStep::Waiting
        } else {
            player.lives = player.lives.saturating_sub(1);
            if player.lives == 0 {
                DeathStep::OutOfLives
            } else {
                player.respawn();
                DeathStep::Respawn
            }
        };
        match step {
            DeathStep::Waiting => {}
            DeathStep::Respawn => {
                log::info!("Respawning, {} lives left", player.lives);
                state.load_level(state.current_level);
            }
            DeathStep::OutOfLives => {
                log::info!("Game over with run score {}", state.run_score());
                state.set_screen(Screen::GameOver);
                state.emit(GameEvent::Music(MusicCue::Stop));
            }
        }
        return;
    }
    state.death_delay = 0;

    let grid = &state.levels[state.current_level].grid;
    let events = &mut state.events;

    player.update(input, grid, events);
    for enemy in &mut state.enemies {
        enemy.update(grid, player, events);
    }
    for item in &mut state.collectibles {
        item.update();
    }
    state.enemies.retain(|e| !e.is_gone());

    let outcome = interact(player, &mut state.enemies, &mut state.collectibles, grid, events);
    if outcome == InteractionOutcome::ExitReached {
        state.complete_level();
    }
}
