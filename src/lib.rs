//! Pixel Quest - a tile-based platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, entities, screens)
//! - `driver`: Fixed-timestep accumulator
//! - `game`: Host-facing wrapper that runs frames and dispatches feedback
//! - `feedback`: Sound/music/shake/particle vocabulary consumed by the host
//! - `render`: Read-only snapshot of everything worth drawing
//! - `levels`: Built-in level data
//! - `settings`: Host preferences

pub mod driver;
pub mod feedback;
pub mod game;
pub mod levels;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed tick length in milliseconds
    pub const TICK_MS: f64 = 1000.0 / SIM_HZ as f64;
    /// Default clamp on accumulated frame time (avoids catch-up storms after a stall)
    pub const MAX_BACKLOG_MS: f64 = 200.0;

    /// Tile edge length in world units
    pub const TILE: f32 = 16.0;

    /// Gravity (units/tick²) and terminal fall speed
    pub const GRAVITY: f32 = 0.55;
    pub const MAX_FALL: f32 = 8.0;

    /// Player movement
    pub const PLAYER_W: f32 = 14.0;
    pub const PLAYER_H: f32 = 22.0;
    pub const PLAYER_SPEED: f32 = 2.2;
    pub const JUMP_FORCE: f32 = -7.5;
    /// Upward speed kept when jump is released early
    pub const JUMP_CUT_SPEED: f32 = -2.0;
    pub const COYOTE_TICKS: u32 = 6;
    pub const JUMP_BUFFER_TICKS: u32 = 8;
    pub const JUMP_HOLD_TICKS: u32 = 12;
    pub const PLAYER_MAX_HEALTH: u8 = 3;
    pub const PLAYER_LIVES: u8 = 3;
    pub const INVINCIBLE_TICKS: u32 = 60;
    pub const HURT_TICKS: u32 = 15;
    pub const KNOCKBACK_X: f32 = 3.0;
    pub const KNOCKBACK_Y: f32 = -4.0;
    /// Distance below the grid that counts as falling out of the level
    pub const FALL_DEATH_MARGIN: f32 = 32.0;

    /// Stomp tuning
    pub const STOMP_BOUNCE: f32 = 0.6;
    pub const STOMP_TOLERANCE: f32 = 6.0;
    pub const STOMP_SCORE: u32 = 200;
    pub const COIN_SCORE: u32 = 100;

    /// Enemies
    pub const SLIME_SPEED: f32 = 0.5;
    pub const SLIME_PATROL: f32 = 80.0;
    pub const BAT_SPEED: f32 = 0.8;
    pub const BAT_BOB_AMPLITUDE: f32 = 20.0;
    pub const BAT_PHASE_STEP: f32 = 0.05;
    pub const BOSS_HEALTH: u8 = 5;
    pub const BOSS_IDLE_TICKS: i32 = 60;
    pub const BOSS_CHASE_TICKS: i32 = 90;
    pub const BOSS_JUMP_TICKS: i32 = 60;
    pub const BOSS_RECOVER_TICKS: i32 = 40;
    pub const BOSS_CHASE_SPEED: f32 = 1.5;
    pub const BOSS_LEAP_SPEED: f32 = 2.0;
    pub const BOSS_LEAP_FORCE: f32 = -9.0;
    /// Ticks a defeated enemy stays visible
    pub const ENEMY_DEATH_TICKS: u32 = 30;

    /// Collectible bob speed (radians/tick)
    pub const BOB_STEP: f32 = 0.06;

    /// Screen timing
    pub const DEATH_DELAY_TICKS: u32 = 60;
    pub const LEVEL_COMPLETE_DELAY_TICKS: u32 = 60;
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}
