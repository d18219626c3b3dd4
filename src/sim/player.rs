//! The player character
//!
//! Jumping combines three independent checks: coyote time (recently
//! grounded), jump buffering (recently pressed) and the release gate (jump
//! let go since the last jump). All three must hold on the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Axis, Body};
use super::collision::resolve_axis;
use super::events::GameEvent;
use super::tick::TickInput;
use super::tile::TileGrid;
use crate::consts::*;

/// Animation state, derived from physics every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAnim {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Hurt,
}

/// Horizontal speed above which a grounded player counts as running
const RUN_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: u8,
    pub max_health: u8,
    pub lives: u8,
    /// Coins picked up during the current attempt
    pub coins: u32,
    /// Score earned during the current attempt
    pub score: u32,
    pub has_key: bool,
    pub dead: bool,

    pub coyote_ticks: u32,
    pub jump_buffer_ticks: u32,
    pub jump_hold_ticks: u32,
    pub invincible_ticks: u32,
    pub hurt_ticks: u32,
    /// Jump control was released since the last jump fired
    pub jump_released: bool,

    pub anim: PlayerAnim,
    pub anim_frame: u32,
    anim_timer: u32,

    pub spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_W, PLAYER_H)),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            lives: PLAYER_LIVES,
            coins: 0,
            score: 0,
            has_key: false,
            dead: false,
            coyote_ticks: 0,
            jump_buffer_ticks: 0,
            jump_hold_ticks: 0,
            invincible_ticks: 0,
            hurt_ticks: 0,
            jump_released: true,
            anim: PlayerAnim::Idle,
            anim_frame: 0,
            anim_timer: 0,
            spawn,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, input: &TickInput, grid: &TileGrid, events: &mut Vec<GameEvent>) {
        if self.dead {
            return;
        }

        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.hurt_ticks = self.hurt_ticks.saturating_sub(1);

        // Horizontal intent, ignored while stunned
        let move_x = if self.hurt_ticks > 0 { 0.0 } else { input.horizontal() };
        self.body.vel.x = move_x * PLAYER_SPEED;
        if move_x != 0.0 {
            self.body.facing = move_x;
        }

        if self.body.on_ground {
            self.coyote_ticks = COYOTE_TICKS;
        } else {
            self.coyote_ticks = self.coyote_ticks.saturating_sub(1);
        }

        if input.jump_pressed {
            self.jump_buffer_ticks = JUMP_BUFFER_TICKS;
        } else {
            self.jump_buffer_ticks = self.jump_buffer_ticks.saturating_sub(1);
        }

        // A fresh press implies the key went up in between
        if !input.jump_held || input.jump_pressed {
            self.jump_released = true;
        }

        if self.jump_buffer_ticks > 0 && self.coyote_ticks > 0 && self.jump_released {
            self.body.vel.y = JUMP_FORCE;
            self.coyote_ticks = 0;
            self.jump_buffer_ticks = 0;
            self.body.on_ground = false;
            self.jump_hold_ticks = JUMP_HOLD_TICKS;
            self.jump_released = false;
            events.push(GameEvent::Jump {
                pos: Vec2::new(self.body.center().x, self.body.pos.y + self.body.size.y),
            });
        }

        // Variable jump height
        if self.jump_hold_ticks > 0 {
            if input.jump_held {
                self.jump_hold_ticks -= 1;
            } else {
                self.jump_hold_ticks = 0;
                self.body.vel.y = self.body.vel.y.max(JUMP_CUT_SPEED);
            }
        }

        self.body.apply_gravity();

        self.body.on_ground = false;
        self.body.pos.x += self.body.vel.x;
        let hit_x = resolve_axis(&mut self.body, grid, Axis::X, true);
        if hit_x.hazard {
            self.hurt(events);
        }
        self.body.pos.y += self.body.vel.y;
        let hit_y = resolve_axis(&mut self.body, grid, Axis::Y, true);
        if hit_y.hazard {
            self.hurt(events);
        }

        if self.body.pos.y > grid.pixel_height() + FALL_DEATH_MARGIN {
            self.die(events);
        }

        self.update_anim();
    }

    fn update_anim(&mut self) {
        self.anim = if self.hurt_ticks > 0 {
            PlayerAnim::Hurt
        } else if !self.body.on_ground {
            if self.body.vel.y < 0.0 {
                PlayerAnim::Jump
            } else {
                PlayerAnim::Fall
            }
        } else if self.body.vel.x.abs() > RUN_THRESHOLD {
            PlayerAnim::Run
        } else {
            PlayerAnim::Idle
        };

        self.anim_timer += 1;
        let period = if self.anim == PlayerAnim::Run { 8 } else { 20 };
        if self.anim_timer >= period {
            self.anim_timer = 0;
            self.anim_frame = self.anim_frame.wrapping_add(1);
        }
    }

    /// Take one point of damage unless invincible or already dead
    pub fn hurt(&mut self, events: &mut Vec<GameEvent>) {
        if self.invincible_ticks > 0 || self.dead {
            return;
        }
        self.health = self.health.saturating_sub(1);
        self.invincible_ticks = INVINCIBLE_TICKS;
        self.hurt_ticks = HURT_TICKS;
        self.body.vel.y = KNOCKBACK_Y;
        self.body.vel.x = -self.body.facing * KNOCKBACK_X;
        events.push(GameEvent::PlayerHurt { pos: self.body.center() });
        events.push(GameEvent::ScreenShake { magnitude: 3.0, duration: 10 });

        if self.health == 0 {
            self.die(events);
        }
    }

    /// Enter the terminal dead state (until `respawn`)
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        if self.dead {
            return;
        }
        self.dead = true;
        events.push(GameEvent::PlayerDied { pos: self.body.center() });
        events.push(GameEvent::ScreenShake { magnitude: 5.0, duration: 15 });
        log::debug!("Player died at {:?}", self.body.pos);
    }

    /// Return to the spawn point with full health and a short grace window
    pub fn respawn(&mut self) {
        self.body.pos = self.spawn;
        self.body.vel = Vec2::ZERO;
        self.body.on_ground = false;
        self.health = self.max_health;
        self.dead = false;
        self.invincible_ticks = INVINCIBLE_TICKS;
        self.hurt_ticks = 0;
        self.coyote_ticks = 0;
        self.jump_buffer_ticks = 0;
        self.jump_hold_ticks = 0;
        self.has_key = false;
        self.anim = PlayerAnim::Idle;
    }

    /// Flicker while invincible: hidden on alternating 3-tick windows
    pub fn is_visible(&self) -> bool {
        !self.dead && (self.invincible_ticks == 0 || (self.invincible_ticks / 3) % 2 != 0)
    }
}
