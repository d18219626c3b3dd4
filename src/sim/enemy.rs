//! Enemies: patrolling slimes, bobbing bats and the boss
//!
//! Slimes and bats steer with cheap tile probes; only the boss goes through
//! full axis collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Axis, Body};
use super::collision::resolve_axis;
use super::events::GameEvent;
use super::player::Player;
use super::tile::{TileGrid, cell};
use crate::consts::*;

/// Boss behaviour cycle: idle -> chase -> jump -> idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Idle,
    Chase,
    Jump,
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime {
        /// Distance walked since the last turn
        patrolled: f32,
    },
    Bat {
        base_y: f32,
        phase: f32,
    },
    Boss {
        phase: BossPhase,
        timer: i32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: u8,
    pub max_health: u8,
    pub alive: bool,
    /// Ticks left in the death animation once defeated
    pub death_ticks: u32,
    pub anim_frame: u32,
    anim_timer: u32,
}

impl Enemy {
    fn with_kind(pos: Vec2, size: Vec2, kind: EnemyKind, health: u8) -> Self {
        Self {
            body: Body::new(pos, size),
            kind,
            health,
            max_health: health,
            alive: true,
            death_ticks: 0,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn slime(pos: Vec2) -> Self {
        let mut enemy = Self::with_kind(
            pos,
            Vec2::new(14.0, 12.0),
            EnemyKind::Slime { patrolled: 0.0 },
            1,
        );
        enemy.body.vel.x = SLIME_SPEED;
        enemy
    }

    /// `phase` offsets the bob so bats spawned together do not move in sync
    pub fn bat(pos: Vec2, phase: f32) -> Self {
        let mut enemy = Self::with_kind(
            pos,
            Vec2::new(14.0, 12.0),
            EnemyKind::Bat { base_y: pos.y, phase },
            1,
        );
        enemy.body.vel.x = BAT_SPEED;
        enemy
    }

    pub fn boss(pos: Vec2) -> Self {
        Self::with_kind(
            pos,
            Vec2::new(20.0, 22.0),
            EnemyKind::Boss {
                phase: BossPhase::Idle,
                timer: BOSS_IDLE_TICKS,
            },
            BOSS_HEALTH,
        )
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss { .. })
    }

    /// Defeated and finished playing its death animation
    pub fn is_gone(&self) -> bool {
        !self.alive && self.death_ticks == 0
    }

    /// Advance one tick
    pub fn update(&mut self, grid: &TileGrid, player: &Player, events: &mut Vec<GameEvent>) {
        if !self.alive {
            self.death_ticks = self.death_ticks.saturating_sub(1);
            return;
        }

        self.anim_timer += 1;
        if self.anim_timer >= 12 {
            self.anim_timer = 0;
            self.anim_frame = self.anim_frame.wrapping_add(1);
        }

        match self.kind {
            EnemyKind::Slime { .. } => self.update_slime(grid),
            EnemyKind::Bat { .. } => self.update_bat(grid),
            EnemyKind::Boss { .. } => self.update_boss(grid, player, events),
        }
    }

    fn update_slime(&mut self, grid: &TileGrid) {
        let body = &mut self.body;
        body.apply_gravity();
        body.pos.x += body.vel.x;

        let was_grounded = body.on_ground;
        body.on_ground = false;

        // Wall ahead at foot or head height
        let ahead = if body.vel.x > 0.0 { body.pos.x + body.size.x } else { body.pos.x };
        let col = cell(ahead);
        let row = cell(body.pos.y + body.size.y - 1.0);
        if grid.is_solid(col, row) || grid.is_solid(col, row - 1) {
            body.reverse();
        }

        // Cliff edge ahead
        let probe_x = if body.vel.x > 0.0 {
            body.pos.x + body.size.x + 2.0
        } else {
            body.pos.x - 2.0
        };
        let below = cell(body.pos.y + body.size.y + 2.0);
        if was_grounded && !grid.is_solid(cell(probe_x), below) {
            body.reverse();
        }

        body.pos.y += body.vel.y;
        let foot_row = cell(body.pos.y + body.size.y);
        let foot_col = cell(body.pos.x + body.size.x / 2.0);
        if grid.is_solid(foot_col, foot_row) {
            body.pos.y = foot_row as f32 * TILE - body.size.y;
            body.vel.y = 0.0;
            body.on_ground = true;
        }

        if let EnemyKind::Slime { patrolled } = &mut self.kind {
            *patrolled += body.vel.x.abs();
            if *patrolled > SLIME_PATROL {
                *patrolled = 0.0;
                body.reverse();
            }
        }
    }

    fn update_bat(&mut self, grid: &TileGrid) {
        let EnemyKind::Bat { base_y, phase } = &mut self.kind else {
            return;
        };
        let body = &mut self.body;

        *phase += BAT_PHASE_STEP;
        body.pos.y = *base_y + phase.sin() * BAT_BOB_AMPLITUDE;
        body.pos.x += body.vel.x;

        let ahead = if body.vel.x > 0.0 { body.pos.x + body.size.x } else { body.pos.x };
        if grid.is_solid(cell(ahead), cell(body.pos.y)) {
            body.reverse();
        }
    }

    fn update_boss(&mut self, grid: &TileGrid, player: &Player, events: &mut Vec<GameEvent>) {
        if player.dead {
            return;
        }
        let EnemyKind::Boss { phase, timer } = &mut self.kind else {
            return;
        };
        let body = &mut self.body;

        *timer -= 1;
        body.apply_gravity();

        let toward_player = if player.body.pos.x > body.pos.x { 1.0 } else { -1.0 };
        match *phase {
            BossPhase::Idle => {
                body.vel.x = 0.0;
                if *timer <= 0 {
                    *phase = BossPhase::Chase;
                    *timer = BOSS_CHASE_TICKS;
                }
            }
            BossPhase::Chase => {
                body.vel.x = toward_player * BOSS_CHASE_SPEED;
                body.facing = toward_player;
                if *timer <= 0 {
                    *phase = BossPhase::Jump;
                    *timer = BOSS_JUMP_TICKS;
                    body.vel.y = BOSS_LEAP_FORCE;
                    events.push(GameEvent::BossLeap { pos: body.center() });
                }
            }
            BossPhase::Jump => {
                body.vel.x = toward_player * BOSS_LEAP_SPEED;
                body.facing = toward_player;
                // Grounded flag is from the previous tick's resolution
                if body.on_ground && *timer < BOSS_RECOVER_TICKS {
                    *phase = BossPhase::Idle;
                    *timer = BOSS_RECOVER_TICKS;
                    events.push(GameEvent::ScreenShake { magnitude: 3.0, duration: 8 });
                }
            }
        }

        body.on_ground = false;
        body.pos.x += body.vel.x;
        resolve_axis(body, grid, Axis::X, false);
        body.pos.y += body.vel.y;
        resolve_axis(body, grid, Axis::Y, false);
    }

    /// Take one hit; at zero health the enemy stops interacting and starts
    /// its death animation
    pub fn hit(&mut self, events: &mut Vec<GameEvent>) {
        if !self.alive {
            return;
        }
        self.health = self.health.saturating_sub(1);
        events.push(GameEvent::EnemyHit { pos: self.body.center() });
        if self.health == 0 {
            self.alive = false;
            self.death_ticks = ENEMY_DEATH_TICKS;
            self.body.vel = Vec2::ZERO;
            events.push(GameEvent::EnemyDefeated { pos: self.body.center() });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 12 columns; floor on row 4 (y = 64) spanning columns 1..=9, walls at 0 and 11
    fn arena() -> TileGrid {
        TileGrid::from_rows(&[
            "100000000001",
            "100000000001",
            "100000000001",
            "100000000001",
            "011111111100",
        ])
        .0
    }

    fn player_at(x: f32) -> Player {
        Player::new(Vec2::new(x, 0.0))
    }

    #[test]
    fn test_slime_turns_at_cliff_edge() {
        let grid = arena();
        let mut slime = Enemy::slime(Vec2::new(130.0, 64.0 - 12.0));
        let player = player_at(0.0);
        let mut events = Vec::new();
        let mut max_x = slime.body.pos.x;
        for _ in 0..200 {
            slime.update(&grid, &player, &mut events);
            max_x = max_x.max(slime.body.pos.x);
            assert!(slime.body.pos.y <= 64.0 - 12.0 + 0.001, "slime fell off");
        }
        // Never walks past the end of the floor (x = 160)
        assert!(max_x + 14.0 <= 160.0);
    }

    #[test]
    fn test_slime_turns_after_patrol_distance() {
        let (grid, _) = TileGrid::from_rows(&["00000000000000000000", "11111111111111111111"]);
        let mut slime = Enemy::slime(Vec2::new(20.0, 16.0 - 12.0));
        let player = player_at(0.0);
        let mut events = Vec::new();
        let mut turned_at = None;
        for t in 0..400 {
            slime.update(&grid, &player, &mut events);
            if slime.body.vel.x < 0.0 {
                turned_at = Some(t);
                break;
            }
        }
        // 80 units at 0.5 per tick
        let t = turned_at.expect("slime should turn");
        assert!((159..=162).contains(&t), "turned at {t}");
        assert_eq!(slime.body.facing, -1.0);
    }

    #[test]
    fn test_slime_turns_at_wall() {
        let (grid, _) = TileGrid::from_rows(&["000010", "000010", "111111"]);
        let mut slime = Enemy::slime(Vec2::new(44.0, 32.0 - 12.0));
        slime.body.on_ground = true;
        let player = player_at(0.0);
        let mut events = Vec::new();
        for _ in 0..20 {
            slime.update(&grid, &player, &mut events);
            assert!(slime.body.pos.x + 14.0 <= 64.5);
        }
        assert!(slime.body.vel.x < 0.0);
    }

    #[test]
    fn test_bat_bobs_and_ignores_gravity() {
        let (grid, _) = TileGrid::from_rows(&["00000000000000000000"; 10]);
        let mut bat = Enemy::bat(Vec2::new(40.0, 80.0), 0.0);
        let player = player_at(0.0);
        let mut events = Vec::new();
        let (mut lo, mut hi) = (f32::MAX, f32::MIN);
        for _ in 0..200 {
            bat.update(&grid, &player, &mut events);
            lo = lo.min(bat.body.pos.y);
            hi = hi.max(bat.body.pos.y);
        }
        assert!(lo >= 80.0 - BAT_BOB_AMPLITUDE - 0.01);
        assert!(hi <= 80.0 + BAT_BOB_AMPLITUDE + 0.01);
        assert!(hi - lo > BAT_BOB_AMPLITUDE);
        assert_eq!(bat.body.vel.y, 0.0);
    }

    #[test]
    fn test_bat_reverses_at_wall() {
        let (grid, _) = TileGrid::from_rows(&["0000001", "0000001", "0000001"]);
        let mut bat = Enemy::bat(Vec2::new(60.0, 20.0), 0.0);
        let player = player_at(0.0);
        let mut events = Vec::new();
        for _ in 0..30 {
            bat.update(&grid, &player, &mut events);
        }
        assert!(bat.body.vel.x < 0.0);
        assert_eq!(bat.body.facing, -1.0);
    }

    #[test]
    fn test_boss_cycles_idle_chase_jump() {
        let grid = arena();
        let mut boss = Enemy::boss(Vec2::new(40.0, 64.0 - 22.0));
        let player = player_at(150.0);
        let mut events = Vec::new();

        for _ in 0..BOSS_IDLE_TICKS {
            boss.update(&grid, &player, &mut events);
            assert_eq!(boss.body.vel.x, 0.0);
        }
        assert!(matches!(boss.kind, EnemyKind::Boss { phase: BossPhase::Chase, .. }));

        boss.update(&grid, &player, &mut events);
        assert_eq!(boss.body.vel.x, BOSS_CHASE_SPEED);
        assert_eq!(boss.body.facing, 1.0);

        for _ in 1..BOSS_CHASE_TICKS {
            boss.update(&grid, &player, &mut events);
        }
        assert!(matches!(boss.kind, EnemyKind::Boss { phase: BossPhase::Jump, .. }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::BossLeap { .. })));
        assert!(boss.body.vel.y < 0.0);

        let mut landed = false;
        for _ in 0..120 {
            boss.update(&grid, &player, &mut events);
            if matches!(boss.kind, EnemyKind::Boss { phase: BossPhase::Idle, .. }) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(boss.body.pos.y <= 64.0 - 22.0 + 0.001);
    }

    #[test]
    fn test_boss_waits_while_player_dead() {
        let grid = arena();
        let mut boss = Enemy::boss(Vec2::new(40.0, 64.0 - 22.0));
        let mut player = player_at(150.0);
        player.dead = true;
        let mut events = Vec::new();
        for _ in 0..200 {
            boss.update(&grid, &player, &mut events);
        }
        assert!(matches!(
            boss.kind,
            EnemyKind::Boss { phase: BossPhase::Idle, timer: BOSS_IDLE_TICKS }
        ));
    }

    #[test]
    fn test_hit_kills_and_starts_death_window() {
        let grid = arena();
        let player = player_at(0.0);
        let mut slime = Enemy::slime(Vec2::new(40.0, 52.0));
        let mut events = Vec::new();
        slime.hit(&mut events);
        assert!(!slime.alive);
        assert_eq!(slime.death_ticks, ENEMY_DEATH_TICKS);
        assert!(!slime.is_gone());
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyDefeated { .. })));

        // Frozen in place while the death animation plays
        let pos = slime.body.pos;
        for _ in 0..ENEMY_DEATH_TICKS {
            slime.update(&grid, &player, &mut events);
        }
        assert_eq!(slime.body.pos, pos);
        assert!(slime.is_gone());

        // Further hits are ignored
        let before = events.len();
        slime.hit(&mut events);
        assert_eq!(events.len(), before);
    }
}
