//! Render abstraction
//!
//! After a batch of ticks the host asks for a `RenderSnapshot`: one
//! `DrawRequest` per visible entity plus HUD numbers. Pixels, cameras and
//! fonts stay on the host side.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{
    BossPhase, Collectible, CollectibleKind, Enemy, EnemyKind, GameState, Player, PlayerAnim,
    Screen,
};

/// Every drawable entity sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sprite {
    Player,
    Slime,
    Bat,
    Boss,
    Coin,
    Heart,
    Key,
}

impl Sprite {
    pub const COUNT: usize = 7;
    pub const ALL: [Sprite; Self::COUNT] = [
        Sprite::Player,
        Sprite::Slime,
        Sprite::Bat,
        Sprite::Boss,
        Sprite::Coin,
        Sprite::Heart,
        Sprite::Key,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Animation state tag attached to each draw request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimTag {
    Idle,
    Run,
    Jump,
    Fall,
    Hurt,
    Fly,
    Spin,
}

impl AnimTag {
    pub const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }
}

/// Static description of one sprite's frames and placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteEntry {
    /// Drawn size in world units
    pub size: Vec2,
    /// Offset from the hitbox's top-left to the sprite's top-left
    pub offset: Vec2,
    /// Whether facing left mirrors the sprite
    pub mirrored: bool,
    /// Frame count per `AnimTag`; 0 means the tag falls back to `Idle`
    pub frames: [u8; AnimTag::COUNT],
}

const fn entry(w: f32, h: f32, dx: f32, dy: f32, mirrored: bool, frames: [u8; AnimTag::COUNT]) -> SpriteEntry {
    SpriteEntry {
        size: Vec2::new(w, h),
        offset: Vec2::new(dx, dy),
        mirrored,
        frames,
    }
}

//                         Idle Run Jump Fall Hurt Fly Spin
const PLAYER_FRAMES: [u8; 7] = [2, 2, 1, 1, 0, 0, 0];
const SLIME_FRAMES: [u8; 7] = [2, 2, 0, 0, 0, 0, 0];
const BAT_FRAMES: [u8; 7] = [2, 0, 0, 0, 0, 2, 0];
const BOSS_FRAMES: [u8; 7] = [1, 1, 1, 0, 0, 0, 0];
const COIN_FRAMES: [u8; 7] = [2, 0, 0, 0, 0, 0, 2];
const STILL_FRAMES: [u8; 7] = [1, 0, 0, 0, 0, 0, 0];

/// Enum-indexed sprite table, built once and shared by every snapshot
#[derive(Debug, Clone)]
pub struct SpriteTable {
    entries: [SpriteEntry; Sprite::COUNT],
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteTable {
    pub fn new() -> Self {
        let entries = Sprite::ALL.map(|sprite| match sprite {
            Sprite::Player => entry(20.0, 24.0, -3.0, -2.0, true, PLAYER_FRAMES),
            Sprite::Slime => entry(16.0, 16.0, -1.0, -4.0, true, SLIME_FRAMES),
            Sprite::Bat => entry(16.0, 16.0, -1.0, -2.0, false, BAT_FRAMES),
            Sprite::Boss => entry(24.0, 24.0, -2.0, -2.0, true, BOSS_FRAMES),
            Sprite::Coin => entry(12.0, 12.0, 0.0, 0.0, false, COIN_FRAMES),
            Sprite::Heart => entry(12.0, 12.0, 0.0, 0.0, false, STILL_FRAMES),
            Sprite::Key => entry(12.0, 16.0, 0.0, 0.0, false, STILL_FRAMES),
        });
        Self { entries }
    }

    pub fn get(&self, sprite: Sprite) -> &SpriteEntry {
        &self.entries[sprite.index()]
    }

    /// Resolve a free-running frame counter to a frame of `anim`
    pub fn frame(&self, sprite: Sprite, anim: AnimTag, counter: u32) -> (AnimTag, u8) {
        let frames = &self.get(sprite).frames;
        let (anim, count) = match frames[anim.index()] {
            0 => (AnimTag::Idle, frames[AnimTag::Idle.index()].max(1)),
            n => (anim, n),
        };
        (anim, (counter % count as u32) as u8)
    }
}

/// Boss health bar drawn above the sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthBar {
    pub width: f32,
    /// Remaining health, 0.0 - 1.0
    pub fraction: f32,
}

/// One entity to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRequest {
    pub sprite: Sprite,
    pub anim: AnimTag,
    pub frame: u8,
    /// World position of the sprite's top-left corner
    pub pos: Vec2,
    /// True when the host should flip the sprite horizontally
    pub flip_x: bool,
    pub health_bar: Option<HealthBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub level_name: String,
    pub health: u8,
    pub max_health: u8,
    pub lives: u8,
    pub coins: u32,
    pub coin_target: u32,
    /// Banked run score plus the current attempt
    pub score: u32,
    pub has_key: bool,
}

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub screen: Screen,
    pub level: usize,
    pub background: String,
    /// World size in units, for camera clamping
    pub world_size: Vec2,
    /// Point the camera should follow
    pub focus: Option<Vec2>,
    pub draws: Vec<DrawRequest>,
    pub hud: Option<Hud>,
    /// Highlighted entry on the level-select screen
    pub selected_level: usize,
    /// Rating shown on the level-complete screen
    pub stars: Option<u8>,
    /// Blinking "press enter" prompt on menus
    pub prompt_visible: bool,
}

fn request(table: &SpriteTable, sprite: Sprite, anim: AnimTag, counter: u32, hitbox_pos: Vec2, facing: f32) -> DrawRequest {
    let info = table.get(sprite);
    let (anim, frame) = table.frame(sprite, anim, counter);
    DrawRequest {
        sprite,
        anim,
        frame,
        pos: (hitbox_pos + info.offset).floor(),
        flip_x: info.mirrored && facing < 0.0,
        health_bar: None,
    }
}

fn player_draw(table: &SpriteTable, player: &Player) -> Option<DrawRequest> {
    if !player.is_visible() {
        return None;
    }
    let anim = match player.anim {
        PlayerAnim::Idle => AnimTag::Idle,
        PlayerAnim::Run => AnimTag::Run,
        PlayerAnim::Jump => AnimTag::Jump,
        PlayerAnim::Fall => AnimTag::Fall,
        PlayerAnim::Hurt => AnimTag::Hurt,
    };
    Some(request(table, Sprite::Player, anim, player.anim_frame, player.body.pos, player.body.facing))
}

fn enemy_draw(table: &SpriteTable, enemy: &Enemy) -> Option<DrawRequest> {
    if !enemy.alive {
        return None;
    }
    let (sprite, anim) = match enemy.kind {
        EnemyKind::Slime { .. } => (Sprite::Slime, AnimTag::Run),
        EnemyKind::Bat { .. } => (Sprite::Bat, AnimTag::Fly),
        EnemyKind::Boss { phase, .. } => (
            Sprite::Boss,
            match phase {
                BossPhase::Idle => AnimTag::Idle,
                BossPhase::Chase => AnimTag::Run,
                BossPhase::Jump => AnimTag::Jump,
            },
        ),
    };
    let mut draw = request(table, sprite, anim, enemy.anim_frame, enemy.body.pos, enemy.body.facing);
    if enemy.is_boss() {
        draw.health_bar = Some(HealthBar {
            width: table.get(Sprite::Boss).size.x,
            fraction: enemy.health as f32 / enemy.max_health.max(1) as f32,
        });
    }
    Some(draw)
}

fn collectible_draw(table: &SpriteTable, item: &Collectible) -> Option<DrawRequest> {
    if item.collected {
        return None;
    }
    let (sprite, anim) = match item.kind {
        CollectibleKind::Coin => (Sprite::Coin, AnimTag::Spin),
        CollectibleKind::Heart => (Sprite::Heart, AnimTag::Idle),
        CollectibleKind::Key => (Sprite::Key, AnimTag::Idle),
    };
    let pos = item.pos + Vec2::new(0.0, item.bob_offset());
    Some(request(table, sprite, anim, item.anim_frame, pos, 1.0))
}

/// Read-only view of the settled state
pub fn snapshot(state: &GameState, table: &SpriteTable) -> RenderSnapshot {
    let level = state.level();
    let in_level = matches!(
        state.screen,
        Screen::Playing | Screen::Paused | Screen::LevelComplete | Screen::GameOver
    );

    let mut draws = Vec::new();
    if in_level {
        draws.extend(state.collectibles.iter().filter_map(|c| collectible_draw(table, c)));
        draws.extend(state.enemies.iter().filter_map(|e| enemy_draw(table, e)));
        if let Some(player) = &state.player {
            draws.extend(player_draw(table, player));
        }
    }

    let player = state.player.as_ref().filter(|_| in_level);
    let hud = player.map(|p| Hud {
        level_name: level.name.clone(),
        health: p.health,
        max_health: p.max_health,
        lives: p.lives,
        coins: p.coins,
        coin_target: level.coin_target,
        score: state.run_score(),
        has_key: p.has_key,
    });
    let stars = match (state.screen, player) {
        (Screen::LevelComplete, Some(p)) => Some(level.stars(p.coins)),
        _ => None,
    };

    RenderSnapshot {
        screen: state.screen,
        level: state.current_level,
        background: level.background.clone(),
        world_size: Vec2::new(level.grid.pixel_width(), level.grid.pixel_height()),
        focus: player.map(|p| p.body.center()),
        draws,
        hud,
        selected_level: state.selected_level,
        stars,
        prompt_visible: (state.screen_ticks / 30) % 2 == 0,
    }
}
