//! Coins, hearts and keys

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::player::Player;
use crate::Rect;
use crate::consts::{BOB_STEP, COIN_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Heart,
    Key,
}

impl CollectibleKind {
    pub fn size(self) -> Vec2 {
        match self {
            CollectibleKind::Coin | CollectibleKind::Heart => Vec2::new(12.0, 12.0),
            CollectibleKind::Key => Vec2::new(12.0, 16.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
    /// Once set, never cleared for this level instance
    pub collected: bool,
    /// Cosmetic vertical bob (radians); does not move the hitbox
    pub bob_phase: f32,
    pub anim_frame: u32,
    anim_timer: u32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, pos: Vec2, bob_phase: f32) -> Self {
        Self {
            kind,
            pos,
            collected: false,
            bob_phase,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.kind.size() / 2.0
    }

    /// Render offset of the bob animation
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * 3.0
    }

    pub fn update(&mut self) {
        if self.collected {
            return;
        }
        self.bob_phase += BOB_STEP;
        self.anim_timer += 1;
        if self.anim_timer >= 10 {
            self.anim_timer = 0;
            self.anim_frame = self.anim_frame.wrapping_add(1);
        }
    }

    /// Apply this pickup to the player. Returns false if it was already taken.
    pub fn collect(&mut self, player: &mut Player, events: &mut Vec<GameEvent>) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        let pos = self.center();
        match self.kind {
            CollectibleKind::Coin => {
                player.coins += 1;
                player.score += COIN_SCORE;
                events.push(GameEvent::CoinCollected { pos });
            }
            CollectibleKind::Heart => {
                if player.health < player.max_health {
                    player.health += 1;
                }
                events.push(GameEvent::HeartCollected { pos });
            }
            CollectibleKind::Key => {
                player.has_key = true;
                events.push(GameEvent::KeyCollected { pos });
            }
        }
        true
    }
}
