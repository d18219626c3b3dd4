//! Feedback events emitted by the simulation
//!
//! The simulation never plays sounds or spawns particles itself; it queues
//! events on `GameState::events` and the host drains them after each batch
//! of ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Background music request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicCue {
    Start,
    Stop,
}

/// Something the host should react to (sound, particles, shake, music)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground; `pos` is the feet position
    Jump { pos: Vec2 },
    CoinCollected { pos: Vec2 },
    HeartCollected { pos: Vec2 },
    KeyCollected { pos: Vec2 },
    PlayerHurt { pos: Vec2 },
    PlayerDied { pos: Vec2 },
    /// Enemy took a hit but survived (or is about to be defeated)
    EnemyHit { pos: Vec2 },
    EnemyDefeated { pos: Vec2 },
    /// Boss launched into its leap
    BossLeap { pos: Vec2 },
    LevelComplete { level: usize },
    MenuSelect,
    ScreenShake { magnitude: f32, duration: u32 },
    Music(MusicCue),
    /// A level was (re)built; camera and particles owned by the host should reset
    LevelLoaded { level: usize },
}
