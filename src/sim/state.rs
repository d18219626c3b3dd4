//! Game state and level loading
//!
//! Everything the tick mutates lives here. Cosmetic state (camera, particles,
//! shake) belongs to the host and is driven by `GameEvent`s.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::collectible::{Collectible, CollectibleKind};
use super::enemy::Enemy;
use super::events::{GameEvent, MusicCue};
use super::level::{Level, LevelError, SpawnKind};
use super::player::Player;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Title,
    LevelSelect,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next level load
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream += 1;
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub screen: Screen,
    /// Ticks spent on the current screen
    pub screen_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub levels: Vec<Level>,
    pub current_level: usize,
    /// Highlighted entry on the level-select screen
    pub selected_level: usize,
    /// Created when a run starts; persists across level loads within the run
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    /// Score banked from completed levels this run
    pub total_score: u32,
    /// Ticks since the player died
    pub death_delay: u32,
    /// Feedback produced since the host last drained it
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the title screen
    pub fn new(levels: Vec<Level>, seed: u64) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        Ok(Self {
            seed,
            rng_state: RngState::new(seed),
            screen: Screen::Title,
            screen_ticks: 0,
            time_ticks: 0,
            levels,
            current_level: 0,
            selected_level: 0,
            player: None,
            enemies: Vec::new(),
            collectibles: Vec::new(),
            total_score: 0,
            death_delay: 0,
            events: Vec::new(),
        })
    }

    /// The level currently loaded (or last loaded)
    pub fn level(&self) -> &Level {
        &self.levels[self.current_level]
    }

    pub fn is_last_level(&self) -> bool {
        self.current_level + 1 >= self.levels.len()
    }

    /// Banked score plus whatever the current attempt has earned
    pub fn run_score(&self) -> u32 {
        self.total_score + self.player.as_ref().map_or(0, |p| p.score)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued feedback events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
        self.screen_ticks = 0;
    }

    /// Begin a new run at `index`: fresh player, zero banked score
    pub fn start_game(&mut self, index: usize) {
        let index = index.min(self.levels.len() - 1);
        self.player = None;
        self.total_score = 0;
        self.load_level(index);
        self.set_screen(Screen::Playing);
        self.emit(GameEvent::Music(MusicCue::Start));
    }

    /// (Re)build the level's entities from its spawn list.
    ///
    /// Enemies and collectibles are always discarded and recreated. An
    /// existing player keeps lives and banked score but is moved to the new
    /// spawn with health, coins, key and attempt score reset.
    pub fn load_level(&mut self, index: usize) {
        let index = index.min(self.levels.len() - 1);
        self.current_level = index;
        self.enemies.clear();
        self.collectibles.clear();
        self.death_delay = 0;

        let mut rng = self.rng_state.next_rng();
        let level = &self.levels[index];
        let mut player_placed = false;

        for spawn in &level.spawns {
            let pos = spawn.world_pos();
            match spawn.kind {
                SpawnKind::Player => {
                    if player_placed {
                        continue;
                    }
                    player_placed = true;
                    match self.player.as_mut() {
                        None => self.player = Some(Player::new(pos)),
                        Some(player) => {
                            player.spawn = pos;
                            player.respawn();
                            player.coins = 0;
                            player.has_key = false;
                            player.score = 0;
                        }
                    }
                }
                SpawnKind::Slime => self.enemies.push(Enemy::slime(pos)),
                SpawnKind::Bat => {
                    self.enemies.push(Enemy::bat(pos, rng.random_range(0.0..TAU)));
                }
                SpawnKind::Boss => self.enemies.push(Enemy::boss(pos)),
                SpawnKind::Coin => self.collectibles.push(collectible(CollectibleKind::Coin, pos, &mut rng)),
                SpawnKind::Heart => self.collectibles.push(collectible(CollectibleKind::Heart, pos, &mut rng)),
                SpawnKind::Key => self.collectibles.push(collectible(CollectibleKind::Key, pos, &mut rng)),
            }
        }

        log::info!(
            "Loaded level {} '{}' ({} enemies, {} collectibles)",
            index + 1,
            level.name,
            self.enemies.len(),
            self.collectibles.len()
        );
        self.emit(GameEvent::LevelLoaded { level: index });
    }

    /// Bank the attempt score and show the results screen
    pub fn complete_level(&mut self) {
        let (score, coins) = self.player.as_ref().map_or((0, 0), |p| (p.score, p.coins));
        self.total_score += score;
        log::info!(
            "Level {} complete: {} coins, {} stars, run score {}",
            self.current_level + 1,
            coins,
            self.level().stars(coins),
            self.total_score
        );
        self.set_screen(Screen::LevelComplete);
        self.emit(GameEvent::LevelComplete { level: self.current_level });
        self.emit(GameEvent::Music(MusicCue::Stop));
    }
}

fn collectible(kind: CollectibleKind, pos: Vec2, rng: &mut Pcg32) -> Collectible {
    Collectible::new(kind, pos, rng.random_range(0.0..TAU))
}
