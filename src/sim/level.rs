//! Level definitions and load-time validation
//!
//! A `LevelDef` is authored data (strings and spawn descriptors). `Level`
//! is the validated, immutable form the simulation plays.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::TileGrid;
use crate::consts::TILE;

/// Entity types that can appear in a spawn list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnKind {
    Player,
    Slime,
    Bat,
    Boss,
    Coin,
    Heart,
    Key,
}

/// One spawn descriptor, in tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    #[serde(rename = "type")]
    pub kind: SpawnKind,
    #[serde(rename = "x")]
    pub col: i32,
    #[serde(rename = "y")]
    pub row: i32,
}

impl Spawn {
    pub const fn new(kind: SpawnKind, col: i32, row: i32) -> Self {
        Self { kind, col, row }
    }

    /// World position of the entity's top-left corner
    pub fn world_pos(&self) -> Vec2 {
        let x = self.col as f32 * TILE + 2.0;
        let y = self.row as f32 * TILE;
        let dy = match self.kind {
            SpawnKind::Slime => 4.0,
            SpawnKind::Coin | SpawnKind::Heart => 2.0,
            _ => 0.0,
        };
        Vec2::new(x, y + dy)
    }
}

/// Authored level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    /// Opaque background identifier for the renderer
    pub background: String,
    /// Coins needed for a three-star rating
    pub coin_target: u32,
    pub rows: Vec<String>,
    pub spawns: Vec<Spawn>,
}

impl LevelDef {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("no levels to play")]
    NoLevels,
    #[error("level '{level}' has an empty tile grid")]
    EmptyGrid { level: String },
    #[error("level '{level}' has no player spawn")]
    MissingPlayerSpawn { level: String },
    #[error("level '{level}': {kind:?} spawn at ({col}, {row}) is outside the grid")]
    SpawnOutOfBounds {
        level: String,
        kind: SpawnKind,
        col: i32,
        row: i32,
    },
    #[error("malformed level definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// A validated level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub background: String,
    pub coin_target: u32,
    pub grid: TileGrid,
    pub spawns: Vec<Spawn>,
}

impl Level {
    /// Validate and normalize authored data.
    ///
    /// Ragged rows are padded with air and unknown tile codes become air
    /// (both logged). Missing player spawns and out-of-grid spawns are
    /// rejected.
    pub fn from_def(def: &LevelDef) -> Result<Self, LevelError> {
        let (grid, repairs) = TileGrid::from_rows(&def.rows);
        if grid.cols() == 0 || grid.rows() == 0 {
            return Err(LevelError::EmptyGrid {
                level: def.name.clone(),
            });
        }
        if !repairs.is_clean() {
            log::warn!(
                "Level '{}': padded {} ragged row(s), mapped {} unknown tile(s) to air",
                def.name,
                repairs.padded_rows,
                repairs.unknown_tiles
            );
        }

        let mut players = 0;
        for spawn in &def.spawns {
            let in_bounds = spawn.col >= 0
                && spawn.row >= 0
                && (spawn.col as usize) < grid.cols()
                && (spawn.row as usize) < grid.rows();
            if !in_bounds {
                return Err(LevelError::SpawnOutOfBounds {
                    level: def.name.clone(),
                    kind: spawn.kind,
                    col: spawn.col,
                    row: spawn.row,
                });
            }
            if spawn.kind == SpawnKind::Player {
                players += 1;
            }
        }
        match players {
            0 => {
                return Err(LevelError::MissingPlayerSpawn {
                    level: def.name.clone(),
                });
            }
            1 => {}
            n => log::warn!("Level '{}': {} player spawns, using the first", def.name, n),
        }

        Ok(Self {
            name: def.name.clone(),
            background: def.background.clone(),
            coin_target: def.coin_target,
            grid,
            spawns: def.spawns.clone(),
        })
    }

    /// World position of the (first) player spawn
    pub fn player_spawn(&self) -> Vec2 {
        self.spawns
            .iter()
            .find(|s| s.kind == SpawnKind::Player)
            .map(Spawn::world_pos)
            .unwrap_or(Vec2::ZERO)
    }

    /// Star rating for a finished attempt
    pub fn stars(&self, coins: u32) -> u8 {
        star_rating(coins, self.coin_target)
    }
}

/// 3 stars at or above the target, 2 at half of it, otherwise 1
pub fn star_rating(coins: u32, target: u32) -> u8 {
    if coins >= target {
        3
    } else if coins * 2 >= target {
        2
    } else {
        1
    }
}
