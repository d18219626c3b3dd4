//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one step)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collectible;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod interact;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;
pub mod tile;

pub use body::{Axis, Body};
pub use collectible::{Collectible, CollectibleKind};
pub use collision::{AxisContact, resolve_axis};
pub use enemy::{BossPhase, Enemy, EnemyKind};
pub use events::{GameEvent, MusicCue};
pub use interact::{InteractionOutcome, interact};
pub use level::{Level, LevelDef, LevelError, Spawn, SpawnKind, star_rating};
pub use player::{Player, PlayerAnim};
pub use state::{GameState, Screen};
pub use tick::{TickInput, tick};
pub use tile::{Tile, TileCategory, TileGrid};
