//! Tile collision for axis-aligned boxes
//!
//! Movement is resolved one axis at a time: callers displace along X and
//! resolve, then displace along Y and resolve. Each call corrects against the
//! first blocking tile found in row-major scan order and stops there; boxes
//! overlapping several blockers on one axis are only partly corrected in a
//! single call. That matches how levels are authored and is kept as-is.

use super::body::{Axis, Body};
use super::tile::{TileCategory, TileGrid, cell};
use crate::Rect;
use crate::consts::TILE;

/// How far above a one-way tile's top edge the previous bottom may sit and
/// still land on it
const ONE_WAY_TOLERANCE: f32 = 2.0;

/// Far edges are pulled in by this much so a box resting flush against a
/// tile boundary does not count as overlapping the next cell
const SKIN: f32 = 0.01;

/// Result of resolving one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisContact {
    /// A solid or one-way tile corrected the position
    pub blocked: bool,
    /// A deadly tile's hitbox overlapped the box (only reported for the player)
    pub hazard: bool,
}

/// Reduced hitbox of a deadly tile: the lower half, inset 2 units per side
pub fn hazard_rect(col: i32, row: i32) -> Rect {
    Rect::new(
        col as f32 * TILE + 2.0,
        row as f32 * TILE + 8.0,
        TILE - 4.0,
        8.0,
    )
}

/// Resolve `body` against `grid` along `axis`.
///
/// Must be called right after displacing the body by its velocity on that
/// axis; one-way tiles use `pos.y - vel.y` as the position before the move.
pub fn resolve_axis(body: &mut Body, grid: &TileGrid, axis: Axis, is_player: bool) -> AxisContact {
    let mut contact = AxisContact::default();

    let left = cell(body.pos.x);
    let right = cell(body.pos.x + body.size.x - SKIN);
    let top = cell(body.pos.y);
    let bottom = cell(body.pos.y + body.size.y - SKIN);

    let rows = grid.rows() as i32;
    let cols = grid.cols() as i32;

    for row in top.max(0)..=bottom.min(rows - 1) {
        for col in left.max(0)..=right.min(cols - 1) {
            let tile_x = col as f32 * TILE;
            let tile_y = row as f32 * TILE;

            match grid.get(col, row).category() {
                TileCategory::Solid => {
                    match axis {
                        Axis::X => {
                            if body.vel.x > 0.0 {
                                body.pos.x = tile_x - body.size.x;
                            } else if body.vel.x < 0.0 {
                                body.pos.x = tile_x + TILE;
                            }
                            body.vel.x = 0.0;
                        }
                        Axis::Y => {
                            if body.vel.y > 0.0 {
                                body.pos.y = tile_y - body.size.y;
                                body.vel.y = 0.0;
                                body.on_ground = true;
                            } else if body.vel.y < 0.0 {
                                body.pos.y = tile_y + TILE;
                                body.vel.y = 0.0;
                            }
                        }
                    }
                    contact.blocked = true;
                    return contact;
                }
                TileCategory::OneWay if axis == Axis::Y && body.vel.y > 0.0 => {
                    let prev_bottom = body.pos.y + body.size.y - body.vel.y;
                    if prev_bottom <= tile_y + ONE_WAY_TOLERANCE {
                        body.pos.y = tile_y - body.size.y;
                        body.vel.y = 0.0;
                        body.on_ground = true;
                        contact.blocked = true;
                        return contact;
                    }
                }
                TileCategory::Deadly if is_player => {
                    if body.rect().intersects(&hazard_rect(col, row)) {
                        contact.hazard = true;
                    }
                }
                _ => {}
            }
        }
    }

    contact
}
