//! Physical shape shared by the player and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::{GRAVITY, MAX_FALL};

/// Collision axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Position (top-left), size, velocity and grounding of a moving box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
            facing: 1.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Accelerate downward, capped at terminal speed
    #[inline]
    pub fn apply_gravity(&mut self) {
        self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL);
    }

    /// Flip horizontal direction of travel and facing together
    #[inline]
    pub fn reverse(&mut self) {
        self.vel.x = -self.vel.x;
        self.facing = -self.facing;
    }
}
