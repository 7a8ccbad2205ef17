//! The kite: the single player-controlled body

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::{MAX_ROTATION, ROTATION_DIVISOR, WORLD_HEIGHT};
use crate::tuning::Tuning;

/// Kite state. `pos.x` is pinned; only `pos.y` and `vel` change, and only
/// through [`flap`](Player::flap) and [`integrate`](Player::integrate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the kite in world units
    pub pos: Vec2,
    /// Vertical velocity (negative = upward), units per reference frame
    pub vel: f32,
    /// Cosmetic tilt in radians, recomputed from `vel` every integration
    pub rotation: f32,
    /// Bounding box size (width, height)
    pub size: Vec2,
}

impl Player {
    /// Kite at rest, vertically centred in the world
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, WORLD_HEIGHT / 2.0),
            vel: 0.0,
            rotation: 0.0,
            size: tuning.player_size,
        }
    }

    /// Hard reset of vertical velocity to the flap impulse (not additive)
    pub fn flap(&mut self, impulse: f32) {
        self.vel = impulse;
    }

    /// Advance one step of `delta` reference frames
    pub fn integrate(&mut self, delta: f32, gravity: f32) {
        self.vel += gravity * delta;
        self.pos.y += self.vel * delta;
        self.rotation = rotation_for(self.vel);
    }

    /// Axis-aligned bounding box around the kite's centre
    pub fn bounds(&self) -> Aabb {
        let half = self.size / 2.0;
        Aabb {
            left: self.pos.x - half.x,
            right: self.pos.x + half.x,
            top: self.pos.y - half.y,
            bottom: self.pos.y + half.y,
        }
    }
}

/// Tilt for a given vertical velocity
#[inline]
pub fn rotation_for(vel: f32) -> f32 {
    (vel / ROTATION_DIVISOR).clamp(-MAX_ROTATION, MAX_ROTATION)
}
