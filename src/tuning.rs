//! Data-driven game balance
//!
//! All physics values are expressed per 60 Hz reference frame, so a
//! normalised delta of 1.0 applies exactly one frame's worth of motion.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_HEIGHT;
use crate::sim::clock::DEFAULT_MAX_DELTA;

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units per frame²)
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = upward)
    pub flap_impulse: f32,
    /// Leftward obstacle speed (units per frame)
    pub obstacle_speed: f32,
    /// Vertical size of each obstacle's gap
    pub gap_height: f32,
    /// Wall-clock time between obstacle spawns
    pub spawn_interval_ms: f64,
    pub obstacle_width: f32,
    /// Obstacles spawn this far past the right edge of the world
    pub spawn_margin: f32,
    /// Obstacles are culled once their right edge is this far past the left edge
    pub offscreen_margin: f32,
    /// Smallest allowed gap top
    pub min_gap_top: f32,
    /// Clearance kept between the lowest possible gap and the world floor
    pub ground_margin: f32,
    /// Fixed horizontal position of the kite's centre
    pub player_x: f32,
    /// Kite bounding box (width, height)
    pub player_size: Vec2,
    /// Largest normalised delta a single frame may apply
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            flap_impulse: -4.0,
            obstacle_speed: 1.5,
            gap_height: 130.0,
            spawn_interval_ms: 2000.0,
            obstacle_width: 68.0,
            spawn_margin: 40.0,
            offscreen_margin: 40.0,
            min_gap_top: 60.0,
            ground_margin: 120.0,
            player_x: 140.0,
            player_size: Vec2::new(56.0, 42.0),
            max_frame_delta: DEFAULT_MAX_DELTA,
        }
    }
}

/// Reasons a tuning document is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A value that must be strictly positive was not
    NotPositive(&'static str),
    /// The gap-top range `[min, max]` is empty
    EmptyGapRange { min: f32, max: f32 },
    /// The document was not valid JSON for this schema
    Parse(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NotPositive(field) => write!(f, "tuning field `{field}` must be positive"),
            TuningError::EmptyGapRange { min, max } => {
                write!(f, "gap top range is empty ({min} > {max})")
            }
            TuningError::Parse(msg) => write!(f, "invalid tuning document: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse a JSON override; fields left out keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Highest allowed gap top for the fixed world height
    pub fn max_gap_top(&self) -> f32 {
        WORLD_HEIGHT - self.gap_height - self.ground_margin
    }

    /// Check that the values describe a playable world
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gap_height", self.gap_height),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_width", self.obstacle_width),
            ("max_frame_delta", self.max_frame_delta),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive(field));
            }
        }
        if self.spawn_interval_ms.is_nan() || self.spawn_interval_ms <= 0.0 {
            return Err(TuningError::NotPositive("spawn_interval_ms"));
        }

        // Gap tops are drawn in whole units
        let (min, max) = (self.min_gap_top, self.max_gap_top());
        if min.is_nan() || max.is_nan() || min.ceil() > max.floor() {
            return Err(TuningError::EmptyGapRange { min, max });
        }
        Ok(())
    }

    /// Validated copy, or the defaults if this one is unusable
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Rejected tuning ({e}), using defaults");
                Self::default()
            }
        }
    }
}
