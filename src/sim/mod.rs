//! Frame-rate independent simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time enters only as frame timestamps, normalised to 60 Hz steps
//! - Seeded RNG only
//! - Obstacles iterate in spawn order

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod scoring;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Aabb, Collision, ObstacleBounds, check_collision, find_collision};
pub use obstacle::{Obstacle, ObstacleStream};
pub use player::Player;
pub use scoring::update_scoring;
pub use state::{GameEvent, ObstacleView, RenderFrame, RoundPhase, RoundState};
pub use tick::{TickInput, TickOutcome, tick};
