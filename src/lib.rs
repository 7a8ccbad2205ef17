//! Kite Pilot - steer a kite through a stream of gated columns
//!
//! Core modules:
//! - `sim`: Frame-rate independent simulation (clock, kite physics, obstacles, collisions)
//! - `game`: Round orchestrator driven by a frame scheduler
//! - `renderer`: WebGPU rendering of a per-frame snapshot
//! - `platform`: Frame scheduling and input mapping
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `highscores`: Local leaderboard
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{HighScores, Leaderboard, ScoreEntry};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// World dimensions in reference units, independent of canvas pixels
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Reference frame rate the physics constants are tuned for
    pub const REFERENCE_FPS: f64 = 60.0;
    /// Duration of one reference frame in milliseconds
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / REFERENCE_FPS;

    /// Kite tilt is velocity / ROTATION_DIVISOR, clamped to ±MAX_ROTATION radians
    pub const ROTATION_DIVISOR: f32 = 12.0;
    pub const MAX_ROTATION: f32 = 0.8;

    /// Name used when the player leaves the name field blank
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
    pub const MAX_PLAYER_NAME_LEN: usize = 32;

    /// Height of the painted ground band (cosmetic only)
    pub const GROUND_BAND_HEIGHT: f32 = 48.0;
    /// Spacing of the background grid lines
    pub const GRID_SPACING: f32 = 40.0;
}

/// Trim a player-supplied name, falling back to the default when blank
pub fn normalize_player_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return consts::DEFAULT_PLAYER_NAME.to_string();
    }
    trimmed.chars().take(consts::MAX_PLAYER_NAME_LEN).collect()
}
