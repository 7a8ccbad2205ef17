//! Round state and core simulation types
//!
//! Everything a round needs lives in [`RoundState`], owned by the
//! orchestrator and passed by reference into each subsystem.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::collision::{Aabb, Collision};
use super::obstacle::ObstacleStream;
use super::player::Player;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::normalize_player_name;
use crate::tuning::Tuning;

/// Lifecycle of one round. There is no pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the first "start round" signal
    #[default]
    NotStarted,
    /// Ticking every frame
    Running,
    /// Collided; terminal until a new round starts
    Ended,
}

/// Something the host may want to react to (audio cue, HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    Spawned { id: u32 },
    Scored { score: u32 },
    Crashed { collision: Collision, score: u32 },
}

/// One obstacle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub width: f32,
}

/// Read-only snapshot handed to the render collaborator once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub player_bounds: Aabb,
    pub player_rotation: f32,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub world_width: f32,
    pub world_height: f32,
}

/// Complete state of a single round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub score: u32,
    pub player_name: String,
    pub player: Player,
    pub obstacles: ObstacleStream,
    pub clock: FrameClock,
    /// Seed the obstacle RNG was created from (replays the round exactly)
    pub seed: u64,
    /// Frames simulated this round
    pub ticks: u64,
    /// Events raised since the orchestrator last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Default for RoundState {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            phase: RoundPhase::NotStarted,
            score: 0,
            player_name: String::new(),
            player: Player::new(&tuning),
            obstacles: ObstacleStream::new(0.0),
            clock: FrameClock::new(tuning.max_frame_delta),
            seed: 0,
            ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(0),
        }
    }
}

impl RoundState {
    /// Fresh running round: kite centred at rest, no obstacles, score 0,
    /// spawn timer started at `now_ms`, clock re-armed for its first frame
    pub fn start(player_name: &str, seed: u64, now_ms: f64, tuning: &Tuning) -> Self {
        Self {
            phase: RoundPhase::Running,
            score: 0,
            player_name: normalize_player_name(player_name),
            player: Player::new(tuning),
            obstacles: ObstacleStream::new(now_ms),
            clock: FrameClock::new(tuning.max_frame_delta),
            seed,
            ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build the render payload for the current frame
    pub fn snapshot(&self) -> RenderFrame {
        RenderFrame {
            player_bounds: self.player.bounds(),
            player_rotation: self.player.rotation,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_bottom(),
                    width: o.width,
                })
                .collect(),
            score: self.score,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
        }
    }
}
