//! Per-frame simulation step
//!
//! Order within a frame: delta -> spawn -> flap + integrate -> advance/cull
//! -> score -> collide. Scoring runs before the collision test so a point
//! earned on the crashing frame still counts.

use super::collision::find_collision;
use super::scoring::update_scoring;
use super::state::{GameEvent, RoundPhase, RoundState};
use crate::consts::WORLD_HEIGHT;
use crate::tuning::Tuning;

/// Input gathered between two frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// A flap arrived since the previous frame
    pub flap: bool,
}

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Ended,
}

/// Advance a running round to the frame at `now_ms`
pub fn tick(state: &mut RoundState, input: &TickInput, now_ms: f64, tuning: &Tuning) -> TickOutcome {
    if state.phase != RoundPhase::Running {
        return TickOutcome::Ended;
    }

    let delta = state.clock.delta(now_ms);
    state.ticks += 1;

    if let Some(id) = state.obstacles.maybe_spawn(now_ms, &mut state.rng, tuning) {
        state.events.push(GameEvent::Spawned { id });
    }

    // Flaps land between frames, never mid-integration
    if input.flap {
        state.player.flap(tuning.flap_impulse);
        state.events.push(GameEvent::Flapped);
    }
    state.player.integrate(delta, tuning.gravity);

    state.obstacles.advance(delta, tuning.obstacle_speed);
    state.obstacles.cull(tuning.offscreen_margin);

    let passed = update_scoring(state.player.pos.x, &mut state.obstacles.obstacles);
    for _ in 0..passed {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    let bounds = state.player.bounds();
    if let Some(collision) = find_collision(&bounds, &state.obstacles.obstacles, WORLD_HEIGHT) {
        state.phase = RoundPhase::Ended;
        state.events.push(GameEvent::Crashed {
            collision,
            score: state.score,
        });
        log::debug!(
            "Crashed into {:?} after {} ticks with score {}",
            collision,
            state.ticks,
            state.score
        );
        return TickOutcome::Ended;
    }

    TickOutcome::Continue
}
