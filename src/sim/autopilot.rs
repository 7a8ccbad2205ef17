//! Simple flap controller used for headless demo rounds
//!
//! Tracks the centre of the next gap the kite has not yet cleared and
//! flaps whenever it sinks below that line while falling.

use super::state::RoundState;
use crate::consts::WORLD_HEIGHT;

/// Vertical line the autopilot tries to hold
pub fn target_y(state: &RoundState) -> f32 {
    let kite_left = state.player.bounds().left;
    state
        .obstacles
        .iter()
        .find(|o| o.right() > kite_left)
        .map(|o| o.gap_top + o.gap_height / 2.0)
        .unwrap_or(WORLD_HEIGHT / 2.0)
}

/// Whether to flap before the next frame
pub fn should_flap(state: &RoundState) -> bool {
    state.is_running() && state.player.vel >= 0.0 && state.player.pos.y > target_y(state)
}
