//! Sound cues
//!
//! The simulation only asks for cues; playing them is fire-and-forget and
//! a failure to play never affects the round.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Kite flapped
    Flap,
    /// Obstacle cleared
    Score,
    /// Round ended in a collision
    Crash,
}

impl SoundCue {
    /// Cue requested by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundCue::Flap),
            GameEvent::Scored { .. } => Some(SoundCue::Score),
            GameEvent::Crashed { .. } => Some(SoundCue::Crash),
            GameEvent::Spawned { .. } => None,
        }
    }
}

/// Audio output collaborator
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    /// Apply a new effective volume (0.0 - 1.0); 0 silences everything
    fn set_volume(&mut self, _volume: f32) {}

    /// Unlock output; browsers only allow this from a user gesture
    fn resume(&mut self) {}
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}
