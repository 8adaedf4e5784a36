//! Audio output seam
//!
//! Scenes name effects by their asset file; mixing and playback belong to
//! whatever sink the host wires in.

use crate::config::AudioSettings;

pub trait AudioSink {
    /// Play a one-shot effect at `volume` (0.0 - 1.0)
    fn play(&mut self, sound: &str, volume: f32);

    fn apply_settings(&mut self, _settings: &AudioSettings) {}
}

/// Sink that drops everything; used for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, sound: &str, volume: f32) {
        log::trace!("(silent) {} at {:.2}", sound, volume);
    }
}
