//! Procedural audio engine.
//!
//! Each phase has a small soundscape of oscillators. When the phase changes,
//! the old voices are stopped and dropped and the new phase's voices fade in
//! from silence. Muting glides a single master gain rather than tearing the
//! graph down, so unmuting is seamless.
//!
//! # Threading
//!
//! [`AudioEngine`] is a cheap, cloneable handle to a [`Mixer`] behind a
//! mutex. The output device's callback renders from the same mixer. `bind`
//! and `set_muted` only hold the lock long enough to swap voices or schedule
//! a ramp, so callers on the frame thread never wait on audio work.
//!
//! ```ignore
//! let audio = AudioEngine::new(&AudioConfig::default());
//! audio.bind(PhaseId::GalaxyFormation);
//! audio.set_muted(true);
//!
//! // In the device callback:
//! audio.render(&mut buffer, channels);
//! ```

pub mod mixer;
#[cfg(feature = "playback")]
pub mod output;
pub mod param;
pub mod soundscape;
pub mod voice;

pub use mixer::{GeneratorSet, Mixer};
#[cfg(feature = "playback")]
pub use output::AudioOutput;
pub use param::{Param, Ramp};
pub use voice::{Lfo, Voice, Waveform};

use crate::config::AudioConfig;
use crate::controller::PhaseListener;
use crate::phase::PhaseId;
use log::warn;
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle to the shared mixer.
#[derive(Debug, Clone)]
pub struct AudioEngine {
    mixer: Arc<Mutex<Mixer>>,
}

impl AudioEngine {
    /// Create an engine with nothing bound.
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new(config))),
        }
    }

    /// Lock the mixer. A panic on the audio thread must not take the
    /// simulation down with it, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap_or_else(|poisoned| {
            warn!("audio mixer lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Replace the active generator set with the one for `phase`.
    pub fn bind(&self, phase: PhaseId) {
        self.lock().bind(phase);
    }

    /// Tear down the active generator set without building another.
    pub fn unbind(&self) {
        self.lock().unbind();
    }

    /// Glide the master gain to silence (`true`) or back to its baseline.
    pub fn set_muted(&self, muted: bool) {
        self.lock().set_muted(muted);
    }

    pub fn is_muted(&self) -> bool {
        self.lock().is_muted()
    }

    /// Phase of the bound generator set.
    pub fn active_phase(&self) -> Option<PhaseId> {
        self.lock().active().map(|set| set.phase)
    }

    /// Number of voices in the bound set that are still running.
    pub fn generator_count(&self) -> usize {
        self.lock()
            .active()
            .map(|set| set.voices().iter().filter(|v| v.is_running()).count())
            .unwrap_or(0)
    }

    /// Number of bindings performed so far.
    pub fn binding_generation(&self) -> u64 {
        self.lock().generation()
    }

    /// Current master gain.
    pub fn master_gain(&self) -> f32 {
        self.lock().master_gain()
    }

    /// Seconds on the audio clock.
    pub fn now(&self) -> f64 {
        self.lock().now()
    }

    /// Fill an interleaved output buffer.
    pub fn render(&self, out: &mut [f32], channels: usize) {
        self.lock().render(out, channels);
    }

    /// Run the audio clock forward without output (headless use).
    pub fn advance(&self, seconds: f64) {
        self.lock().advance(seconds);
    }

    /// Run `f` with exclusive access to the mixer.
    pub fn with_mixer<R>(&self, f: impl FnOnce(&mut Mixer) -> R) -> R {
        f(&mut self.lock())
    }
}

impl PhaseListener for AudioEngine {
    fn on_phase_change(&mut self, phase: PhaseId) {
        self.bind(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AudioEngine {
        AudioEngine::new(&AudioConfig {
            sample_rate: 8_000,
            rng_seed: Some(4),
            ..AudioConfig::default()
        })
    }

    #[test]
    fn test_at_most_one_generator_set() {
        let audio = engine();
        audio.bind(PhaseId::Singularity);
        assert_eq!(audio.generator_count(), 1);
        audio.bind(PhaseId::GalaxyFormation);
        assert_eq!(audio.active_phase(), Some(PhaseId::GalaxyFormation));
        assert_eq!(audio.generator_count(), 3);
        assert_eq!(audio.binding_generation(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let audio = engine();
        let handle = audio.clone();
        handle.bind(PhaseId::Inflation);
        assert_eq!(audio.active_phase(), Some(PhaseId::Inflation));

        audio.unbind();
        assert_eq!(handle.active_phase(), None);
        assert_eq!(handle.generator_count(), 0);
    }

    #[test]
    fn test_listener_binds() {
        let mut audio = engine();
        audio.on_phase_change(PhaseId::SolarSystem);
        assert_eq!(audio.active_phase(), Some(PhaseId::SolarSystem));
    }

    #[test]
    fn test_poisoned_lock_recovers() {
        let audio = engine();
        let handle = audio.clone();
        let _ = std::thread::spawn(move || {
            handle.with_mixer(|_| panic!("audio thread died"));
        })
        .join();

        audio.bind(PhaseId::QuarkGluonPlasma);
        assert_eq!(audio.generator_count(), 2);
    }
}
