//! The top-level simulation.
//!
//! A [`Universe`] owns the particles, the phase controller and a handle to
//! the audio engine. The caller drives it one frame at a time:
//!
//! ```ignore
//! let mut universe = Universe::new(UniverseConfig::cosmic_dust())?;
//! let mut clock = FrameClock::new();
//!
//! loop {
//!     let now = clock.tick();
//!     universe.step(now);
//!     renderer.upload(universe.buffers().position_bytes());
//! }
//! ```
//!
//! `step` takes `&mut self`, so a phase change requested by the UI can only
//! land between frames; every particle in a frame sees the same phase.

use crate::audio::AudioEngine;
use crate::config::UniverseConfig;
use crate::controller::PhaseController;
use crate::error::ConfigError;
use crate::integrator::Integrator;
use crate::particle::{FrameBuffers, Particle, ParticleStore};
use crate::phase::PhaseId;
use crate::spawn::SpawnContext;
use crate::starfield::StarField;
use crate::target::{Jitter, TargetInput, TargetRules};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Salt separating the jitter stream from the particle seeds.
const JITTER_SALT: u64 = 0x5A17_C0DE;
/// Salt separating the star field stream from the particle seeds.
const STAR_SALT: u64 = 0x057A_2F1E;

/// Particles, phases and sound, advanced one frame at a time.
#[derive(Debug)]
pub struct Universe {
    store: ParticleStore,
    rules: TargetRules,
    integrator: Integrator,
    controller: PhaseController,
    audio: AudioEngine,
    jitter: Jitter,
    stars: StarField,
    last_step: Option<f64>,
    frame: u64,
}

impl Universe {
    /// Build a universe from a validated configuration.
    ///
    /// The simulation clock starts at 0 in `config.initial_phase`, and the
    /// audio engine is bound to that phase immediately.
    pub fn new(config: UniverseConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let base_seed = config.rng_seed.unwrap_or_else(SpawnContext::entropy_seed);
        let store = ParticleStore::new(config.particle_count, config.spawn_extent, base_seed);
        let integrator = Integrator::new()
            .with_attraction(config.attraction)
            .with_damping(config.damping)
            .with_reference_rate(config.reference_rate);

        let mut star_rng = SmallRng::seed_from_u64(base_seed ^ STAR_SALT);
        let stars = StarField::generate(config.star_count, &mut star_rng);

        let audio = AudioEngine::new(&config.audio);
        let mut controller = PhaseController::new(config.initial_phase, 0.0);
        controller.add_listener(audio.clone());

        info!(
            "universe created: {} particles, {} stars, starting in {}",
            store.len(),
            stars.len(),
            controller.current()
        );

        Ok(Self {
            store,
            rules: TargetRules::default(),
            integrator,
            controller,
            audio,
            jitter: Jitter::new(base_seed ^ JITTER_SALT),
            stars,
            last_step: None,
            frame: 0,
        })
    }

    /// Swap in a custom rule table.
    pub fn with_rules(mut self, rules: TargetRules) -> Self {
        self.rules = rules;
        self
    }

    /// Advance every particle one frame at time `now` (seconds).
    pub fn step(&mut self, now: f64) {
        let dt = match self.last_step {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_step = Some(now);

        let phase = Some(self.controller.current());
        let elapsed_in_phase = self.controller.elapsed(now) as f32;
        let global_time = now;
        let count = self.store.len();
        let rules = &self.rules;
        let jitter = &mut self.jitter;

        self.integrator
            .integrate(&mut self.store, dt, |index, particle: &Particle| {
                let input = TargetInput {
                    index,
                    count,
                    seed: particle.seed,
                    position: particle.position,
                    elapsed_in_phase,
                    global_time,
                };
                rules.compute(phase, &input, jitter)
            });

        self.frame += 1;
    }

    /// Select a phase directly. Returns the phase that was active.
    pub fn transition_to(&mut self, phase: PhaseId, now: f64) -> PhaseId {
        self.controller.transition_to(phase, now)
    }

    /// Select a phase by its external id. Unknown ids change nothing.
    pub fn transition_to_raw(&mut self, id: &str, now: f64) -> Option<PhaseId> {
        self.controller.transition_to_raw(id, now)
    }

    /// Mute or unmute the soundtrack. The simulation is unaffected.
    pub fn set_muted(&self, muted: bool) {
        self.audio.set_muted(muted);
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// The active phase.
    #[inline]
    pub fn current_phase(&self) -> PhaseId {
        self.controller.current()
    }

    /// Output buffers as of the last step.
    #[inline]
    pub fn buffers(&self) -> FrameBuffers<'_> {
        self.store.buffers()
    }

    #[inline]
    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// Handle to the audio engine, for attaching an output device.
    #[inline]
    pub fn audio(&self) -> &AudioEngine {
        &self.audio
    }

    #[inline]
    pub fn controller(&self) -> &PhaseController {
        &self.controller
    }

    /// Mutable access for schedulers such as [`Tour`](crate::tour::Tour).
    #[inline]
    pub fn controller_mut(&mut self) -> &mut PhaseController {
        &mut self.controller
    }

    #[inline]
    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Frames stepped so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
