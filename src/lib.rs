//! # Cosmogenesis
//!
//! A phase-driven particle simulation of cosmic history, with a procedural
//! soundtrack that follows the phases.
//!
//! Every frame, each particle computes a target from the active phase, then a
//! damped spring pulls it toward that target. Phase changes are never
//! instantaneous on screen: particles glide from one formation to the next.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cosmogenesis::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut universe = Universe::new(UniverseConfig::cosmic_dust())?;
//!     let mut clock = FrameClock::new().with_fixed_delta(1.0 / 60.0);
//!
//!     for _ in 0..600 {
//!         let now = clock.tick();
//!         universe.step(now);
//!     }
//!     universe.transition_to(PhaseId::GalaxyFormation, clock.elapsed());
//!
//!     let buffers = universe.buffers();
//!     println!("{} particles, mean radius {:.1}", buffers.count(), buffers.mean_radius());
//!     Ok(())
//! }
//! ```
//!
//! ## Phases
//!
//! | Phase | Formation |
//! |-------|-----------|
//! | [`PhaseId::Singularity`] | A boiling point that flashes white, then cools |
//! | [`PhaseId::QuarkGluonPlasma`] | A churning ball of three colored species |
//! | [`PhaseId::Inflation`] | A blue sphere that expands, then breathes |
//! | [`PhaseId::GalaxyFormation`] | A five-armed spiral with a bulging core |
//! | [`PhaseId::SolarSystem`] | A bright star with Keplerian orbits around it |
//!
//! Phases cycle in that order. [`Tour`] advances through them on a timer;
//! any phase can also be selected directly.
//!
//! ## Rendering
//!
//! The crate does not draw anything. [`Universe::buffers`] exposes flat
//! position, color, size and angle buffers (and `bytemuck` byte views) that
//! map directly onto vertex attributes.
//!
//! ## Audio
//!
//! [`AudioEngine`] keeps one set of oscillators per active phase and a master
//! gain for muting. Without the `playback` feature it can be rendered
//! headlessly into any buffer; with it, [`AudioOutput`](audio::AudioOutput)
//! streams to the default device through `cpal`.

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod integrator;
pub mod particle;
pub mod phase;
pub mod spawn;
pub mod starfield;
pub mod target;
pub mod time;
pub mod tour;
mod universe;

pub use audio::AudioEngine;
pub use bytemuck;
pub use config::{AudioConfig, UniverseConfig};
pub use controller::{PhaseController, PhaseListener};
pub use error::{AudioError, ConfigError, UnknownPhase};
pub use glam::Vec3;
pub use integrator::Integrator;
pub use particle::{FrameBuffers, Particle, ParticleStore, Seed};
pub use phase::{Phase, PhaseId};
pub use spawn::SpawnContext;
pub use starfield::StarField;
pub use target::{Jitter, Target, TargetFn, TargetInput, TargetRules};
pub use time::FrameClock;
pub use tour::Tour;
pub use universe::Universe;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use cosmogenesis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audio::AudioEngine;
    #[cfg(feature = "playback")]
    pub use crate::audio::AudioOutput;
    pub use crate::config::{AudioConfig, UniverseConfig};
    pub use crate::controller::{PhaseController, PhaseListener};
    pub use crate::error::{AudioError, ConfigError};
    pub use crate::phase::PhaseId;
    pub use crate::target::{Target, TargetInput, TargetRules};
    pub use crate::time::FrameClock;
    pub use crate::tour::Tour;
    pub use crate::universe::Universe;
    pub use crate::Vec3;
}
