//! Damped-spring particle integrator.
//!
//! Each frame a particle's momentum is pulled toward its target, damped,
//! and added to its position:
//!
//! ```text
//! momentum += (target - position) * attraction
//! momentum *= damping
//! position += momentum
//! ```
//!
//! The defaults (`0.02`, `0.9`) give a lagging, slightly overshooting follow
//! that settles within a few seconds at 60 frames per second. Color and size
//! are not smoothed; they are copied straight from the target.
//!
//! # Frame rate
//!
//! The constants are per-frame multipliers, so convergence speed depends on
//! the frame rate. Set a [`reference_rate`](Integrator::with_reference_rate)
//! to rescale them by the real frame delta instead.

use crate::particle::{Particle, ParticleStore};
use crate::target::Target;
use glam::Vec3;

/// Default pull toward the target per frame.
pub const DEFAULT_ATTRACTION: f32 = 0.02;
/// Default momentum retained per frame.
pub const DEFAULT_DAMPING: f32 = 0.9;

/// Advances particles toward their targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    attraction: f32,
    damping: f32,
    reference_rate: Option<f32>,
}

impl Integrator {
    /// Create an integrator with the default constants, in per-frame mode.
    pub fn new() -> Self {
        Self {
            attraction: DEFAULT_ATTRACTION,
            damping: DEFAULT_DAMPING,
            reference_rate: None,
        }
    }

    /// Set the attraction constant.
    pub fn with_attraction(mut self, attraction: f32) -> Self {
        self.attraction = attraction;
        self
    }

    /// Set the damping constant (momentum kept per frame, 0.0-1.0).
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Interpret the constants as tuned for `rate` frames per second and
    /// rescale them by each frame's delta. `None` restores per-frame mode.
    pub fn with_reference_rate(mut self, rate: Option<f32>) -> Self {
        self.reference_rate = rate.filter(|r| *r > 0.0);
        self
    }

    #[inline]
    pub fn attraction(&self) -> f32 {
        self.attraction
    }

    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    #[inline]
    pub fn reference_rate(&self) -> Option<f32> {
        self.reference_rate
    }

    /// Constants for a frame lasting `dt` seconds.
    fn coefficients(&self, dt: f32) -> (f32, f32) {
        match self.reference_rate {
            None => (self.attraction, self.damping),
            Some(rate) => {
                let frames = (dt * rate).max(0.0);
                (self.attraction * frames, self.damping.powf(frames))
            }
        }
    }

    /// Advance one particle one frame toward `target`.
    #[inline]
    pub fn advance(&self, particle: &mut Particle, target: Vec3, dt: f32) {
        let (attraction, damping) = self.coefficients(dt);
        particle.momentum += (target - particle.position) * attraction;
        particle.momentum *= damping;
        particle.position += particle.momentum;
    }

    /// Advance every particle in the store and write the output buffers.
    ///
    /// `target_of` is called once per particle, in index order, with the
    /// particle's state before it moves.
    pub fn integrate<F>(&self, store: &mut ParticleStore, dt: f32, mut target_of: F)
    where
        F: FnMut(usize, &Particle) -> Target,
    {
        for i in 0..store.len() {
            let particle = store.particle_mut(i);
            let target = target_of(i, particle);
            self.advance(particle, target.position, dt);
            store.write_slot(i, target.color, target.size);
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}
