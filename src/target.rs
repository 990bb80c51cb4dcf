//! Target field generator.
//!
//! Each frame, every particle asks the active phase where it should be, what
//! color it should have and how big it should be. The answer is a [`Target`];
//! the [`Integrator`](crate::integrator::Integrator) then pulls the particle
//! toward it.
//!
//! Rules are plain functions collected in a [`TargetRules`] table indexed by
//! [`PhaseId`], so each one can be tested on its own or swapped out:
//!
//! ```ignore
//! let rules = TargetRules::default()
//!     .with_rule(PhaseId::Inflation, |input, _| Target {
//!         position: input.position * 1.01,
//!         color: Vec3::ONE,
//!         size: 4.0,
//!     });
//! ```
//!
//! # Jitter
//!
//! Rules are deterministic in their inputs, with one declared exception: the
//! singularity draws from the [`Jitter`] source every frame so the point
//! visibly boils. Every other rule ignores the jitter argument.

use crate::particle::Seed;
use crate::phase::PhaseId;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::f64::consts::TAU as TAU64;

/// Where a particle should go this frame, and how it should look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec3,
    /// RGB, 0.0-1.0.
    pub color: Vec3,
    pub size: f32,
}

/// Everything a rule may read about one particle.
#[derive(Debug, Clone, Copy)]
pub struct TargetInput {
    pub index: usize,
    pub count: usize,
    pub seed: Seed,
    /// Current position (used by the hold-still fallback).
    pub position: Vec3,
    /// Seconds since the active phase began.
    pub elapsed_in_phase: f32,
    /// Seconds since the simulation clock started. Kept in f64 so periodic
    /// motion stays smooth on long runs; rules reduce angles before narrowing.
    pub global_time: f64,
}

/// Explicit per-frame randomness for rules that declare jitter.
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: SmallRng,
}

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random vector inside the cube `[-0.5, 0.5)³`.
    #[inline]
    pub fn offset(&mut self) -> Vec3 {
        Vec3::new(self.unit() - 0.5, self.unit() - 0.5, self.unit() - 0.5)
    }
}

/// Signature shared by every phase rule.
pub type TargetFn = fn(&TargetInput, &mut Jitter) -> Target;

// ============================================================================
// Singularity
// ============================================================================

/// Side of the cube the singularity is squeezed into.
pub const SINGULARITY_SPREAD: f32 = 0.05;
/// Seconds of pure white flash at the start of the phase.
pub const SINGULARITY_FLASH: f32 = 0.2;
/// Seconds over which the color cools from orange to violet after the flash.
pub const SINGULARITY_COOLING: f32 = 1.5;
/// Smallest size the pulse can produce.
pub const SINGULARITY_SIZE_MIN: f32 = 10.0;
/// Upper bound (exclusive) on the pulse size.
pub const SINGULARITY_SIZE_MAX: f32 = 25.0;

const FLASH_WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const HOT_ORANGE: Vec3 = Vec3::new(1.0, 0.55, 0.15);
const VIOLET: Vec3 = Vec3::new(0.55, 0.3, 1.0);

/// A jittering, pulsing point at the origin.
pub fn singularity(input: &TargetInput, jitter: &mut Jitter) -> Target {
    let e = input.elapsed_in_phase;

    // Both offsets live in [-0.5, 0.5)³, so the blend does too.
    let position = (input.seed.offset() * 0.5 + jitter.offset() * 0.5) * SINGULARITY_SPREAD;

    let size = 15.0 + (e * 20.0).sin() * 5.0 + jitter.unit() * 5.0;

    let color = if e < SINGULARITY_FLASH {
        FLASH_WHITE
    } else {
        let s = ((e - SINGULARITY_FLASH) / SINGULARITY_COOLING).clamp(0.0, 1.0);
        HOT_ORANGE.lerp(VIOLET, s)
    };

    Target {
        position,
        color,
        size: size.clamp(SINGULARITY_SIZE_MIN, SINGULARITY_SIZE_MAX),
    }
}

// ============================================================================
// Quark-gluon plasma
// ============================================================================

/// Orbit radius of the plasma.
pub const PLASMA_RADIUS: f32 = 8.0;

/// Particle species, picked by `index % 3`.
pub const PLASMA_SPECIES: [Vec3; 3] = [
    Vec3::new(1.0, 0.1, 0.05),  // Red quark
    Vec3::new(1.0, 0.6, 0.05),  // Orange gluon
    Vec3::new(1.0, 0.95, 0.85), // White-hot
];

/// Independent Lissajous orbits, one frequency per axis.
pub fn quark_gluon_plasma(input: &TargetInput, _: &mut Jitter) -> Target {
    let seed = &input.seed;
    let t = seed.t as f64;
    let tau = input.global_time * 0.8;

    let position = Vec3::new(
        (t + tau).sin() as f32 * PLASMA_RADIUS + seed.r1,
        (t + tau * 0.9).cos() as f32 * PLASMA_RADIUS + seed.r2,
        (t + tau * 0.5).sin() as f32 * PLASMA_RADIUS + seed.r3,
    );

    Target {
        position,
        color: PLASMA_SPECIES[input.index % PLASMA_SPECIES.len()],
        size: 25.0,
    }
}

// ============================================================================
// Inflation
// ============================================================================

/// Shell radius when the phase begins.
pub const INFLATION_BASE_RADIUS: f32 = 30.0;
/// Radius gained per second of phase time.
pub const INFLATION_GROWTH: f32 = 1.5;
/// Cap on the accumulated growth.
pub const INFLATION_MAX_GROWTH: f32 = 15.0;

const INFLATION_BLUE: Vec3 = Vec3::new(0.05, 0.3, 0.8);

/// Radius of the inflating shell at a given moment.
pub fn inflation_radius(elapsed_in_phase: f32, global_time: f64) -> f32 {
    let growth = (elapsed_in_phase.max(0.0) * INFLATION_GROWTH).min(INFLATION_MAX_GROWTH);
    INFLATION_BASE_RADIUS + growth + (global_time * 0.2).sin() as f32 * 2.0
}

/// A breathing, slowly growing sphere shell.
pub fn inflation(input: &TargetInput, _: &mut Jitter) -> Target {
    let r = inflation_radius(input.elapsed_in_phase, input.global_time);
    let theta = input.seed.t;
    let phi = input.seed.factor;

    let position = Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    );

    // r1 in [-0.5, 0.5) -> brightness in [0.8, 1.2)
    let brightness = 1.0 + input.seed.r1 * 0.4;

    Target {
        position,
        color: (INFLATION_BLUE * brightness).min(Vec3::ONE),
        size: 30.0,
    }
}

// ============================================================================
// Galaxy formation
// ============================================================================

/// Number of spiral arms.
pub const GALAXY_ARMS: usize = 5;
/// Radius of the outermost particle.
pub const GALAXY_RADIUS: f32 = 45.0;
/// Inside this distance particles glow as the core.
pub const GALAXY_CORE: f32 = 5.0;
/// Beyond this distance there are no dust lanes.
pub const GALAXY_DUST_EDGE: f32 = 30.0;

const GALAXY_CORE_COLOR: Vec3 = Vec3::new(1.0, 0.9, 0.8);
const GALAXY_DUST_COLOR: Vec3 = Vec3::new(0.4, 0.2, 0.4);
const GALAXY_OUTER_COLOR: Vec3 = Vec3::new(0.3, 0.5, 0.9);

/// A rotating multi-arm spiral disk.
///
/// Distance grows with index so the disk is filled evenly; vertical spread
/// shrinks as `1 / (d + 1)`, flattening the outskirts.
pub fn galaxy_formation(input: &TargetInput, _: &mut Jitter) -> Target {
    let seed = &input.seed;
    let d = input.index as f32 / input.count.max(1) as f32 * GALAXY_RADIUS;
    let arm = (input.index % GALAXY_ARMS) as f32;
    let spin = (input.global_time * 0.1).rem_euclid(TAU64) as f32;
    let angle = d * 0.5 + spin + arm * (TAU / GALAXY_ARMS as f32);

    let position = Vec3::new(
        angle.cos() * d,
        seed.r1 * (50.0 / (d + 1.0)),
        angle.sin() * d,
    );

    let color = if d < GALAXY_CORE {
        GALAXY_CORE_COLOR
    } else if d < GALAXY_DUST_EDGE && seed.r2 > 0.2 {
        GALAXY_DUST_COLOR
    } else {
        GALAXY_OUTER_COLOR
    };

    Target {
        position,
        color,
        size: 18.0 + seed.factor % 10.0,
    }
}

// ============================================================================
// Solar system
// ============================================================================

/// Share of particles (lowest indices) that form the star.
pub const STAR_FRACTION: f32 = 0.05;

const STAR_COLOR: Vec3 = Vec3::new(1.0, 0.6, 0.1);
const ROCKY_COLOR: Vec3 = Vec3::new(0.55, 0.35, 0.2);
const TRANSITION_COLOR: Vec3 = Vec3::new(0.8, 0.52, 0.25);
const ICY_COLOR: Vec3 = Vec3::new(0.68, 0.85, 0.9);

/// Whether `index` belongs to the central star.
#[inline]
pub fn is_star(index: usize, count: usize) -> bool {
    (index as f32) < count as f32 * STAR_FRACTION
}

/// Orbit radius for a seed factor, in `[10, 40)`.
#[inline]
pub fn orbit_radius(factor: f32) -> f32 {
    10.0 + (factor - 20.0).max(0.0) * 0.3
}

/// Angular speed (rad/s) at an orbit radius. Inner orbits are faster.
#[inline]
pub fn orbit_speed(radius: f32) -> f32 {
    20.0 / radius.max(1.0).powf(1.5)
}

/// A bright central star with a Keplerian-ordered disk around it.
pub fn solar_system(input: &TargetInput, _: &mut Jitter) -> Target {
    let seed = &input.seed;

    if is_star(input.index, input.count) {
        return Target {
            position: seed.offset(),
            color: STAR_COLOR,
            size: 80.0,
        };
    }

    let radius = orbit_radius(seed.factor);
    let travelled = input.global_time * orbit_speed(radius) as f64;
    let angle = (seed.t as f64 + travelled).rem_euclid(TAU64) as f32;

    let color = if radius < 20.0 {
        ROCKY_COLOR
    } else if radius < 30.0 {
        TRANSITION_COLOR
    } else {
        ICY_COLOR
    };

    Target {
        position: Vec3::new(angle.cos() * radius, seed.r1, angle.sin() * radius),
        color,
        size: 8.0,
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Target for a particle whose phase is unknown: stay put.
pub fn hold_still(input: &TargetInput) -> Target {
    Target {
        position: input.position,
        color: Vec3::ONE,
        size: 1.0,
    }
}

/// Whether a phase's rule draws from the jitter source.
pub fn declares_jitter(phase: PhaseId) -> bool {
    matches!(phase, PhaseId::Singularity)
}

/// Table mapping each phase to its rule.
#[derive(Clone, Copy)]
pub struct TargetRules {
    table: [TargetFn; PhaseId::COUNT],
}

impl TargetRules {
    /// The rule used for `phase`.
    #[inline]
    pub fn rule(&self, phase: PhaseId) -> TargetFn {
        self.table[phase.index()]
    }

    /// Replace the rule for one phase.
    pub fn with_rule(mut self, phase: PhaseId, rule: TargetFn) -> Self {
        self.table[phase.index()] = rule;
        self
    }

    /// Compute a target. `None` stands for a phase id that did not resolve;
    /// the particle holds still.
    #[inline]
    pub fn compute(
        &self,
        phase: Option<PhaseId>,
        input: &TargetInput,
        jitter: &mut Jitter,
    ) -> Target {
        match phase {
            Some(id) => self.rule(id)(input, jitter),
            None => hold_still(input),
        }
    }
}

impl Default for TargetRules {
    fn default() -> Self {
        let mut table: [TargetFn; PhaseId::COUNT] = [singularity as TargetFn; PhaseId::COUNT];
        table[PhaseId::QuarkGluonPlasma.index()] = quark_gluon_plasma;
        table[PhaseId::Inflation.index()] = inflation;
        table[PhaseId::GalaxyFormation.index()] = galaxy_formation;
        table[PhaseId::SolarSystem.index()] = solar_system;
        Self { table }
    }
}

impl std::fmt::Debug for TargetRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetRules").finish_non_exhaustive()
    }
}

/// Compute a target with the canonical rule set.
pub fn compute_target(
    phase: Option<PhaseId>,
    input: &TargetInput,
    jitter: &mut Jitter,
) -> Target {
    TargetRules::default().compute(phase, input, jitter)
}
