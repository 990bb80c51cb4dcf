//! Particle store.
//!
//! Owns the per-particle persistent state (seed, position, momentum) and the
//! flat output buffers the renderer binds as vertex attributes.
//!
//! # Buffer layout
//!
//! | Buffer | Floats per particle | Index |
//! |--------|---------------------|-------|
//! | positions | 3 | `i * 3 + axis` |
//! | colors | 3 | `i * 3 + channel` |
//! | sizes | 1 | `i` |
//! | angles | 1 | `i` |
//!
//! Buffer lengths are fixed at construction. Only the
//! [`Integrator`](crate::integrator::Integrator) writes to them.

use crate::spawn::SpawnContext;
use glam::Vec3;

/// Immutable random parameters that give a particle its individual motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    /// Angular phase in `[0, 100)`.
    pub t: f32,
    /// Scale/shape parameter in `[20, 120)`.
    pub factor: f32,
    /// Uniform random in `[-0.5, 0.5)`.
    pub r1: f32,
    /// Uniform random in `[-0.5, 0.5)`.
    pub r2: f32,
    /// Uniform random in `[-0.5, 0.5)`.
    pub r3: f32,
    /// Sprite rotation in radians.
    pub angle: f32,
}

impl Seed {
    /// The three uniform randoms as a vector inside the cube `[-0.5, 0.5)³`.
    #[inline]
    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.r1, self.r2, self.r3)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            t: 0.0,
            factor: 20.0,
            r1: 0.0,
            r2: 0.0,
            r3: 0.0,
            angle: 0.0,
        }
    }
}

/// One simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub seed: Seed,
    /// Current rendered position.
    pub position: Vec3,
    /// Spring accumulator carried between frames.
    pub momentum: Vec3,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn at_rest(seed: Seed, position: Vec3) -> Self {
        Self {
            seed,
            position,
            momentum: Vec3::ZERO,
        }
    }
}

/// Fixed-size particle collection plus its output buffers.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    angles: Vec<f32>,
}

impl ParticleStore {
    /// Spawn `count` particles at random positions inside a cube of half-size `extent`.
    pub fn new(count: u32, extent: f32, base_seed: u64) -> Self {
        let particles = (0..count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, extent, base_seed);
                let seed = ctx.seed();
                let position = ctx.random_in_bounds();
                Particle::at_rest(seed, position)
            })
            .collect();
        Self::from_particles(particles)
    }

    /// Build a store around pre-made particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let n = particles.len();
        let mut store = Self {
            positions: vec![0.0; n * 3],
            colors: vec![1.0; n * 3],
            sizes: vec![1.0; n],
            angles: particles.iter().map(|p| p.seed.angle).collect(),
            particles,
        };
        for i in 0..n {
            let position = store.particles[i].position;
            store.positions[i * 3..i * 3 + 3].copy_from_slice(&position.to_array());
        }
        store
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Per-particle state, read-only.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub(crate) fn particle_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }

    /// Copy one particle's visible state into its buffer slots.
    pub(crate) fn write_slot(&mut self, index: usize, color: Vec3, size: f32) {
        let position = self.particles[index].position;
        let i3 = index * 3;
        self.positions[i3..i3 + 3].copy_from_slice(&position.to_array());
        self.colors[i3..i3 + 3].copy_from_slice(&color.to_array());
        self.sizes[index] = size;
    }

    /// Read-only view of the output buffers.
    pub fn buffers(&self) -> FrameBuffers<'_> {
        FrameBuffers {
            positions: &self.positions,
            colors: &self.colors,
            sizes: &self.sizes,
            angles: &self.angles,
        }
    }
}

/// Read-only snapshot of the output buffers for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuffers<'a> {
    positions: &'a [f32],
    colors: &'a [f32],
    sizes: &'a [f32],
    angles: &'a [f32],
}

impl<'a> FrameBuffers<'a> {
    /// Number of particles described by the buffers.
    #[inline]
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Assert that the renderer agrees on the particle count.
    ///
    /// A mismatch is a programming error; it trips in debug builds and the
    /// slices stay bounds-checked either way.
    #[inline]
    pub fn expect_count(&self, count: usize) -> &Self {
        debug_assert_eq!(
            self.count(),
            count,
            "renderer expects {} particles but the store holds {}",
            count,
            self.count()
        );
        self
    }

    /// Positions, 3 floats per particle.
    #[inline]
    pub fn positions(&self) -> &'a [f32] {
        self.positions
    }

    /// Colors, 3 floats per particle.
    #[inline]
    pub fn colors(&self) -> &'a [f32] {
        self.colors
    }

    /// Sizes, 1 float per particle.
    #[inline]
    pub fn sizes(&self) -> &'a [f32] {
        self.sizes
    }

    /// Static sprite rotations, 1 float per particle.
    #[inline]
    pub fn angles(&self) -> &'a [f32] {
        self.angles
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }

    pub fn size(&self, index: usize) -> f32 {
        self.sizes[index]
    }

    /// Raw bytes of the position buffer, ready for a GPU upload.
    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    /// Raw bytes of the color buffer.
    pub fn color_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.colors)
    }

    /// Raw bytes of the size buffer.
    pub fn size_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.sizes)
    }

    /// Mean distance of all positions from the origin.
    pub fn mean_radius(&self) -> f32 {
        if self.count() == 0 {
            return 0.0;
        }
        let total: f32 = (0..self.count()).map(|i| self.position(i).length()).sum();
        total / self.count() as f32
    }
}
