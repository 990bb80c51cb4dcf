//! Static background stars.
//!
//! Generated once and never mutated. The buffers use the same layout as the
//! particle buffers (3 floats per star for position and color) so a renderer
//! can draw both with one pipeline.

use crate::spawn::random_direction;
use glam::Vec3;
use rand::Rng;

/// Default number of background stars.
pub const DEFAULT_STAR_COUNT: u32 = 3_000;
/// Inner radius of the star shell.
pub const SHELL_INNER: f32 = 200.0;
/// Thickness of the star shell.
pub const SHELL_DEPTH: f32 = 200.0;

/// A fixed shell of faint, bluish stars.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl StarField {
    /// Scatter `count` stars with uniform direction on a shell of radius
    /// `[200, 400)`.
    pub fn generate<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Self {
        let n = count as usize;
        let mut positions = Vec::with_capacity(n * 3);
        let mut colors = Vec::with_capacity(n * 3);

        for _ in 0..n {
            let r = SHELL_INNER + rng.gen::<f32>() * SHELL_DEPTH;
            let direction = random_direction(&mut *rng);
            positions.extend_from_slice(&(direction * r).to_array());

            let brightness = rng.gen::<f32>();
            let tint = 0.8 + 0.2 * brightness;
            colors.extend_from_slice(&[tint, tint, 1.0]);
        }

        Self { positions, colors }
    }

    /// Number of stars.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Raw bytes for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}
