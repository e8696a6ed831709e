//! Particle buffers and the GPU sprite record.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// An ordered set of particles with parallel position and color arrays.
///
/// The particle count is fixed when the buffer is generated. Mutable access
/// hands out slices, so a buffer can be rewritten in place every frame but
/// never grown, shrunk or reordered. Every mutable borrow marks the buffer
/// dirty; the render backend clears the flag with [`take_dirty`](Self::take_dirty)
/// when it re-uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    dirty: bool,
}

impl ParticleBuffer {
    pub(crate) fn from_parts(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        assert_eq!(
            positions.len(),
            colors.len(),
            "particle positions and colors must have equal cardinality"
        );
        Self {
            positions,
            colors,
            dirty: true,
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Mutable positions. Marks the buffer dirty.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        self.dirty = true;
        &mut self.positions
    }

    /// Mutable colors. Marks the buffer dirty.
    #[inline]
    pub fn colors_mut(&mut self) -> &mut [Vec3] {
        self.dirty = true;
        &mut self.colors
    }

    /// Whether the buffer changed since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Positions as a flat `[x0, y0, z0, x1, ...]` array of length `3 * len`.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Colors as a flat `[r0, g0, b0, r1, ...]` array of length `3 * len`.
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Append one sprite per particle, transformed into world space.
    pub fn write_sprites(&self, model: Mat4, size: f32, alpha: f32, out: &mut Vec<SpriteInstance>) {
        out.reserve(self.len());
        for (position, color) in self.positions.iter().zip(&self.colors) {
            out.push(SpriteInstance::new(
                model.transform_point3(*position),
                size,
                *color,
                alpha,
            ));
        }
    }
}

/// One billboard drawn by the preview backend.
///
/// Layout matches the instance attributes of the `particle_sprite` shader
/// pair: position at offset 0, size at 12, color at 16, alpha at 28.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

impl SpriteInstance {
    pub fn new(position: Vec3, size: f32, color: Vec3, alpha: f32) -> Self {
        Self {
            position: position.to_array(),
            size,
            color: color.to_array(),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParticleBuffer {
        ParticleBuffer::from_parts(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::ONE, Vec3::ZERO, Vec3::splat(0.5)],
        )
    }

    #[test]
    fn test_flat_views_have_three_floats_per_particle() {
        let buffer = sample();
        assert_eq!(buffer.flat_positions().len(), 9);
        assert_eq!(buffer.flat_colors().len(), 9);
        assert_eq!(buffer.flat_positions()[3], 1.0);
    }

    #[test]
    fn test_dirty_flag_tracks_mutation() {
        let mut buffer = sample();
        assert!(buffer.take_dirty());
        assert!(!buffer.is_dirty());

        buffer.positions_mut()[0].y = 2.0;
        assert!(buffer.is_dirty());
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
    }

    #[test]
    #[should_panic]
    fn test_mismatched_cardinality_panics() {
        ParticleBuffer::from_parts(vec![Vec3::ZERO], vec![]);
    }

    #[test]
    fn test_write_sprites_applies_model() {
        let buffer = sample();
        let mut out = Vec::new();
        buffer.write_sprites(Mat4::from_translation(Vec3::Z), 0.02, 0.8, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].position, [1.0, 0.0, 1.0]);
        assert_eq!(out[2].color, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_sprite_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
    }
}
