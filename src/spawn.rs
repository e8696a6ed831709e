//! Procedural particle placement.
//!
//! A [`FieldRule`] describes how particle `i` of `N` is positioned and
//! colored. [`generate`] turns a rule into a fresh [`ParticleBuffer`].
//!
//! ```ignore
//! use folio_fx::spawn::{generate, FieldRule};
//!
//! let galaxy = generate(&FieldRule::spiral(), 2000);
//! let shell = generate(&FieldRule::spherical(), 1000);
//! let sea = generate(&FieldRule::grid_wave(), 2000);
//! ```
//!
//! Rules that use randomness draw fresh entropy on every call. Use
//! [`generate_seeded`] for a reproducible buffer.

use crate::buffer::ParticleBuffer;
use crate::color::{hsl_to_rgb, hue_of, palette, rgb, saturate};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// The golden ratio, `(1 + sqrt(5)) / 2`.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Procedural placement rule for a particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// Golden-ratio spiral in the XY plane with random depth.
    ///
    /// `theta = i * phi * 2pi`, `r = sqrt(i) * spacing`; hue follows `i / N`.
    Spiral {
        /// Radius scale `k`.
        spacing: f32,
        /// Width of the uniform z noise band, centered on 0.
        jitter: f32,
        saturation: f32,
        lightness: f32,
    },

    /// Uniform directions on a sphere with radius drawn from a band.
    ///
    /// The polar angle uses `acos(2u - 1)` so particles do not cluster at
    /// the poles.
    Spherical {
        min_radius: f32,
        max_radius: f32,
        /// Hue the particle colors vary around, 0-1.
        base_hue: f32,
        /// Total width of the random hue offset.
        hue_spread: f32,
        lightness_min: f32,
        lightness_max: f32,
    },

    /// A grid in the XZ plane lifted by `sin(x * a) * cos(z * b) * amplitude`.
    ///
    /// Colors are a linear remap of the height into a teal band.
    GridWave {
        /// Particles per row.
        width: u32,
        spacing: f32,
        /// Coordinate of the first row and column.
        origin: f32,
        freq_x: f32,
        freq_z: f32,
        amplitude: f32,
        /// Width of the uniform noise added to each axis.
        jitter: f32,
    },

    /// Uniform in an axis-aligned box centered at the origin, single color.
    Box { extents: Vec3, color: Vec3 },
}

impl FieldRule {
    /// Spiral with the hero background's settings.
    pub fn spiral() -> Self {
        FieldRule::Spiral {
            spacing: 0.1,
            jitter: 2.0,
            saturation: 0.7,
            lightness: 0.6,
        }
    }

    /// Spherical shell with the floating particle system's settings.
    pub fn spherical() -> Self {
        FieldRule::Spherical {
            min_radius: 5.0,
            max_radius: 15.0,
            base_hue: hue_of(rgb(palette::CYAN)),
            hue_spread: 0.1,
            lightness_min: 0.5,
            lightness_max: 1.0,
        }
    }

    /// Wave sheet with the particle wave background's settings.
    pub fn grid_wave() -> Self {
        FieldRule::GridWave {
            width: 100,
            spacing: 0.1,
            origin: -5.0,
            freq_x: 0.5,
            freq_z: 0.5,
            amplitude: 2.0,
            jitter: 0.1,
        }
    }

    /// The 4 x 3 x 2 amber box used by the quantum field card.
    pub fn quantum_box() -> Self {
        FieldRule::Box {
            extents: Vec3::new(4.0, 3.0, 2.0),
            color: rgb(palette::AMBER),
        }
    }

    /// Distance from the spiral axis of particle `index`.
    ///
    /// Returns `None` for non-spiral rules.
    pub fn spiral_radius(&self, index: usize) -> Option<f64> {
        match *self {
            FieldRule::Spiral { spacing, .. } => Some((index as f64).sqrt() * spacing as f64),
            _ => None,
        }
    }

    /// Height of the undisturbed wave sheet at `(x, z)`.
    ///
    /// Returns `None` for non-wave rules.
    pub fn wave_height(&self, x: f32, z: f32) -> Option<f32> {
        match *self {
            FieldRule::GridWave {
                freq_x,
                freq_z,
                amplitude,
                ..
            } => Some((x * freq_x).sin() * (z * freq_z).cos() * amplitude),
            _ => None,
        }
    }

    fn place(&self, ctx: &mut SpawnContext<'_>) -> (Vec3, Vec3) {
        match *self {
            FieldRule::Spiral {
                spacing,
                jitter,
                saturation,
                lightness,
            } => {
                let i = ctx.index as f64;
                let theta = (i * GOLDEN_RATIO * TAU).rem_euclid(TAU);
                let radius = i.sqrt() * spacing as f64;
                let position = Vec3::new(
                    (radius * theta.cos()) as f32,
                    (radius * theta.sin()) as f32,
                    ctx.centered(jitter),
                );
                let color = hsl_to_rgb(ctx.progress(), saturation, lightness);
                (position, color)
            }
            FieldRule::Spherical {
                min_radius,
                max_radius,
                base_hue,
                hue_spread,
                lightness_min,
                lightness_max,
            } => {
                let radius = ctx.random_range(min_radius, max_radius);
                let position = ctx.random_on_sphere(radius);
                let hue = base_hue + ctx.centered(hue_spread);
                let lightness = ctx.random_range(lightness_min, lightness_max);
                (position, hsl_to_rgb(hue, 1.0, lightness))
            }
            FieldRule::GridWave {
                width,
                spacing,
                origin,
                freq_x,
                freq_z,
                amplitude,
                jitter,
            } => {
                let width = width.max(1) as usize;
                let x = (ctx.index % width) as f32 * spacing + origin;
                let z = (ctx.index / width) as f32 * spacing + origin;
                let y = (x * freq_x).sin() * (z * freq_z).cos() * amplitude;

                let position = Vec3::new(
                    x + ctx.centered(jitter),
                    y + ctx.centered(jitter),
                    z + ctx.centered(jitter),
                );

                let intensity = if amplitude.abs() > f32::EPSILON {
                    ((y + amplitude.abs()) / (2.0 * amplitude.abs())).clamp(0.0, 1.0)
                } else {
                    0.5
                };
                let color = Vec3::new(
                    0.3 + intensity * 0.4,
                    0.7 + intensity * 0.3,
                    0.7 + intensity * 0.2,
                );
                (position, color)
            }
            FieldRule::Box { extents, color } => {
                let position = Vec3::new(
                    ctx.centered(extents.x),
                    ctx.centered(extents.y),
                    ctx.centered(extents.z),
                );
                (position, color)
            }
        }
    }
}

/// Generate `count` particles from `rule` using fresh entropy.
pub fn generate(rule: &FieldRule, count: usize) -> ParticleBuffer {
    generate_with(rule, count, &mut SmallRng::from_entropy())
}

/// Generate `count` particles from `rule` with a reproducible seed.
pub fn generate_seeded(rule: &FieldRule, count: usize, seed: u64) -> ParticleBuffer {
    generate_with(rule, count, &mut SmallRng::seed_from_u64(seed))
}

/// Generate `count` particles from `rule`, drawing randomness from `rng`.
pub fn generate_with(rule: &FieldRule, count: usize, rng: &mut SmallRng) -> ParticleBuffer {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for index in 0..count {
        let mut ctx = SpawnContext::new(index, count, rng);
        let (position, color) = rule.place(&mut ctx);
        positions.push(position);
        colors.push(saturate(color));
    }

    ParticleBuffer::from_parts(positions, colors)
}

/// RNG for an entity: seeded when a seed is configured, entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Per-particle context with helpers for common spawn patterns.
pub struct SpawnContext<'a> {
    /// Index of the particle being placed (0 to count-1).
    pub index: usize,
    /// Total number of particles being placed.
    pub count: usize,
    rng: &'a mut SmallRng,
}

impl<'a> SpawnContext<'a> {
    pub fn new(index: usize, count: usize, rng: &'a mut SmallRng) -> Self {
        Self { index, count, rng }
    }

    /// Normalized progress through the field (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.index as f32 / self.count as f32
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random f32 in `[-extent / 2, extent / 2)`.
    #[inline]
    pub fn centered(&mut self, extent: f32) -> f32 {
        (self.rng.gen::<f32>() - 0.5) * extent
    }

    /// Random point on a sphere of given radius, uniform over the surface.
    pub fn random_on_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let phi = (self.rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();

        Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }

    /// Random point inside an axis-aligned box centered at the origin.
    pub fn random_in_box(&mut self, extents: Vec3) -> Vec3 {
        Vec3::new(
            self.centered(extents.x),
            self.centered(extents.y),
            self.centered(extents.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: [fn() -> FieldRule; 4] = [
        FieldRule::spiral,
        FieldRule::spherical,
        FieldRule::grid_wave,
        FieldRule::quantum_box,
    ];

    #[test]
    fn test_flat_arrays_are_three_per_particle() {
        for make in RULES {
            let buffer = generate_seeded(&make(), 500, 7);
            assert_eq!(buffer.flat_positions().len(), 1500);
            assert_eq!(buffer.flat_colors().len(), 1500);
        }
    }

    #[test]
    fn test_color_channels_in_unit_range() {
        for make in RULES {
            let buffer = generate(&make(), 1000);
            for c in buffer.flat_colors() {
                assert!((0.0..=1.0).contains(&c), "channel {} out of range", c);
            }
        }
    }

    #[test]
    fn test_spiral_starts_at_axis_and_grows() {
        let rule = FieldRule::spiral();
        let buffer = generate_seeded(&rule, 400, 1);
        let first = buffer.positions()[0];
        assert_eq!((first.x, first.y), (0.0, 0.0));

        let mut previous = 0.0_f64;
        for (i, p) in buffer.positions().iter().enumerate() {
            let r = ((p.x as f64).powi(2) + (p.y as f64).powi(2)).sqrt();
            assert!(r + 1e-6 >= previous, "radius shrank at {}", i);
            previous = r;
        }
    }

    #[test]
    fn test_spiral_depth_stays_in_jitter_band() {
        let buffer = generate(&FieldRule::spiral(), 2000);
        for p in buffer.positions() {
            assert!(p.z >= -1.0 && p.z < 1.0);
        }
    }

    #[test]
    fn test_spherical_radius_band() {
        let FieldRule::Spherical {
            min_radius,
            max_radius,
            ..
        } = FieldRule::spherical()
        else {
            unreachable!()
        };

        let buffer = generate(&FieldRule::spherical(), 20_000);
        let inside = buffer
            .positions()
            .iter()
            .filter(|p| {
                let d = p.length();
                d >= min_radius - 1e-3 && d <= max_radius + 1e-3
            })
            .count();
        assert!(inside as f64 / buffer.len() as f64 >= 0.99);
    }

    #[test]
    fn test_spherical_has_no_pole_clustering() {
        // Uniform on the sphere means z/r is uniform in [-1, 1].
        let buffer = generate_seeded(&FieldRule::spherical(), 20_000, 3);
        let near_poles = buffer
            .positions()
            .iter()
            .filter(|p| (p.z / p.length()).abs() > 0.9)
            .count();
        let fraction = near_poles as f64 / buffer.len() as f64;
        assert!((fraction - 0.1).abs() < 0.02, "pole fraction {}", fraction);
    }

    #[test]
    fn test_grid_wave_rows_and_height() {
        let rule = FieldRule::GridWave {
            width: 10,
            spacing: 1.0,
            origin: 0.0,
            freq_x: 0.5,
            freq_z: 0.5,
            amplitude: 2.0,
            jitter: 0.0,
        };
        let buffer = generate_seeded(&rule, 25, 0);
        let p = buffer.positions()[13];
        assert_eq!(p.x, 3.0);
        assert_eq!(p.z, 1.0);
        let expected = rule.wave_height(3.0, 1.0).unwrap();
        assert!((p.y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_grid_wave_color_tracks_height() {
        let rule = FieldRule::GridWave {
            width: 100,
            spacing: 0.1,
            origin: -5.0,
            freq_x: 0.5,
            freq_z: 0.5,
            amplitude: 2.0,
            jitter: 0.0,
        };
        let buffer = generate_seeded(&rule, 2000, 0);
        let (lowest, highest) = buffer
            .positions()
            .iter()
            .enumerate()
            .fold((0, 0), |(lo, hi), (i, p)| {
                let lo = if p.y < buffer.positions()[lo].y { i } else { lo };
                let hi = if p.y > buffer.positions()[hi].y { i } else { hi };
                (lo, hi)
            });
        assert!(buffer.colors()[highest].x > buffer.colors()[lowest].x);
    }

    #[test]
    fn test_box_stays_inside_extents() {
        let buffer = generate(&FieldRule::quantum_box(), 1000);
        for p in buffer.positions() {
            assert!(p.x.abs() <= 2.0 && p.y.abs() <= 1.5 && p.z.abs() <= 1.0);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_seeded(&FieldRule::spherical(), 100, 42);
        let b = generate_seeded(&FieldRule::spherical(), 100, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_field() {
        let buffer = generate(&FieldRule::spiral(), 0);
        assert!(buffer.is_empty());
    }
}
