//! Point-cloud effects: each owns one [`ParticleBuffer`] and rewrites it in
//! place every frame.

use crate::buffer::{ParticleBuffer, SpriteInstance};
use crate::motion::{Spin, Wave, REFERENCE_FPS};
use crate::scene::{Animated, Transform};
use crate::spawn::{generate_with, make_rng, FieldRule};
use glam::Vec3;
use std::f64::consts::TAU;

/// Configuration for [`ParticleField`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleFieldConfig {
    pub count: usize,
    pub rule: FieldRule,
    /// Depth wobble amplitude.
    pub wobble: f32,
    /// Wobble phase step between consecutive particles.
    pub wobble_phase_step: f32,
    /// Rocking rotation about X.
    pub tilt: Wave,
    /// Y rotation per reference frame.
    pub spin_per_frame: f32,
    pub point_size: f32,
    pub opacity: f32,
    pub seed: Option<u64>,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            rule: FieldRule::spiral(),
            wobble: 0.1,
            wobble_phase_step: 3.0,
            tilt: Wave::oscillate(0.1, 0.1),
            spin_per_frame: 0.002,
            point_size: 0.005,
            opacity: 1.0,
            seed: None,
        }
    }
}

/// Golden-spiral galaxy behind the hero section.
///
/// Every particle's depth is replaced each frame by
/// `sin(t + i * step) * wobble`; the whole cloud rocks about X and spins
/// about Y.
pub struct ParticleField {
    config: ParticleFieldConfig,
    buffer: ParticleBuffer,
    spin: Spin,
    tilt: f32,
}

impl ParticleField {
    pub fn new(config: ParticleFieldConfig) -> Self {
        let buffer = generate_with(&config.rule, config.count, &mut make_rng(config.seed));
        let spin = Spin::per_frame(Vec3::new(0.0, config.spin_per_frame, 0.0));
        Self {
            config,
            buffer,
            spin,
            tilt: 0.0,
        }
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ParticleBuffer {
        &mut self.buffer
    }

    pub fn transform(&self) -> Transform {
        Transform {
            rotation: Vec3::new(self.tilt, self.spin.angle().y, 0.0),
            ..Transform::IDENTITY
        }
    }
}

impl Animated for ParticleField {
    fn name(&self) -> &str {
        "particle-field"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        if self.buffer.is_empty() {
            return;
        }

        self.spin.advance(delta);
        self.tilt = self.config.tilt.value(elapsed);

        let step = self.config.wobble_phase_step as f64;
        let wobble = self.config.wobble;
        for (i, p) in self.buffer.positions_mut().iter_mut().enumerate() {
            let arg = (elapsed + i as f64 * step).rem_euclid(TAU);
            p.z = arg.sin() as f32 * wobble;
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        self.buffer.write_sprites(
            self.transform().matrix(),
            self.config.point_size,
            self.config.opacity,
            out,
        );
    }
}

/// Configuration for [`ParticleCloud`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleCloudConfig {
    pub count: usize,
    pub rule: FieldRule,
    /// Rotation per reference frame on each axis.
    pub spin_per_frame: Vec3,
    pub point_size: f32,
    pub opacity: f32,
    pub seed: Option<u64>,
}

impl Default for ParticleCloudConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            rule: FieldRule::spherical(),
            spin_per_frame: Vec3::new(0.0005, 0.001, 0.0),
            point_size: 0.02,
            opacity: 0.8,
            seed: None,
        }
    }
}

/// Slowly turning spherical shell of cyan particles.
pub struct ParticleCloud {
    config: ParticleCloudConfig,
    buffer: ParticleBuffer,
    spin: Spin,
}

impl ParticleCloud {
    pub fn new(config: ParticleCloudConfig) -> Self {
        let buffer = generate_with(&config.rule, config.count, &mut make_rng(config.seed));
        let spin = Spin::per_frame(config.spin_per_frame);
        Self {
            config,
            buffer,
            spin,
        }
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn rotation(&self) -> Vec3 {
        self.spin.angle()
    }
}

impl Animated for ParticleCloud {
    fn name(&self) -> &str {
        "particle-cloud"
    }

    fn advance(&mut self, _elapsed: f64, delta: f32) {
        self.spin.advance(delta);
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let transform = Transform {
            rotation: self.spin.angle(),
            ..Transform::IDENTITY
        };
        self.buffer.write_sprites(
            transform.matrix(),
            self.config.point_size,
            self.config.opacity,
            out,
        );
    }
}

/// Configuration for [`ParticleWave`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleWaveConfig {
    pub count: usize,
    pub rule: FieldRule,
    /// Spatial frequency of the travelling wave along X and Z.
    pub frequency: f32,
    pub amplitude: f32,
    /// Temporal frequency on the Z term relative to the X term.
    pub z_time_ratio: f32,
    /// Y rotation in radians per second.
    pub turn_rate: f32,
    pub point_size: f32,
    pub opacity: f32,
    pub seed: Option<u64>,
}

impl Default for ParticleWaveConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            rule: FieldRule::grid_wave(),
            frequency: 0.5,
            amplitude: 2.0,
            z_time_ratio: 0.5,
            turn_rate: 0.1,
            point_size: 0.02,
            opacity: 0.8,
            seed: None,
        }
    }
}

/// A sheet of particles riding a travelling sine wave.
///
/// Heights are recomputed from each particle's own X and Z every frame:
/// `y = sin(x * f + t) * cos(z * f + t * r) * amplitude`. Colors keep the
/// gradient assigned at spawn.
pub struct ParticleWave {
    config: ParticleWaveConfig,
    buffer: ParticleBuffer,
    turn: f32,
}

impl ParticleWave {
    pub fn new(config: ParticleWaveConfig) -> Self {
        let buffer = generate_with(&config.rule, config.count, &mut make_rng(config.seed));
        Self {
            config,
            buffer,
            turn: 0.0,
        }
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Wave height at `(x, z)` and time `t`.
    pub fn height(&self, x: f32, z: f32, t: f64) -> f32 {
        let f = self.config.frequency as f64;
        let a = (x as f64 * f + t).rem_euclid(TAU);
        let b = (z as f64 * f + t * self.config.z_time_ratio as f64).rem_euclid(TAU);
        (a.sin() * b.cos()) as f32 * self.config.amplitude
    }

    pub fn turn(&self) -> f32 {
        self.turn
    }
}

impl Animated for ParticleWave {
    fn name(&self) -> &str {
        "particle-wave"
    }

    fn advance(&mut self, elapsed: f64, _delta: f32) {
        if self.buffer.is_empty() {
            return;
        }

        self.turn = (elapsed * self.config.turn_rate as f64).rem_euclid(TAU) as f32;

        let f = self.config.frequency as f64;
        let ratio = self.config.z_time_ratio as f64;
        let amplitude = self.config.amplitude;
        for p in self.buffer.positions_mut() {
            let a = (p.x as f64 * f + elapsed).rem_euclid(TAU);
            let b = (p.z as f64 * f + elapsed * ratio).rem_euclid(TAU);
            p.y = (a.sin() * b.cos()) as f32 * amplitude;
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let transform = Transform {
            rotation: Vec3::new(0.0, self.turn, 0.0),
            ..Transform::IDENTITY
        };
        self.buffer.write_sprites(
            transform.matrix(),
            self.config.point_size,
            self.config.opacity,
            out,
        );
    }
}

/// Configuration for [`QuantumField`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumFieldConfig {
    pub count: usize,
    pub rule: FieldRule,
    /// Drift added per reference frame on each axis, before the sine factor.
    pub drift_per_frame: Vec3,
    pub point_size: f32,
    pub opacity: f32,
    pub seed: Option<u64>,
}

impl Default for QuantumFieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            rule: FieldRule::quantum_box(),
            drift_per_frame: Vec3::new(0.002, 0.002, 0.001),
            point_size: 0.02,
            opacity: 0.6,
            seed: None,
        }
    }
}

/// Amber particles wandering inside a box.
///
/// Unlike the other fields the motion accumulates: each frame adds a small
/// sinusoidal step per axis whose phase depends on the particle index.
pub struct QuantumField {
    config: QuantumFieldConfig,
    buffer: ParticleBuffer,
}

impl QuantumField {
    pub fn new(config: QuantumFieldConfig) -> Self {
        let buffer = generate_with(&config.rule, config.count, &mut make_rng(config.seed));
        Self { config, buffer }
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }
}

impl Animated for QuantumField {
    fn name(&self) -> &str {
        "quantum-field"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        if self.buffer.is_empty() {
            return;
        }

        let frames = delta * REFERENCE_FPS;
        let drift = self.config.drift_per_frame * frames;
        for (i, p) in self.buffer.positions_mut().iter_mut().enumerate() {
            // Phases follow the flat array offset of each axis.
            let k = (i * 3) as f64;
            p.x += (elapsed + k).rem_euclid(TAU).sin() as f32 * drift.x;
            p.y += (elapsed + k * 0.5).rem_euclid(TAU).cos() as f32 * drift.y;
            p.z += (elapsed * 0.5 + k * 0.3).rem_euclid(TAU).sin() as f32 * drift.z;
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        self.buffer.write_sprites(
            Transform::IDENTITY.matrix(),
            self.config.point_size,
            self.config.opacity,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wobble_replaces_depth() {
        let mut field = ParticleField::new(ParticleFieldConfig {
            count: 50,
            seed: Some(9),
            ..Default::default()
        });
        let xy_before: Vec<_> = field.buffer().positions().iter().map(|p| p.truncate()).collect();

        field.advance(1.25, 1.0 / 60.0);
        for (i, p) in field.buffer().positions().iter().enumerate() {
            let expected = (1.25 + 3.0 * i as f64).sin() as f32 * 0.1;
            assert!((p.z - expected).abs() < 1e-5);
            assert_eq!(p.truncate(), xy_before[i]);
        }
    }

    #[test]
    fn test_field_tilt_and_spin() {
        let mut field = ParticleField::new(ParticleFieldConfig {
            count: 10,
            ..Default::default()
        });
        for frame in 1..=60 {
            field.advance(frame as f64 / 60.0, 1.0 / 60.0);
        }
        let rotation = field.transform().rotation;
        assert!((rotation.x - (0.1_f32).sin() * 0.1).abs() < 1e-5);
        assert!((rotation.y - 0.12).abs() < 1e-4);
    }

    #[test]
    fn test_wave_heights_follow_formula() {
        let mut wave = ParticleWave::new(ParticleWaveConfig {
            count: 300,
            seed: Some(1),
            ..Default::default()
        });
        wave.advance(2.0, 1.0 / 60.0);
        for p in wave.buffer().positions() {
            let expected = (p.x * 0.5 + 2.0).sin() * (p.z * 0.5 + 1.0).cos() * 2.0;
            assert!((p.y - expected).abs() < 1e-4);
        }
        assert!((wave.turn() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_wave_keeps_colors() {
        let mut wave = ParticleWave::new(ParticleWaveConfig {
            count: 100,
            seed: Some(2),
            ..Default::default()
        });
        let colors = wave.buffer().colors().to_vec();
        wave.advance(5.0, 0.016);
        assert_eq!(wave.buffer().colors(), &colors[..]);
    }

    #[test]
    fn test_cloud_only_rotates() {
        let mut cloud = ParticleCloud::new(ParticleCloudConfig {
            count: 64,
            seed: Some(4),
            ..Default::default()
        });
        let before = cloud.buffer().clone();
        cloud.advance(1.0, 1.0);
        assert_eq!(cloud.buffer().positions(), before.positions());
        assert!((cloud.rotation().y - 0.06).abs() < 1e-5);
    }

    #[test]
    fn test_quantum_drift_is_small_per_frame() {
        let mut field = QuantumField::new(QuantumFieldConfig {
            seed: Some(5),
            ..Default::default()
        });
        let before = field.buffer().positions().to_vec();
        field.advance(0.5, 1.0 / 60.0);
        for (a, b) in before.iter().zip(field.buffer().positions()) {
            let d = *b - *a;
            assert!(d.x.abs() <= 0.002 + 1e-7);
            assert!(d.y.abs() <= 0.002 + 1e-7);
            assert!(d.z.abs() <= 0.001 + 1e-7);
        }
    }

    #[test]
    fn test_empty_field_is_a_no_op() {
        let mut field = ParticleField::new(ParticleFieldConfig {
            count: 0,
            ..Default::default()
        });
        field.advance(1.0, 0.1);
        let mut out = Vec::new();
        field.collect_sprites(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_sprites_cover_every_particle() {
        let cloud = ParticleCloud::new(ParticleCloudConfig {
            count: 32,
            ..Default::default()
        });
        let mut out = Vec::new();
        cloud.collect_sprites(&mut out);
        assert_eq!(out.len(), 32);
        assert!(out.iter().all(|s| (s.alpha - 0.8).abs() < 1e-6));
    }
}
