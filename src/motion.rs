//! Closed-form motion primitives.
//!
//! Everything here is either a pure function of elapsed time ([`Wave`],
//! [`flow_progress`], the [`Curve`]s) or a tiny accumulator that wraps its
//! state every step ([`Spin`], [`FlowPacket`]). Effects compose these instead
//! of hand-writing `sin(t * a + b) * c` at every call site.

use glam::{EulerRot, Quat, Vec3};
use std::f64::consts::TAU;

/// Frame rate at which per-frame increments are converted to per-second rates.
pub const REFERENCE_FPS: f32 = 60.0;

/// Accumulated Euler rotation.
///
/// Each axis advances by `rate * dt` and is wrapped into `[0, 2pi)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    /// Radians per second on each axis.
    pub rate: Vec3,
    angle: Vec3,
}

impl Spin {
    pub fn new(rate: Vec3) -> Self {
        Self {
            rate,
            angle: Vec3::ZERO,
        }
    }

    /// Spin from an increment applied once per frame at [`REFERENCE_FPS`].
    pub fn per_frame(increment: Vec3) -> Self {
        Self::new(increment * REFERENCE_FPS)
    }

    pub fn advance(&mut self, dt: f32) {
        let tau = std::f32::consts::TAU;
        let next = self.angle + self.rate * dt;
        self.angle = Vec3::new(
            wrap_angle(next.x, tau),
            wrap_angle(next.y, tau),
            wrap_angle(next.z, tau),
        );
    }

    /// Current angles in radians, each in `[0, 2pi)`.
    #[inline]
    pub fn angle(&self) -> Vec3 {
        self.angle
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.angle.x, self.angle.y, self.angle.z)
    }
}

fn wrap_angle(value: f32, period: f32) -> f32 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to the period itself for tiny negatives.
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Sinusoid `offset + sin(t * frequency + phase) * amplitude`.
///
/// The argument is reduced modulo 2pi in `f64` before the sine, so the value
/// at any `t` is independent of how long the page has been running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub offset: f32,
    pub amplitude: f32,
    /// Angular frequency in radians per second.
    pub frequency: f32,
    pub phase: f32,
}

impl Wave {
    pub fn new(offset: f32, amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            offset,
            amplitude,
            frequency,
            phase,
        }
    }

    /// Oscillation around zero, for positional bobbing.
    pub fn oscillate(amplitude: f32, frequency: f32) -> Self {
        Self::new(0.0, amplitude, frequency, 0.0)
    }

    /// Oscillation around `base`, for pulsing scale, opacity or emissive.
    pub fn pulse(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self::new(base, amplitude, frequency, 0.0)
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn value(&self, t: f64) -> f32 {
        let arg = (t * self.frequency as f64 + self.phase as f64).rem_euclid(TAU);
        self.offset + arg.sin() as f32 * self.amplitude
    }

    /// Seconds per cycle, or `None` for a constant wave.
    pub fn period(&self) -> Option<f64> {
        if self.frequency == 0.0 {
            None
        } else {
            Some(TAU / (self.frequency as f64).abs())
        }
    }
}

/// A marker travelling along a path, progress in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowPacket {
    progress: f32,
    /// Path lengths per second.
    pub speed: f32,
    /// The packet is hidden once progress reaches this value.
    pub hide_after: f32,
}

impl FlowPacket {
    pub fn new(progress: f32, speed: f32) -> Self {
        Self {
            progress: wrap_angle(progress, 1.0),
            speed,
            hide_after: 1.0,
        }
    }

    pub fn with_hide_after(mut self, threshold: f32) -> Self {
        self.hide_after = threshold;
        self
    }

    pub fn advance(&mut self, dt: f32) {
        self.progress = wrap_angle(self.progress + self.speed * dt, 1.0);
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.progress < self.hide_after
    }
}

/// Stateless packet progress: `(offset + elapsed * speed) mod 1`.
pub fn flow_progress(elapsed: f64, offset: f32, speed: f32) -> f32 {
    let p = (offset as f64 + elapsed * speed as f64).rem_euclid(1.0) as f32;
    if p >= 1.0 {
        0.0
    } else {
        p
    }
}

/// Move `current` toward `target`, closing `rate` of the gap per reference frame.
///
/// Frame-rate independent: two half-length steps land where one full step does.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let keep = (1.0 - rate.clamp(0.0, 1.0)).powf(dt.max(0.0) * REFERENCE_FPS);
    target + (current - target) * keep
}

/// A parametric path, `t` in `[0, 1]`.
pub trait Curve {
    fn point(&self, t: f32) -> Vec3;

    /// `divisions + 1` evenly spaced samples, endpoints included.
    fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point(i as f32 / divisions as f32))
            .collect()
    }
}

/// Straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

impl Curve for Segment {
    fn point(&self, t: f32) -> Vec3 {
        self.start.lerp(self.end, t)
    }
}

/// Open centripetal Catmull-Rom spline through a list of control points.
///
/// End tangents come from mirroring the second and second-to-last points.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

impl CatmullRom {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

impl Curve for CatmullRom {
    fn point(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let l = points.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return points[0],
            _ => {}
        }

        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= l - 1 {
            segment = l - 2;
            weight = 1.0;
        }

        let p0 = if segment > 0 {
            points[segment - 1]
        } else {
            points[0] * 2.0 - points[1]
        };
        let p1 = points[segment];
        let p2 = points[segment + 1];
        let p3 = if segment + 2 < l {
            points[segment + 2]
        } else {
            points[l - 1] * 2.0 - points[l - 2]
        };

        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        Vec3::new(
            hermite(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2, weight),
            hermite(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2, weight),
            hermite(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2, weight),
        )
    }
}

/// Non-uniform Catmull-Rom on one axis, evaluated as a cubic Hermite.
#[allow(clippy::too_many_arguments)]
fn hermite(x0: f32, x1: f32, x2: f32, x3: f32, dt0: f32, dt1: f32, dt2: f32, t: f32) -> f32 {
    let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
    let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;

    let c0 = x1;
    let c1 = t1;
    let c2 = -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2;
    let c3 = 2.0 * x1 - 2.0 * x2 + t1 + t2;
    c0 + t * (c1 + t * (c2 + t * c3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_is_periodic() {
        let wave = Wave::new(0.3, 0.1, 1.5, 0.7);
        let period = wave.period().unwrap();
        for i in 0..50 {
            let t = i as f64 * 0.37;
            assert!((wave.value(t) - wave.value(t + period)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_wave_far_from_origin() {
        // Hours into a session the value is still exact to the phase.
        let wave = Wave::oscillate(1.0, 1.0);
        let t = 100_000.0 * TAU + 0.5;
        assert!((wave.value(t) - 0.5_f32.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_constant_wave_has_no_period() {
        assert_eq!(Wave::pulse(1.0, 0.2, 0.0).period(), None);
        assert_eq!(Wave::pulse(1.0, 0.2, 0.0).value(3.0), 1.0);
    }

    #[test]
    fn test_spin_accumulates_and_wraps() {
        let rate = Vec3::new(0.9, 2.5, -1.3);
        let dt = 1.0 / 60.0;
        let mut spin = Spin::new(rate);
        let k = 1000;
        for _ in 0..k {
            spin.advance(dt);
        }

        let tau = std::f32::consts::TAU;
        let expected = (rate * dt * k as f32).to_array();
        for (angle, want) in spin.angle().to_array().iter().zip(expected) {
            assert!(*angle >= 0.0 && *angle < tau);
            let diff = (angle - want.rem_euclid(tau)).abs();
            assert!(diff < 1e-3 || (tau - diff) < 1e-3, "{} vs {}", angle, want);
        }
    }

    #[test]
    fn test_spin_per_frame_matches_reference_rate() {
        let mut spin = Spin::per_frame(Vec3::new(0.0, 0.002, 0.0));
        for _ in 0..60 {
            spin.advance(1.0 / 60.0);
        }
        assert!((spin.angle().y - 0.12).abs() < 1e-5);
    }

    #[test]
    fn test_flow_packet_wraps() {
        let mut packet = FlowPacket::new(0.9, 0.5).with_hide_after(0.8);
        assert!(!packet.visible());
        packet.advance(0.4);
        assert!((packet.progress() - 0.1).abs() < 1e-5);
        assert!(packet.visible());

        for _ in 0..1000 {
            packet.advance(0.0137);
            assert!((0.0..1.0).contains(&packet.progress()));
        }
    }

    #[test]
    fn test_flow_progress_range() {
        for i in 0..200 {
            let p = flow_progress(i as f64 * 0.731, 0.3, 0.5);
            assert!((0.0..1.0).contains(&p));
        }
        assert!((flow_progress(1.0, 0.2, 0.5) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_approach_is_frame_rate_independent() {
        let one = approach(0.0, 1.0, 0.05, 1.0 / 30.0);
        let two = approach(approach(0.0, 1.0, 0.05, 1.0 / 60.0), 1.0, 0.05, 1.0 / 60.0);
        assert!((one - two).abs() < 1e-5);
        assert!((approach(0.0, 1.0, 0.05, 1.0 / 60.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_segment_lerps() {
        let segment = Segment::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(segment.point(0.5), Vec3::X);
    }

    #[test]
    fn test_catmull_rom_passes_through_control_points() {
        let points = vec![
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(-0.5, 1.0, 0.3),
            Vec3::new(0.7, -0.8, -0.2),
            Vec3::new(2.0, 0.5, 0.0),
        ];
        let curve = CatmullRom::new(points.clone());

        assert!(curve.point(0.0).distance(points[0]) < 1e-5);
        assert!(curve.point(1.0 / 3.0).distance(points[1]) < 1e-4);
        assert!(curve.point(2.0 / 3.0).distance(points[2]) < 1e-4);
        assert!(curve.point(1.0).distance(points[3]) < 1e-5);
    }

    #[test]
    fn test_catmull_rom_sample_count() {
        let curve = CatmullRom::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        let samples = curve.sample(50);
        assert_eq!(samples.len(), 51);
        assert!(samples[50].distance(Vec3::Y) < 1e-5);
    }

    #[test]
    fn test_degenerate_catmull_rom() {
        assert_eq!(CatmullRom::new(vec![]).point(0.5), Vec3::ZERO);
        assert_eq!(CatmullRom::new(vec![Vec3::ONE]).point(0.5), Vec3::ONE);
        // Coincident points must not produce NaN.
        let p = CatmullRom::new(vec![Vec3::ONE, Vec3::ONE]).point(0.5);
        assert!(p.is_finite());
    }
}
