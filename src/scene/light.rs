//! Light descriptions carried by a scene.
//!
//! Lights are data only. The preview backend draws unlit billboards, so
//! lights matter to backends that shade meshes.

use crate::color::rgb;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction. Position is ignored.
    Ambient,
    Point,
    /// Parallel rays from `position` toward the origin.
    Directional,
    /// Cone aimed at the origin.
    Spot {
        /// Cone half-angle in radians.
        angle: f32,
        /// Fraction of the cone that is attenuated, 0-1.
        penumbra: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity,
        }
    }

    pub fn point(position: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            color: Vec3::ONE,
            intensity,
        }
    }

    pub fn directional(position: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            color: Vec3::ONE,
            intensity,
        }
    }

    pub fn spot(position: Vec3, angle: f32, penumbra: f32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Spot { angle, penumbra },
            position,
            color: Vec3::ONE,
            intensity,
        }
    }

    /// Set the color from a `0xRRGGBB` value.
    pub fn with_color(mut self, hex: u32) -> Self {
        self.color = rgb(hex);
        self
    }

    /// Color scaled by intensity.
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    #[test]
    fn test_builders() {
        let light = Light::spot(Vec3::new(0.0, 10.0, 0.0), 0.3, 0.5, 0.8).with_color(palette::BLUE);
        assert_eq!(
            light.kind,
            LightKind::Spot {
                angle: 0.3,
                penumbra: 0.5
            }
        );
        assert_eq!(light.radiance(), rgb(palette::BLUE) * 0.8);
        assert_eq!(Light::ambient(0.2).kind, LightKind::Ambient);
    }
}
