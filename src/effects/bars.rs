//! Animated bar chart.

use crate::buffer::SpriteInstance;
use crate::color::{hsl_to_rgb, palette, rgb};
use crate::motion::{approach, Wave};
use crate::scene::{write_nodes, Animated, Light, Material, Node, Primitive, SceneConfig, Transform};
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct DataBarsConfig {
    /// Bar heights, nominally in `[0, 1]`.
    pub values: Vec<f32>,
    /// Horizontal distance between bar centers.
    pub spacing: f32,
    /// Starting height scale before the bars grow.
    pub initial_height: f32,
    /// Fraction of the remaining height gap closed per reference frame.
    pub grow_rate: f32,
    /// Heights at which horizontal guide lines are drawn.
    pub grid_levels: Vec<f32>,
}

impl Default for DataBarsConfig {
    fn default() -> Self {
        Self {
            values: vec![0.8, 0.6, 0.9, 0.7, 0.85, 0.75, 0.95],
            spacing: 0.5,
            initial_height: 0.1,
            grow_rate: 0.05,
            grid_levels: vec![0.2, 0.4, 0.6, 0.8, 1.0],
        }
    }
}

/// Emissive tint of a bar of height `value`: taller bars are greener and
/// brighter.
pub fn bar_glow(value: f32) -> Vec3 {
    let intensity = value * 0.8 + 0.2;
    hsl_to_rgb(0.5 + intensity * 0.2, 0.7, intensity * 0.3)
}

/// Bars grow from a stub toward their value and bob gently out of phase.
pub struct DataBars {
    values: Vec<f32>,
    grow_rate: f32,
    bars: Vec<Node>,
    glows: Vec<Vec3>,
    grid: Vec<Node>,
}

impl DataBars {
    pub fn new(config: DataBarsConfig) -> Self {
        let n = config.values.len();
        let half = n as f32 / 2.0;

        let bars = config
            .values
            .iter()
            .enumerate()
            .map(|(i, _)| {
                Node::new(
                    format!("bar-{}", i),
                    Primitive::Box {
                        size: Vec3::new(0.3, 1.0, 0.3),
                    },
                    Material::new(rgb(palette::TEAL)),
                )
                .with_transform(Transform {
                    position: Vec3::new((i as f32 - half) * config.spacing, 0.0, 0.0),
                    scale: Vec3::new(1.0, config.initial_height, 1.0),
                    ..Transform::IDENTITY
                })
            })
            .collect();

        let glows = config.values.iter().map(|&v| bar_glow(v)).collect();

        let grid = config
            .grid_levels
            .iter()
            .map(|&level| {
                Node::new(
                    "grid-line",
                    Primitive::Box { size: Vec3::ONE },
                    Material::new(rgb(palette::TEAL)).with_opacity(0.2),
                )
                .with_transform(Transform {
                    position: Vec3::new(0.0, level - 0.5, 0.0),
                    scale: Vec3::new(n as f32 * 0.6, 0.005, 0.1),
                    ..Transform::IDENTITY
                })
            })
            .collect();

        Self {
            values: config.values,
            grow_rate: config.grow_rate,
            bars,
            glows,
            grid,
        }
    }

    /// Chart scene with its camera and lighting.
    pub fn scene(config: DataBarsConfig) -> SceneConfig {
        SceneConfig::new()
            .with_camera_position(Vec3::new(3.0, 2.0, 3.0))
            .with_field_of_view(45.0)
            .with_light(Light::ambient(0.4))
            .with_light(Light::directional(Vec3::new(10.0, 10.0, 5.0), 1.0))
            .with_light(Light::point(Vec3::new(-10.0, -10.0, -5.0), 0.5).with_color(palette::TEAL))
            .with_child(Self::new(config))
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn bars(&self) -> &[Node] {
        &self.bars
    }

    pub fn grid(&self) -> &[Node] {
        &self.grid
    }

    /// Current height scale of bar `index`.
    pub fn height(&self, index: usize) -> Option<f32> {
        self.bars.get(index).map(|b| b.transform.scale.y)
    }

    pub fn glow(&self, index: usize) -> Option<Vec3> {
        self.glows.get(index).copied()
    }
}

impl Animated for DataBars {
    fn name(&self) -> &str {
        "data-bars"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        for (i, (bar, &value)) in self.bars.iter_mut().zip(&self.values).enumerate() {
            bar.transform.scale.y = approach(bar.transform.scale.y, value, self.grow_rate, delta);
            bar.transform.position.y = Wave::oscillate(0.05, 1.0)
                .with_phase(i as f32)
                .value(elapsed);
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        write_nodes(&self.grid, Mat4::IDENTITY, out);
        for (bar, glow) in self.bars.iter().zip(&self.glows) {
            let base = out.len();
            bar.write_sprites(Mat4::IDENTITY, out);
            for sprite in &mut out[base..] {
                let lit = (Vec3::from(sprite.color) + *glow).min(Vec3::ONE);
                sprite.color = lit.into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_are_centered() {
        let bars = DataBars::new(DataBarsConfig {
            values: vec![0.5; 4],
            ..Default::default()
        });
        let xs: Vec<f32> = bars.bars().iter().map(|b| b.transform.position.x).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5]);
        assert_eq!(bars.height(0), Some(0.1));
    }

    #[test]
    fn test_bars_grow_toward_value() {
        let mut bars = DataBars::new(DataBarsConfig::default());
        let mut last = bars.height(2).unwrap();
        for frame in 1..=600 {
            bars.advance(frame as f64 / 60.0, 1.0 / 60.0);
            let h = bars.height(2).unwrap();
            assert!(h >= last && h <= 0.9 + 1e-6);
            last = h;
        }
        assert!((last - 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_one_frame_of_growth() {
        let mut bars = DataBars::new(DataBarsConfig::default());
        bars.advance(1.0 / 60.0, 1.0 / 60.0);
        // 0.1 + (0.8 - 0.1) * 0.05
        assert!((bars.height(0).unwrap() - 0.135).abs() < 1e-5);
    }

    #[test]
    fn test_bob_is_phased_by_index() {
        let mut bars = DataBars::new(DataBarsConfig::default());
        bars.advance(0.0, 0.0);
        for (i, bar) in bars.bars().iter().enumerate() {
            assert!((bar.transform.position.y - (i as f32).sin() * 0.05).abs() < 1e-6);
        }
    }

    #[test]
    fn test_glow_brightens_with_value() {
        let low = bar_glow(0.1);
        let high = bar_glow(1.0);
        assert!(high.length() > low.length());
    }

    #[test]
    fn test_grid_lines() {
        let bars = DataBars::new(DataBarsConfig::default());
        assert_eq!(bars.grid().len(), 5);
        let top = &bars.grid()[4];
        assert!((top.transform.position.y - 0.5).abs() < 1e-6);
        assert!((top.transform.scale.x - 7.0 * 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_empty_chart() {
        let mut bars = DataBars::new(DataBarsConfig {
            values: Vec::new(),
            ..Default::default()
        });
        bars.advance(1.0, 0.1);
        assert!(bars.height(0).is_none());
    }
}
