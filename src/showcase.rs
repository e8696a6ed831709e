//! Ready-made scenes for each canvas on the site.
//!
//! ```ignore
//! let showcase = Showcase::from_name("hero").unwrap_or_default();
//! let id = stage.mount(showcase.config())?;
//! ```

use crate::buffer::SpriteInstance;
use crate::color::{palette, rgb};
use crate::effects::{
    CardVisual, DataBars, DataBarsConfig, DataFlow, DataFlowConfig, FloatingGeometry,
    FloatingGeometryConfig, FlowTheme, HoloPlane, HoloPlaneConfig, LayeredNetwork,
    LayeredNetworkConfig, MorphingMesh, MorphingMeshConfig, MorphingShape, MorphingShapeConfig,
    NeuralWeb, NeuralWebConfig, ParticleCloud, ParticleCloudConfig, ParticleField,
    ParticleFieldConfig, ParticleWave, ParticleWaveConfig, SolidShape,
};
use crate::scene::{write_nodes, Animated, Light, Material, Node, Primitive, SceneConfig};
use glam::{Mat4, Vec3};

/// Fixed decorative nodes that never move.
pub struct Props {
    nodes: Vec<Node>,
}

impl Props {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl Animated for Props {
    fn name(&self) -> &str {
        "props"
    }

    fn advance(&mut self, _elapsed: f64, _delta: f32) {}

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        write_nodes(&self.nodes, Mat4::IDENTITY, out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Showcase {
    /// Spiral galaxy and morphing mesh behind the landing section.
    #[default]
    Hero,
    ParticleWave,
    NeuralBackground,
    /// Slowly turning particle shell with floating wireframes.
    Ambient,
    DataFlow(FlowTheme),
    LayeredNetwork,
    Morphing,
    Holographic,
    ProjectCard(usize),
    DataBars,
}

impl Showcase {
    pub const ALL: [Showcase; 12] = [
        Showcase::Hero,
        Showcase::ParticleWave,
        Showcase::NeuralBackground,
        Showcase::Ambient,
        Showcase::DataFlow(FlowTheme::Neural),
        Showcase::DataFlow(FlowTheme::Quantum),
        Showcase::DataFlow(FlowTheme::Genetic),
        Showcase::LayeredNetwork,
        Showcase::Morphing,
        Showcase::Holographic,
        Showcase::ProjectCard(0),
        Showcase::DataBars,
    ];

    /// Parse a name as printed by [`name`](Self::name). Project cards also
    /// accept any index, e.g. `card-4`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if let Some(index) = name.strip_prefix("card-") {
            return index.parse().ok().map(Showcase::ProjectCard);
        }
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }

    pub fn name(&self) -> String {
        match self {
            Showcase::Hero => "hero".into(),
            Showcase::ParticleWave => "particle-wave".into(),
            Showcase::NeuralBackground => "neural".into(),
            Showcase::Ambient => "ambient".into(),
            Showcase::DataFlow(theme) => format!("flow-{}", theme.name()),
            Showcase::LayeredNetwork => "layered-network".into(),
            Showcase::Morphing => "morphing".into(),
            Showcase::Holographic => "holographic".into(),
            Showcase::ProjectCard(index) => format!("card-{}", index),
            Showcase::DataBars => "data-bars".into(),
        }
    }

    /// Scene with the canvas' camera, lights and entities.
    pub fn config(&self) -> SceneConfig {
        match *self {
            Showcase::Hero => SceneConfig::new()
                .with_camera_position(Vec3::new(0.0, 0.0, 5.0))
                .with_field_of_view(60.0)
                .with_light(Light::ambient(0.2))
                .with_light(Light::point(Vec3::splat(10.0), 0.5).with_color(palette::TEAL))
                .with_light(Light::point(Vec3::splat(-10.0), 0.5).with_color(palette::BLUE))
                .with_child(ParticleField::new(ParticleFieldConfig::default()))
                .with_child(MorphingMesh::new(MorphingMeshConfig::default()))
                .with_child(Props::new(vec![
                    Node::new(
                        "accent-green",
                        Primitive::Sphere { radius: 0.1 },
                        Material::new(rgb(palette::GREEN)).with_opacity(0.7),
                    )
                    .at(Vec3::new(2.0, 1.0, 0.0)),
                    Node::new(
                        "accent-purple",
                        Primitive::Sphere { radius: 0.05 },
                        Material::new(rgb(palette::PURPLE)).with_opacity(0.6),
                    )
                    .at(Vec3::new(-1.5, -1.0, 1.0)),
                ])),
            Showcase::ParticleWave => SceneConfig::new()
                .with_camera_position(Vec3::new(0.0, 5.0, 10.0))
                .with_field_of_view(60.0)
                .with_light(Light::ambient(0.2))
                .with_light(Light::point(Vec3::splat(10.0), 0.5).with_color(palette::TEAL))
                .with_child(ParticleWave::new(ParticleWaveConfig::default())),
            Showcase::NeuralBackground => SceneConfig::new()
                .with_camera_position(Vec3::new(0.0, 0.0, 3.0))
                .with_field_of_view(60.0)
                .with_light(Light::ambient(0.2))
                .with_light(Light::point(Vec3::splat(10.0), 0.5))
                .with_child(NeuralWeb::new(NeuralWebConfig::default())),
            Showcase::Ambient => SceneConfig::new()
                .with_light(Light::ambient(0.3))
                .with_light(Light::point(Vec3::splat(10.0), 0.5).with_color(palette::TEAL))
                .with_child(ParticleCloud::new(ParticleCloudConfig::default()))
                .with_child(FloatingGeometry::new(FloatingGeometryConfig {
                    position: Vec3::new(-1.8, 0.5, -1.0),
                    ..Default::default()
                }))
                .with_child(FloatingGeometry::new(FloatingGeometryConfig {
                    shape: SolidShape::Torus,
                    position: Vec3::new(1.8, -0.5, -1.0),
                    color: palette::BLUE,
                    ..Default::default()
                })),
            Showcase::DataFlow(theme) => DataFlow::scene(DataFlowConfig {
                theme,
                ..Default::default()
            }),
            Showcase::LayeredNetwork => SceneConfig::new()
                .with_camera_position(Vec3::new(0.0, 0.0, 8.0))
                .with_field_of_view(45.0)
                .with_light(Light::ambient(0.1))
                .with_light(Light::point(Vec3::splat(5.0), 0.6).with_color(palette::TEAL))
                .with_light(Light::point(Vec3::new(-5.0, -5.0, 5.0), 0.4).with_color(palette::BLUE))
                .with_light(
                    Light::spot(Vec3::new(0.0, 10.0, 0.0), 0.3, 0.5, 0.5).with_color(palette::PURPLE),
                )
                .with_child(LayeredNetwork::new(LayeredNetworkConfig::default())),
            Showcase::Morphing => SceneConfig::new()
                .with_camera_position(Vec3::new(3.0, 2.0, 3.0))
                .with_field_of_view(50.0)
                .with_background(0x000508)
                .with_light(Light::ambient(0.3))
                .with_light(
                    Light::directional(Vec3::new(10.0, 10.0, 5.0), 1.0).with_color(palette::WHITE),
                )
                .with_light(Light::point(Vec3::splat(-5.0), 0.5).with_color(palette::TEAL))
                .with_light(
                    Light::spot(Vec3::new(0.0, 10.0, 0.0), 0.3, 0.0, 0.8).with_color(palette::BLUE),
                )
                .with_child(MorphingShape::new(MorphingShapeConfig::default())),
            Showcase::Holographic => SceneConfig::new()
                .with_camera_position(Vec3::new(0.0, 0.0, 1.0))
                .with_field_of_view(45.0)
                .with_child(HoloPlane::new(HoloPlaneConfig::default())),
            Showcase::ProjectCard(index) => CardVisual::scene(index, None),
            Showcase::DataBars => DataBars::scene(DataBarsConfig::default()),
        }
    }
}
