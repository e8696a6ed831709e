//! Solid-shape effects: floating wireframes, the shader-driven morphing mesh,
//! the procedural morphing group and the holographic plane.

use crate::buffer::SpriteInstance;
use crate::color::{palette, rgb};
use crate::motion::{Spin, Wave};
use crate::scene::{write_nodes, Animated, Material, Node, Primitive, Transform};
use crate::shaders::{
    GlowWireframeUniforms, HolographicUniforms, MorphFresnelUniforms, ShaderMaterial,
};
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Shapes available to [`FloatingGeometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolidShape {
    #[default]
    Dodecahedron,
    Torus,
    Octahedron,
    Icosahedron,
    Sphere,
}

impl SolidShape {
    pub fn primitive(self) -> Primitive {
        match self {
            SolidShape::Dodecahedron => Primitive::Dodecahedron { radius: 0.8 },
            SolidShape::Torus => Primitive::Torus {
                radius: 0.6,
                tube: 0.2,
            },
            SolidShape::Octahedron => Primitive::Octahedron { radius: 0.8 },
            SolidShape::Icosahedron => Primitive::Icosahedron {
                radius: 0.8,
                detail: 0,
            },
            SolidShape::Sphere => Primitive::Sphere { radius: 0.8 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingGeometryConfig {
    pub shape: SolidShape,
    pub position: Vec3,
    pub color: u32,
    pub scale: f32,
    pub opacity: f32,
    pub emissive: f32,
    pub spin_per_frame: Vec3,
    /// Vertical bob around `position.y`.
    pub bob: Wave,
}

impl Default for FloatingGeometryConfig {
    fn default() -> Self {
        Self {
            shape: SolidShape::default(),
            position: Vec3::ZERO,
            color: palette::TEAL,
            scale: 1.0,
            opacity: 0.6,
            emissive: 0.1,
            spin_per_frame: Vec3::new(0.003, 0.005, 0.0),
            bob: Wave::oscillate(0.1, 0.5),
        }
    }
}

/// A translucent wireframe solid that turns and bobs.
pub struct FloatingGeometry {
    config: FloatingGeometryConfig,
    node: Node,
    spin: Spin,
    glow: ShaderMaterial,
}

impl FloatingGeometry {
    pub fn new(config: FloatingGeometryConfig) -> Self {
        let color = rgb(config.color);
        let node = Node::new(
            "floating-geometry",
            config.shape.primitive(),
            Material::new(color)
                .with_opacity(config.opacity)
                .with_emissive(config.emissive)
                .wireframe(),
        )
        .with_transform(Transform::from_position(config.position).with_scale(config.scale));

        let glow = GlowWireframeUniforms {
            time: 0.0,
            amplitude: 0.0,
            color,
            opacity: config.opacity,
        }
        .into();

        Self {
            spin: Spin::per_frame(config.spin_per_frame),
            config,
            node,
            glow,
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn material(&self) -> &ShaderMaterial {
        &self.glow
    }
}

impl Animated for FloatingGeometry {
    fn name(&self) -> &str {
        "floating-geometry"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        self.spin.advance(delta);
        self.glow.set_time(elapsed);
        self.node.transform.rotation = self.spin.angle();
        self.node.transform.position.y = self.config.position.y + self.config.bob.value(elapsed);
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        self.node.write_sprites(glam::Mat4::IDENTITY, out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphingMeshConfig {
    pub radius: f32,
    pub detail: u32,
    pub color1: u32,
    pub color2: u32,
    pub spin_per_frame: Vec3,
}

impl Default for MorphingMeshConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            detail: 2,
            color1: palette::TEAL,
            color2: palette::BLUE,
            spin_per_frame: Vec3::new(0.003, 0.005, 0.0),
        }
    }
}

/// Icosphere whose vertices ripple along their normals on the GPU.
///
/// The host only feeds `time` and the spin; [`MorphingMesh::displacement`]
/// mirrors the vertex stage for previews and tests.
pub struct MorphingMesh {
    config: MorphingMeshConfig,
    node: Node,
    spin: Spin,
    material: ShaderMaterial,
    elapsed: f64,
}

impl MorphingMesh {
    pub fn new(config: MorphingMeshConfig) -> Self {
        let node = Node::new(
            "morphing-mesh",
            Primitive::Icosahedron {
                radius: config.radius,
                detail: config.detail,
            },
            Material::new(rgb(config.color1)),
        );
        let material = MorphFresnelUniforms {
            time: 0.0,
            color1: rgb(config.color1),
            color2: rgb(config.color2),
        }
        .into();

        Self {
            spin: Spin::per_frame(config.spin_per_frame),
            config,
            node,
            material,
            elapsed: 0.0,
        }
    }

    pub fn material(&self) -> &ShaderMaterial {
        &self.material
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Vertex offset along `normal` at time `t`.
    pub fn displacement(position: Vec3, normal: Vec3, t: f32) -> Vec3 {
        let wave1 = (position.x * 2.0 + t).sin() * 0.1;
        let wave2 = (position.y * 3.0 + t * 1.5).sin() * 0.05;
        let wave3 = (position.z * 4.0 + t * 0.8).sin() * 0.03;
        normal * (wave1 + wave2 + wave3)
    }
}

/// The twelve unit icosahedron corners.
fn icosahedron_corners() -> [Vec3; 12] {
    let phi = (1.0 + 5f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(-phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, 1.0),
    ]
    .map(Vec3::normalize)
}

impl Animated for MorphingMesh {
    fn name(&self) -> &str {
        "morphing-mesh"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        self.elapsed = elapsed;
        self.material.set_time(elapsed);
        self.spin.advance(delta);
        self.node.transform.rotation = self.spin.angle();
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let model = self.node.transform.matrix();
        let t = self.elapsed as f32;
        let color = self.node.material.color;
        for normal in icosahedron_corners() {
            let base = normal * self.config.radius;
            let p = base + Self::displacement(base, normal, t);
            out.push(SpriteInstance::new(model.transform_point3(p), 0.05, color, 0.8));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphingShapeConfig {
    /// Number of orbiting cubes.
    pub complexity: usize,
    /// Group rotation in radians per second on each axis.
    pub turn_rate: Vec3,
    /// Morph cycle in `[0, 1]`.
    pub cycle: Wave,
    pub scale: Wave,
    pub float: Wave,
}

impl Default for MorphingShapeConfig {
    fn default() -> Self {
        Self {
            complexity: 6,
            turn_rate: Vec3::new(0.3, 0.2, 0.1),
            cycle: Wave::pulse(0.5, 0.5, 0.5),
            scale: Wave::pulse(0.8, 0.2, 2.0),
            float: Wave::oscillate(0.3, 1.5),
        }
    }
}

/// A glowing core with orbiting cubes and two crossed rings.
///
/// The orbit radius and core opacity follow one shared morph cycle.
pub struct MorphingShape {
    config: MorphingShapeConfig,
    group: Transform,
    core: Node,
    orbiters: Vec<Node>,
    rings: [Node; 2],
    cycle: f32,
}

impl MorphingShape {
    const ORBIT_RADIUS: f32 = 1.0;
    const ORBIT_SPREAD: f32 = 0.5;

    pub fn new(config: MorphingShapeConfig) -> Self {
        let core = Node::new(
            "core",
            Primitive::Sphere { radius: 0.5 },
            Material::new(rgb(palette::TEAL)).with_opacity(0.8),
        );

        let orbiters = (0..config.complexity)
            .map(|i| {
                Node::new(
                    format!("orbiter-{}", i),
                    Primitive::Box {
                        size: Vec3::splat(0.1),
                    },
                    Material::new(rgb(palette::BLUE)),
                )
            })
            .collect();

        let rings = [
            Node::new(
                "ring-inner",
                Primitive::Torus {
                    radius: 1.2,
                    tube: 0.05,
                },
                Material::new(rgb(palette::GREEN)).with_opacity(0.6),
            )
            .with_transform(Transform {
                rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
                ..Transform::IDENTITY
            }),
            Node::new(
                "ring-outer",
                Primitive::Torus {
                    radius: 1.4,
                    tube: 0.03,
                },
                Material::new(rgb(palette::PURPLE)).with_opacity(0.4),
            )
            .with_transform(Transform {
                rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
                ..Transform::IDENTITY
            }),
        ];

        let mut shape = Self {
            config,
            group: Transform::IDENTITY,
            core,
            orbiters,
            rings,
            cycle: 0.0,
        };
        shape.place_orbiters();
        shape
    }

    /// Current morph cycle in `[0, 1]`.
    pub fn cycle(&self) -> f32 {
        self.cycle
    }

    pub fn group(&self) -> Transform {
        self.group
    }

    pub fn orbit_radius(&self) -> f32 {
        Self::ORBIT_RADIUS + self.cycle * Self::ORBIT_SPREAD
    }

    pub fn orbiters(&self) -> &[Node] {
        &self.orbiters
    }

    pub fn core(&self) -> &Node {
        &self.core
    }

    fn place_orbiters(&mut self) {
        let n = self.orbiters.len();
        let radius = self.orbit_radius();
        for (i, node) in self.orbiters.iter_mut().enumerate() {
            let angle = i as f32 / n as f32 * TAU;
            // +X rotated about Y by `angle`.
            node.transform.position = Vec3::new(radius * angle.cos(), 0.0, -radius * angle.sin());
        }
    }
}

impl Animated for MorphingShape {
    fn name(&self) -> &str {
        "morphing-shape"
    }

    fn advance(&mut self, elapsed: f64, _delta: f32) {
        let t = elapsed;
        let rate = self.config.turn_rate.as_dvec3();
        self.group.rotation = Vec3::new(
            (t * rate.x).rem_euclid(std::f64::consts::TAU) as f32,
            (t * rate.y).rem_euclid(std::f64::consts::TAU) as f32,
            (t * rate.z).rem_euclid(std::f64::consts::TAU) as f32,
        );
        self.group.scale = Vec3::splat(self.config.scale.value(t));
        self.group.position.y = self.config.float.value(t);

        self.cycle = self.config.cycle.value(t).clamp(0.0, 1.0);
        self.core.material.opacity = 0.8 + self.cycle * 0.2;
        self.place_orbiters();
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let group = self.group.matrix();
        self.core.write_sprites(group, out);
        write_nodes(&self.orbiters, group, out);
        write_nodes(&self.rings, group, out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoloPlaneConfig {
    pub width: f32,
    pub height: f32,
    /// Preview samples per side.
    pub resolution: u32,
}

impl Default for HoloPlaneConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
            resolution: 12,
        }
    }
}

/// Full-frame plane carrying the holographic interference shader.
pub struct HoloPlane {
    config: HoloPlaneConfig,
    node: Node,
    material: ShaderMaterial,
    elapsed: f64,
}

impl HoloPlane {
    pub fn new(config: HoloPlaneConfig) -> Self {
        let node = Node::new(
            "holo-plane",
            Primitive::Plane {
                width: config.width,
                height: config.height,
            },
            Material::new(Vec3::new(0.4, 0.8, 1.0)),
        );
        Self {
            config,
            node,
            material: HolographicUniforms { time: 0.0 }.into(),
            elapsed: 0.0,
        }
    }

    pub fn material(&self) -> &ShaderMaterial {
        &self.material
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Depth offset of the plane surface at local `(x, y)`.
    pub fn ripple(x: f32, y: f32, t: f32) -> f32 {
        (x * 2.0 + t * 2.0).sin() * 0.1 + (y * 3.0 + t * 1.5).sin() * 0.05
    }

    /// Shaded color at texture coordinate `uv`, before alpha.
    pub fn shade(uv: Vec2, t: f32) -> Vec3 {
        let interference = (uv.x * 20.0 + t * 2.0).sin() * (uv.y * 20.0 + t * 1.5).sin() * 0.1;
        let mut color = Vec3::new(
            (uv.x * 10.0 + t + interference).sin() * 0.5 + 0.5,
            (uv.y * 10.0 + t * 1.2 + interference).sin() * 0.5 + 0.5,
            ((uv.x + uv.y) * 8.0 + t * 0.8 + interference).sin() * 0.5 + 0.5,
        );
        let border = uv.x.min(1.0 - uv.x).min(uv.y.min(1.0 - uv.y));
        let edge = 1.0 - smoothstep(0.0, 0.1, border);
        color += Vec3::new(0.4, 0.8, 1.0) * edge * 0.5;
        color * 0.3
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl Animated for HoloPlane {
    fn name(&self) -> &str {
        "holo-plane"
    }

    fn advance(&mut self, elapsed: f64, _delta: f32) {
        self.elapsed = elapsed;
        self.material.set_time(elapsed);
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let n = self.config.resolution.max(2);
        let t = self.elapsed as f32;
        let spacing = self.config.width / n as f32;
        for row in 0..n {
            for col in 0..n {
                let uv = Vec2::new(
                    col as f32 / (n - 1) as f32,
                    row as f32 / (n - 1) as f32,
                );
                let x = (uv.x - 0.5) * self.config.width;
                let y = (uv.y - 0.5) * self.config.height;
                let p = Vec3::new(x, y, Self::ripple(x, y, t));
                out.push(SpriteInstance::new(p, spacing * 0.5, Self::shade(uv, t), 0.6));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::UniformValue;

    #[test]
    fn test_floating_geometry_bobs_around_base() {
        let mut geometry = FloatingGeometry::new(FloatingGeometryConfig {
            position: Vec3::new(0.0, 2.0, 0.0),
            ..Default::default()
        });
        geometry.advance(std::f64::consts::PI, 1.0 / 60.0);
        // sin(0.5 * pi) = 1
        assert!((geometry.node().transform.position.y - 2.1).abs() < 1e-5);
        assert!((geometry.node().transform.rotation.x - 0.003).abs() < 1e-6);
        assert!(geometry.node().material.wireframe);
    }

    #[test]
    fn test_shapes_map_to_primitives() {
        assert_eq!(
            SolidShape::Torus.primitive(),
            Primitive::Torus {
                radius: 0.6,
                tube: 0.2
            }
        );
        assert_eq!(SolidShape::default(), SolidShape::Dodecahedron);
    }

    #[test]
    fn test_morphing_mesh_feeds_time() {
        let mut mesh = MorphingMesh::new(MorphingMeshConfig::default());
        mesh.advance(3.5, 0.016);
        assert_eq!(mesh.material().get("time"), Some(UniformValue::F32(3.5)));

        let mut out = Vec::new();
        mesh.collect_sprites(&mut out);
        assert_eq!(out.len(), 12);
    }

    #[test]
    fn test_displacement_is_along_normal() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let d = MorphingMesh::displacement(Vec3::new(0.3, 1.0, -0.2), normal, 1.7);
        assert_eq!(d.x, 0.0);
        assert_eq!(d.z, 0.0);
        assert!(d.y.abs() <= 0.18);
    }

    #[test]
    fn test_morphing_shape_cycle_drives_orbit() {
        let mut shape = MorphingShape::new(MorphingShapeConfig::default());
        assert_eq!(shape.orbiters().len(), 6);

        // sin(0.5 * pi) = 1 -> cycle = 1
        shape.advance(std::f64::consts::PI, 0.016);
        assert!((shape.cycle() - 1.0).abs() < 1e-5);
        assert!((shape.orbit_radius() - 1.5).abs() < 1e-5);
        assert!((shape.core().material.opacity - 1.0).abs() < 1e-5);
        for node in shape.orbiters() {
            assert!((node.transform.position.length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_morphing_shape_group_motion() {
        let mut shape = MorphingShape::new(MorphingShapeConfig::default());
        shape.advance(1.0, 0.016);
        let group = shape.group();
        assert!((group.rotation - Vec3::new(0.3, 0.2, 0.1)).length() < 1e-5);
        assert!((group.scale.x - (0.8 + 2f32.sin() * 0.2)).abs() < 1e-5);
        assert!((group.position.y - 1.5f32.sin() * 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_holo_plane_preview() {
        let mut plane = HoloPlane::new(HoloPlaneConfig::default());
        plane.advance(0.5, 0.016);
        assert_eq!(plane.material().get("time"), Some(UniformValue::F32(0.5)));

        let mut out = Vec::new();
        plane.collect_sprites(&mut out);
        assert_eq!(out.len(), 144);
        assert!(out.iter().all(|s| s.position[2].abs() <= 0.15 + 1e-6));
    }

    #[test]
    fn test_holo_shade_stays_dim() {
        for i in 0..=10 {
            let uv = Vec2::new(i as f32 / 10.0, 0.3);
            let color = HoloPlane::shade(uv, 1.25);
            assert!(color.min_element() >= 0.0);
            assert!(color.max_element() <= 0.45 + 1e-5);
        }
    }
}
