//! Scene graph nodes: a primitive, a transform and a material.

use crate::buffer::SpriteInstance;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Mesh shape of a node. Sizes are in world units before scaling.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    Box { size: Vec3 },
    Torus { radius: f32, tube: f32 },
    /// Subdivided icosahedron; `detail` is the subdivision level.
    Icosahedron { radius: f32, detail: u32 },
    Dodecahedron { radius: f32 },
    Octahedron { radius: f32 },
    Plane { width: f32, height: f32 },
    /// Polyline through the given points.
    Line { points: Vec<Vec3> },
    /// Points taken from the owning entity's particle buffer.
    PointCloud { size: f32 },
}

impl Primitive {
    /// Radius of a sphere enclosing the unscaled shape.
    pub fn extent(&self) -> f32 {
        match self {
            Primitive::Sphere { radius }
            | Primitive::Icosahedron { radius, .. }
            | Primitive::Dodecahedron { radius }
            | Primitive::Octahedron { radius } => *radius,
            Primitive::Box { size } => size.length() * 0.5,
            Primitive::Torus { radius, tube } => radius + tube,
            Primitive::Plane { width, height } => (width * width + height * height).sqrt() * 0.5,
            Primitive::Line { .. } => 0.0,
            Primitive::PointCloud { size } => *size,
        }
    }
}

/// Position, Euler rotation (XYZ order, radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Surface appearance of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    /// Self-illumination added on top of lighting, in units of `color`.
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Material {
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            emissive_intensity: 0.0,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_emissive(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

/// A drawable object in an entity's scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub primitive: Primitive,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, primitive: Primitive, material: Material) -> Self {
        Self {
            name: name.into(),
            primitive,
            transform: Transform::IDENTITY,
            material,
            visible: true,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Append billboard stand-ins for this node under `parent`.
    ///
    /// Solids become one sprite sized by their extent; lines become a sprite
    /// per vertex. Hidden nodes and point clouds write nothing.
    pub fn write_sprites(&self, parent: Mat4, out: &mut Vec<SpriteInstance>) {
        if !self.visible {
            return;
        }

        let model = parent * self.transform.matrix();
        let color = self.material.color * (1.0 + self.material.emissive_intensity);
        let alpha = self.material.opacity;

        match &self.primitive {
            Primitive::PointCloud { .. } => {}
            Primitive::Line { points } => {
                for p in points {
                    out.push(SpriteInstance::new(model.transform_point3(*p), 0.01, color, alpha));
                }
            }
            solid => {
                let scale = self.transform.scale.max_element();
                out.push(SpriteInstance::new(
                    model.transform_point3(Vec3::ZERO),
                    solid.extent() * scale,
                    color.min(Vec3::ONE),
                    alpha,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix_order() {
        let t = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            scale: Vec3::splat(2.0),
        };
        let p = t.matrix().transform_point3(Vec3::X);
        // Scale, then rotate +X toward -Z, then translate.
        assert!(p.distance(Vec3::new(1.0, 0.0, -2.0)) < 1e-5);
    }

    #[test]
    fn test_hidden_node_writes_nothing() {
        let mut node = Node::new("n", Primitive::Sphere { radius: 0.1 }, Material::default());
        node.visible = false;
        let mut out = Vec::new();
        node.write_sprites(Mat4::IDENTITY, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_line_writes_vertices() {
        let node = Node::new(
            "edge",
            Primitive::Line {
                points: vec![Vec3::ZERO, Vec3::X],
            },
            Material::default().with_opacity(0.3),
        );
        let mut out = Vec::new();
        node.write_sprites(Mat4::from_translation(Vec3::Y), &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].position, [1.0, 1.0, 0.0]);
        assert!((out[0].alpha - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_solid_sprite_uses_extent_and_scale() {
        let node = Node::new("s", Primitive::Sphere { radius: 0.1 }, Material::default())
            .with_transform(Transform::from_position(Vec3::Z).with_scale(3.0));
        let mut out = Vec::new();
        node.write_sprites(Mat4::IDENTITY, &mut out);
        assert!((out[0].size - 0.3).abs() < 1e-6);
        assert_eq!(out[0].position, [0.0, 0.0, 1.0]);
    }
}
