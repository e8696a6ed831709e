//! The built-in WGSL shader pairs.
//!
//! Every pair is assembled into one module by [`ShaderPair::module_source`]:
//!
//! 1. the camera block (group 0, shared by all pairs),
//! 2. the `Material` struct generated from the pair's uniform schema (group 1),
//! 3. the mesh block with the model transform and vertex layout (group 2),
//!    for pairs drawn on meshes,
//! 4. the pair's interface, vertex and fragment text.

use super::uniforms::{to_wgsl_fields, UniformKind, UniformSlot};
use super::ShaderMaterial;
use glam::Vec3;

const CAMERA_BLOCK: &str = r#"struct Camera {
    view_proj: mat4x4<f32>,
    position: vec3<f32>,
    time: f32,
    viewport: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;
"#;

const MESH_BLOCK: &str = r#"struct Model {
    to_world: mat4x4<f32>,
};

@group(2) @binding(0)
var<uniform> model: Model;

struct MeshInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};
"#;

/// What a pair draws, which decides the bind groups it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairTarget {
    /// Triangle meshes with the model uniform at group 2.
    Mesh,
    /// Instanced camera-facing quads, six vertices per instance.
    Billboard,
}

/// A vertex/fragment program pair and the uniforms it reads.
#[derive(Debug)]
pub struct ShaderPair {
    pub name: &'static str,
    pub target: PairTarget,
    /// Structs passed between stages.
    pub interface: &'static str,
    /// Vertex stage, entry point `vs_main`.
    pub vertex: &'static str,
    /// Fragment stage, entry point `fs_main`.
    pub fragment: &'static str,
    pub uniforms: &'static [UniformSlot],
}

impl ShaderPair {
    /// The complete WGSL module for this pair.
    pub fn module_source(&self) -> String {
        let mut source = String::with_capacity(
            CAMERA_BLOCK.len() + MESH_BLOCK.len() + self.vertex.len() + self.fragment.len() + 512,
        );
        source.push_str(CAMERA_BLOCK);
        source.push('\n');
        source.push_str(&self.material_block());
        source.push('\n');
        if self.target == PairTarget::Mesh {
            source.push_str(MESH_BLOCK);
            source.push('\n');
        }
        source.push_str(self.interface);
        source.push('\n');
        source.push_str(self.vertex);
        source.push('\n');
        source.push_str(self.fragment);
        source
    }

    fn material_block(&self) -> String {
        format!(
            "struct Material {{\n{}\n}};\n\n@group(1) @binding(0)\nvar<uniform> material: Material;\n",
            to_wgsl_fields(self.uniforms)
        )
    }

    pub fn slot(&self, name: &str) -> Option<(usize, &UniformSlot)> {
        self.uniforms.iter().enumerate().find(|(_, s)| s.name == name)
    }
}

/// Every built-in pair.
pub static PAIRS: [&ShaderPair; 6] = [
    &MORPH_FRESNEL,
    &GLOW_WIREFRAME,
    &PARTICLE_SPRITE,
    &NEURAL_NODE,
    &MATRIX_RAIN,
    &HOLOGRAPHIC,
];

/// Morphing mesh: three sine waves push vertices along the normal; the
/// fragment mixes two colors by a Fresnel term.
pub static MORPH_FRESNEL: ShaderPair = ShaderPair {
    name: "morph_fresnel",
    target: PairTarget::Mesh,
    uniforms: &[
        UniformSlot::new("time", UniformKind::F32),
        UniformSlot::new("color1", UniformKind::Vec3),
        UniformSlot::new("color2", UniformKind::Vec3),
    ],
    interface: r#"struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};
"#,
    vertex: r#"@vertex
fn vs_main(in: MeshInput) -> VertexOutput {
    let t = material.time;
    let wave1 = sin(in.position.x * 2.0 + t) * 0.1;
    let wave2 = sin(in.position.y * 3.0 + t * 1.5) * 0.05;
    let wave3 = sin(in.position.z * 4.0 + t * 0.8) * 0.03;
    let displaced = in.position + in.normal * (wave1 + wave2 + wave3);

    let world = model.to_world * vec4<f32>(displaced, 1.0);
    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.world_normal = (model.to_world * vec4<f32>(in.normal, 0.0)).xyz;
    return out;
}
"#,
    fragment: r#"@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let view_dir = normalize(camera.position - in.world_position);
    let facing = clamp(dot(view_dir, normalize(in.world_normal)), 0.0, 1.0);
    let fresnel = pow(1.0 - facing, 2.0);
    let color = mix(material.color1, material.color2, fresnel);
    return vec4<f32>(color, 0.6 + fresnel * 0.4);
}
"#,
};

/// Wireframe glow: per-vertex displacement along the normal and a pulsing
/// rim intensity.
pub static GLOW_WIREFRAME: ShaderPair = ShaderPair {
    name: "glow_wireframe",
    target: PairTarget::Mesh,
    uniforms: &[
        UniformSlot::new("time", UniformKind::F32),
        UniformSlot::new("amplitude", UniformKind::F32),
        UniformSlot::new("color", UniformKind::Vec3),
        UniformSlot::new("opacity", UniformKind::F32),
    ],
    interface: r#"struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
};
"#,
    vertex: r#"@vertex
fn vs_main(in: MeshInput, @location(3) displacement: f32) -> VertexOutput {
    let push = material.amplitude * sin(displacement + material.time * 2.0);
    let world = model.to_world * vec4<f32>(in.position + in.normal * push, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.normal = (model.to_world * vec4<f32>(in.normal, 0.0)).xyz;
    return out;
}
"#,
    fragment: r#"@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let rim = max(0.7 - dot(normalize(in.normal), vec3<f32>(0.0, 0.0, 1.0)), 0.0);
    let intensity = pow(rim, 2.0);
    let pulse = sin(material.time * 3.0) * 0.5 + 0.5;
    let glow = material.color * intensity * (0.8 + pulse * 0.4);
    return vec4<f32>(glow, material.opacity * intensity);
}
"#,
};

/// Round glowing particles with a screen-space twinkle.
pub static PARTICLE_SPRITE: ShaderPair = ShaderPair {
    name: "particle_sprite",
    target: PairTarget::Billboard,
    uniforms: &[
        UniformSlot::new("time", UniformKind::F32),
        UniformSlot::new("size", UniformKind::F32),
    ],
    interface: r#"struct SpriteInput {
    @location(0) position: vec3<f32>,
    @location(1) size: f32,
    @location(2) color: vec3<f32>,
    @location(3) alpha: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
    @location(2) alpha: f32,
};
"#,
    vertex: r#"@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32, sprite: SpriteInput) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0)
    );
    let corner = corners[vertex_index % 6u];
    let aspect = vec2<f32>(camera.viewport.y / max(camera.viewport.x, 1.0), 1.0);
    let extent = sprite.size * material.size;

    var out: VertexOutput;
    let clip = camera.view_proj * vec4<f32>(sprite.position, 1.0);
    out.clip_position = clip + vec4<f32>(corner * extent * aspect, 0.0, 0.0);
    out.uv = corner * 0.5 + vec2<f32>(0.5, 0.5);
    out.color = sprite.color;
    out.alpha = sprite.alpha;
    return out;
}
"#,
    fragment: r#"@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv - vec2<f32>(0.5, 0.5));
    if dist > 0.5 {
        discard;
    }

    let falloff = 1.0 - dist * 2.0;
    let twinkle = sin(material.time * 10.0 + in.clip_position.x * 0.1 + in.clip_position.y * 0.1) * 0.5 + 0.5;
    let intensity = falloff * falloff * (0.7 + twinkle * 0.3);
    return vec4<f32>(in.color * intensity, in.alpha * intensity);
}
"#,
};

/// Network nodes drawn as round sprites sized and pulsed by activity.
pub static NEURAL_NODE: ShaderPair = ShaderPair {
    name: "neural_node",
    target: PairTarget::Billboard,
    uniforms: &[
        UniformSlot::new("time", UniformKind::F32),
        UniformSlot::new("node_size", UniformKind::F32),
    ],
    interface: r#"struct NodeInput {
    @location(0) position: vec3<f32>,
    @location(1) activity: f32,
    @location(2) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
    @location(2) activity: f32,
};
"#,
    vertex: r#"@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32, node: NodeInput) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0)
    );
    let corner = corners[vertex_index % 6u];

    var radial = vec3<f32>(0.0, 0.0, 0.0);
    if length(node.position) > 0.0 {
        radial = normalize(node.position);
    }
    let center = node.position + radial * node.activity * sin(material.time * 5.0) * 0.1;

    let aspect = vec2<f32>(camera.viewport.y / max(camera.viewport.x, 1.0), 1.0);
    let extent = material.node_size * node.activity;

    var out: VertexOutput;
    let clip = camera.view_proj * vec4<f32>(center, 1.0);
    out.clip_position = clip + vec4<f32>(corner * extent * aspect, 0.0, 0.0);
    out.uv = corner * 0.5 + vec2<f32>(0.5, 0.5);
    out.color = node.color;
    out.activity = node.activity;
    return out;
}
"#,
    fragment: r#"@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv - vec2<f32>(0.5, 0.5));
    if dist > 0.5 {
        discard;
    }

    let pulse = sin(material.time * 8.0 + in.activity * 10.0) * 0.5 + 0.5;
    let intensity = (1.0 - dist * 2.0) * in.activity * (0.7 + pulse * 0.3);
    return vec4<f32>(in.color * intensity, intensity);
}
"#,
};

/// Falling glyph strips: each instance slides down on a two-unit cycle and
/// fades toward the ends.
pub static MATRIX_RAIN: ShaderPair = ShaderPair {
    name: "matrix_rain",
    target: PairTarget::Mesh,
    uniforms: &[
        UniformSlot::new("time", UniformKind::F32),
        UniformSlot::new("color", UniformKind::Vec3),
    ],
    interface: r#"struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) opacity: f32,
};
"#,
    vertex: r#"@vertex
fn vs_main(in: MeshInput, @location(3) speed: f32, @location(4) start: f32) -> VertexOutput {
    let cycle = material.time * speed + start;
    let fall = cycle - 2.0 * floor(cycle / 2.0) - 1.0;

    var pos = in.position;
    pos.y = pos.y + fall * 10.0;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * model.to_world * vec4<f32>(pos, 1.0);
    out.uv = in.uv;
    out.opacity = 1.0 - abs(fall);
    return out;
}
"#,
    fragment: r#"@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let grid = floor(in.uv * 20.0);
    let cell = grid.x + grid.y + material.time * 10.0;
    let glyph = cell - 2.0 * floor(cell / 2.0);
    let intensity = glyph * in.opacity;
    return vec4<f32>(material.color * intensity, intensity);
}
"#,
};

/// Card backdrop: a rippling plane with interference bands and an edge glow.
pub static HOLOGRAPHIC: ShaderPair = ShaderPair {
    name: "holographic",
    target: PairTarget::Mesh,
    uniforms: &[UniformSlot::new("time", UniformKind::F32)],
    interface: r#"struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};
"#,
    vertex: r#"@vertex
fn vs_main(in: MeshInput) -> VertexOutput {
    let t = material.time;
    var pos = in.position;
    pos.z = pos.z + sin(pos.x * 2.0 + t * 2.0) * 0.1 + sin(pos.y * 3.0 + t * 1.5) * 0.05;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * model.to_world * vec4<f32>(pos, 1.0);
    out.uv = in.uv;
    return out;
}
"#,
    fragment: r#"@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = in.uv;
    let t = material.time;
    let interference = sin(uv.x * 20.0 + t * 2.0) * sin(uv.y * 20.0 + t * 1.5) * 0.1;

    var color = vec3<f32>(
        sin(uv.x * 10.0 + t + interference) * 0.5 + 0.5,
        sin(uv.y * 10.0 + t * 1.2 + interference) * 0.5 + 0.5,
        sin((uv.x + uv.y) * 8.0 + t * 0.8 + interference) * 0.5 + 0.5
    );

    let border = min(min(uv.x, 1.0 - uv.x), min(uv.y, 1.0 - uv.y));
    let edge = 1.0 - smoothstep(0.0, 0.1, border);
    color = color + edge * vec3<f32>(0.4, 0.8, 1.0) * 0.5;
    return vec4<f32>(color * 0.3, 0.6);
}
"#,
};

/// Typed uniform set for [`MORPH_FRESNEL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphFresnelUniforms {
    pub time: f32,
    pub color1: Vec3,
    pub color2: Vec3,
}

impl From<MorphFresnelUniforms> for ShaderMaterial {
    fn from(u: MorphFresnelUniforms) -> Self {
        ShaderMaterial::from_ordered(
            &MORPH_FRESNEL,
            vec![u.time.into(), u.color1.into(), u.color2.into()],
        )
    }
}

/// Typed uniform set for [`GLOW_WIREFRAME`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowWireframeUniforms {
    pub time: f32,
    pub amplitude: f32,
    pub color: Vec3,
    pub opacity: f32,
}

impl From<GlowWireframeUniforms> for ShaderMaterial {
    fn from(u: GlowWireframeUniforms) -> Self {
        ShaderMaterial::from_ordered(
            &GLOW_WIREFRAME,
            vec![
                u.time.into(),
                u.amplitude.into(),
                u.color.into(),
                u.opacity.into(),
            ],
        )
    }
}

/// Typed uniform set for [`PARTICLE_SPRITE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpriteUniforms {
    pub time: f32,
    pub size: f32,
}

impl From<ParticleSpriteUniforms> for ShaderMaterial {
    fn from(u: ParticleSpriteUniforms) -> Self {
        ShaderMaterial::from_ordered(&PARTICLE_SPRITE, vec![u.time.into(), u.size.into()])
    }
}

/// Typed uniform set for [`NEURAL_NODE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuralNodeUniforms {
    pub time: f32,
    pub node_size: f32,
}

impl From<NeuralNodeUniforms> for ShaderMaterial {
    fn from(u: NeuralNodeUniforms) -> Self {
        ShaderMaterial::from_ordered(&NEURAL_NODE, vec![u.time.into(), u.node_size.into()])
    }
}

/// Typed uniform set for [`MATRIX_RAIN`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixRainUniforms {
    pub time: f32,
    pub color: Vec3,
}

impl From<MatrixRainUniforms> for ShaderMaterial {
    fn from(u: MatrixRainUniforms) -> Self {
        ShaderMaterial::from_ordered(&MATRIX_RAIN, vec![u.time.into(), u.color.into()])
    }
}

/// Typed uniform set for [`HOLOGRAPHIC`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolographicUniforms {
    pub time: f32,
}

impl From<HolographicUniforms> for ShaderMaterial {
    fn from(u: HolographicUniforms) -> Self {
        ShaderMaterial::from_ordered(&HOLOGRAPHIC, vec![u.time.into()])
    }
}
