//! Data-flow diagram: glowing processing nodes joined by curved streams with
//! packets running along them.

use crate::buffer::SpriteInstance;
use crate::color::{palette, rgb};
use crate::motion::{CatmullRom, Curve, FlowPacket, Spin, Wave, REFERENCE_FPS};
use crate::scene::{write_nodes, Animated, Light, Material, Node, Primitive, SceneConfig, Transform};
use crate::spawn::{make_rng, SpawnContext};
use glam::{Mat4, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI};

/// Node layout and palette of a flow diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowTheme {
    #[default]
    Neural,
    Quantum,
    Genetic,
}

impl FlowTheme {
    pub const ALL: [FlowTheme; 3] = [FlowTheme::Neural, FlowTheme::Quantum, FlowTheme::Genetic];

    /// Node positions and colors.
    pub fn nodes(self) -> &'static [([f32; 3], u32)] {
        match self {
            FlowTheme::Neural => &[
                ([-2.0, 1.0, 0.0], 0x4db6ac),
                ([0.0, 0.0, 0.0], 0x5c9bd5),
                ([2.0, -1.0, 0.0], 0x9575cd),
                ([-1.0, -1.5, 0.0], 0xffca28),
                ([1.0, 1.5, 0.0], 0x7cb342),
            ],
            FlowTheme::Quantum => &[
                ([0.0, 0.0, 0.0], 0x9c27b0),
                ([1.5, 0.0, 1.5], 0x3f51b5),
                ([-1.5, 0.0, 1.5], 0x00bcd4),
                ([0.0, 1.5, -1.5], 0x4caf50),
                ([0.0, -1.5, -1.5], 0xff9800),
            ],
            FlowTheme::Genetic => &[
                ([-2.0, 0.0, 0.0], 0xe91e63),
                ([-1.0, 1.5, 0.0], 0x9c27b0),
                ([0.0, 0.0, 1.5], 0x673ab7),
                ([1.0, 1.5, 0.0], 0x3f51b5),
                ([2.0, 0.0, 0.0], 0x2196f3),
                ([1.0, -1.5, 0.0], 0x00bcd4),
                ([0.0, 0.0, -1.5], 0x009688),
                ([-1.0, -1.5, 0.0], 0x4caf50),
            ],
        }
    }

    /// Directed stream endpoints as node indices.
    pub fn connections(self) -> &'static [(usize, usize)] {
        match self {
            FlowTheme::Neural => &[(0, 1), (1, 2), (0, 3), (3, 1), (1, 4), (4, 2)],
            FlowTheme::Quantum => &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 1),
            ],
            FlowTheme::Genetic => &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 0),
                (0, 2),
                (2, 4),
                (4, 6),
                (6, 0),
                (1, 3),
                (3, 5),
                (5, 7),
                (7, 1),
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlowTheme::Neural => "neural",
            FlowTheme::Quantum => "quantum",
            FlowTheme::Genetic => "genetic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataFlowConfig {
    pub theme: FlowTheme,
    pub packets_per_stream: usize,
    /// Samples along each stream curve for the preview line.
    pub stream_divisions: usize,
    pub ambient_count: usize,
    pub ambient_bounds: Vec3,
    pub seed: Option<u64>,
}

impl Default for DataFlowConfig {
    fn default() -> Self {
        Self {
            theme: FlowTheme::default(),
            packets_per_stream: 5,
            stream_divisions: 50,
            ambient_count: 20,
            ambient_bounds: Vec3::new(8.0, 6.0, 4.0),
            seed: None,
        }
    }
}

/// A processing node: pulsing core and three tilted rings.
struct ProcessingNode {
    core: Node,
    rings: Vec<Node>,
    ring_spin: Spin,
    pulse: Wave,
}

/// A curved stream between two nodes and the packets on it.
pub struct Stream {
    pub from: usize,
    pub to: usize,
    curve: CatmullRom,
    line: Node,
    packets: Vec<FlowPacket>,
    packet_views: Vec<Node>,
    packet_spin: Spin,
}

impl Stream {
    pub fn curve(&self) -> &CatmullRom {
        &self.curve
    }

    pub fn packets(&self) -> &[FlowPacket] {
        &self.packets
    }

    pub fn packet_views(&self) -> &[Node] {
        &self.packet_views
    }
}

/// Themed node diagram with packets streaming between nodes.
pub struct DataFlow {
    theme: FlowTheme,
    nodes: Vec<ProcessingNode>,
    streams: Vec<Stream>,
    ambient: Vec<Node>,
    group: Transform,
}

impl DataFlow {
    pub fn new(config: DataFlowConfig) -> Self {
        let mut rng = make_rng(config.seed);
        let layout = config.theme.nodes();

        let nodes = layout
            .iter()
            .enumerate()
            .map(|(i, &(position, color))| {
                let position = Vec3::from(position);
                let color = rgb(color);
                let core = Node::new(
                    format!("node-{}", i),
                    Primitive::Sphere {
                        radius: 0.15 + (i as f32).sin() * 0.05,
                    },
                    Material::new(color).with_emissive(0.6).with_opacity(0.9),
                )
                .at(position);
                let rings = (0..3)
                    .map(|r| {
                        Node::new(
                            format!("node-{}-ring-{}", i, r),
                            Primitive::Torus {
                                radius: 0.3 + r as f32 * 0.1,
                                tube: 0.005,
                            },
                            Material::new(color).with_opacity(0.4 - r as f32 * 0.1),
                        )
                        .with_transform(Transform {
                            rotation: Vec3::new(FRAC_PI_2, 0.0, r as f32 * PI / 3.0),
                            ..Transform::IDENTITY
                        })
                    })
                    .collect();
                ProcessingNode {
                    core,
                    rings,
                    ring_spin: Spin::per_frame(Vec3::new(0.01, 0.02, 0.0)),
                    pulse: Wave::pulse(1.0, 0.1, 1.0 + i as f32 * 0.2),
                }
            })
            .collect::<Vec<_>>();

        let streams = config
            .theme
            .connections()
            .iter()
            .filter(|&&(from, to)| from < layout.len() && to < layout.len())
            .map(|&(from, to)| {
                let start = Vec3::from(layout[from].0);
                let end = Vec3::from(layout[to].0);
                let bend = |t: f32, rng: &mut rand::rngs::SmallRng| {
                    let offset = Vec3::new(
                        (rng.gen::<f32>() - 0.5) * 2.0,
                        (rng.gen::<f32>() - 0.5) * 2.0,
                        (rng.gen::<f32>() - 0.5) * 1.0,
                    );
                    start.lerp(end, t) + offset
                };
                let mid1 = bend(0.33, &mut rng);
                let mid2 = bend(0.66, &mut rng);
                let curve = CatmullRom::new(vec![start, mid1, mid2, end]);

                let speed = 0.8 + rng.gen::<f32>() * 0.4;
                // Packets advance `speed / 100` of the stream per reference frame.
                let per_second = speed * 0.01 * REFERENCE_FPS;
                let count = config.packets_per_stream;
                let packets: Vec<FlowPacket> = (0..count)
                    .map(|i| FlowPacket::new(i as f32 / count as f32, per_second))
                    .collect();

                let color = rgb(layout[from].1);
                let line = Node::new(
                    format!("stream-{}-{}", from, to),
                    Primitive::Line {
                        points: curve.sample(config.stream_divisions),
                    },
                    Material::new(color).with_opacity(0.3),
                );
                let packet_views = packets
                    .iter()
                    .map(|p| {
                        Node::new(
                            "packet",
                            Primitive::Box {
                                size: Vec3::splat(0.03),
                            },
                            Material::new(color).with_emissive(0.4),
                        )
                        .at(curve.point(p.progress()))
                    })
                    .collect();

                Stream {
                    from,
                    to,
                    curve,
                    line,
                    packets,
                    packet_views,
                    packet_spin: Spin::per_frame(Vec3::new(0.02, 0.03, 0.0)),
                }
            })
            .collect();

        let n = layout.len().max(1);
        let ambient = (0..config.ambient_count)
            .map(|i| {
                let position = SpawnContext::new(i, config.ambient_count, &mut rng)
                    .random_in_box(config.ambient_bounds);
                let color = layout.get(i % n).map_or(palette::TEAL, |&(_, c)| c);
                Node::new(
                    "ambient",
                    Primitive::Sphere { radius: 0.01 },
                    Material::new(rgb(color)).with_opacity(0.3),
                )
                .at(position)
            })
            .collect();

        log::debug!(
            "Data flow '{}': {} nodes, {} streams",
            config.theme.name(),
            layout.len(),
            config.theme.connections().len()
        );

        Self {
            theme: config.theme,
            nodes,
            streams,
            ambient,
            group: Transform::IDENTITY,
        }
    }

    /// Full scene with the diagram's camera and lighting.
    pub fn scene(config: DataFlowConfig) -> SceneConfig {
        SceneConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 6.0))
            .with_field_of_view(50.0)
            .with_light(Light::ambient(0.1))
            .with_light(Light::point(Vec3::new(3.0, 3.0, 3.0), 0.8).with_color(palette::WHITE))
            .with_light(Light::point(Vec3::new(-3.0, -3.0, 3.0), 0.6).with_color(palette::TEAL))
            .with_light(Light::spot(Vec3::new(0.0, 5.0, 0.0), 0.4, 0.5, 0.7).with_color(palette::BLUE))
            .with_child(Self::new(config))
    }

    pub fn theme(&self) -> FlowTheme {
        self.theme
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_scale(&self, index: usize) -> Option<f32> {
        self.nodes.get(index).map(|n| n.core.transform.scale.x)
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn group(&self) -> Transform {
        self.group
    }
}

impl Animated for DataFlow {
    fn name(&self) -> &str {
        "data-flow"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        self.group.rotation.y = Wave::oscillate(0.2, 0.1).value(elapsed);

        for node in &mut self.nodes {
            node.core.transform.scale = Vec3::splat(node.pulse.value(elapsed));
            node.ring_spin.advance(delta);
        }

        for stream in &mut self.streams {
            stream.packet_spin.advance(delta);
            let spin = stream.packet_spin.angle();
            for (packet, view) in stream.packets.iter_mut().zip(&mut stream.packet_views) {
                packet.advance(delta);
                view.transform.position = stream.curve.point(packet.progress());
                view.transform.rotation = spin;
            }
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let group = self.group.matrix();
        for stream in &self.streams {
            stream.line.write_sprites(group, out);
            write_nodes(&stream.packet_views, group, out);
        }
        for node in &self.nodes {
            node.core.write_sprites(group, out);
            // Rings turn about the node center.
            let ring_group = group
                * Mat4::from_translation(node.core.transform.position)
                * Mat4::from_quat(node.ring_spin.rotation());
            write_nodes(&node.rings, ring_group, out);
        }
        write_nodes(&self.ambient, group, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_tables() {
        for theme in FlowTheme::ALL {
            let n = theme.nodes().len();
            for &(a, b) in theme.connections() {
                assert!(a < n && b < n, "{} links {}-{}", theme.name(), a, b);
            }
        }
        assert_eq!(FlowTheme::Neural.connections().len(), 6);
        assert_eq!(FlowTheme::Quantum.connections().len(), 8);
        assert_eq!(FlowTheme::Genetic.nodes().len(), 8);
        assert_eq!(FlowTheme::Genetic.connections().len(), 16);
    }

    #[test]
    fn test_streams_pass_through_endpoints() {
        let flow = DataFlow::new(DataFlowConfig {
            theme: FlowTheme::Quantum,
            seed: Some(4),
            ..Default::default()
        });
        let layout = FlowTheme::Quantum.nodes();
        for stream in flow.streams() {
            let start = Vec3::from(layout[stream.from].0);
            let end = Vec3::from(layout[stream.to].0);
            assert!((stream.curve().point(0.0) - start).length() < 1e-4);
            assert!((stream.curve().point(1.0) - end).length() < 1e-4);
        }
    }

    #[test]
    fn test_packets_start_evenly_spaced() {
        let flow = DataFlow::new(DataFlowConfig {
            seed: Some(1),
            ..Default::default()
        });
        let stream = &flow.streams()[0];
        let progress: Vec<f32> = stream.packets().iter().map(|p| p.progress()).collect();
        assert_eq!(progress, vec![0.0, 0.2, 0.4, 0.6, 0.8]);
        for p in stream.packets() {
            assert!(p.speed >= 0.48 - 1e-5 && p.speed <= 0.72 + 1e-5);
        }
    }

    #[test]
    fn test_packets_follow_curve() {
        let mut flow = DataFlow::new(DataFlowConfig {
            seed: Some(2),
            ..Default::default()
        });
        flow.advance(0.5, 0.5);
        for stream in flow.streams() {
            for (packet, view) in stream.packets().iter().zip(stream.packet_views()) {
                assert!(packet.progress() >= 0.0 && packet.progress() < 1.0);
                let expected = stream.curve().point(packet.progress());
                assert!((view.transform.position - expected).length() < 1e-5);
            }
        }
    }

    #[test]
    fn test_node_pulse_speed_grows_with_index() {
        let mut flow = DataFlow::new(DataFlowConfig {
            seed: Some(3),
            ..Default::default()
        });
        flow.advance(1.0, 0.016);
        for i in 0..flow.node_count() {
            let expected = (1.0 + i as f32 * 0.2).sin() * 0.1 + 1.0;
            assert!((flow.node_scale(i).unwrap() - expected).abs() < 1e-5);
        }
        assert!(flow.node_scale(99).is_none());
    }

    #[test]
    fn test_scene_preset() {
        let config = DataFlow::scene(DataFlowConfig::default());
        assert_eq!(config.lights().len(), 4);
        assert_eq!(config.camera().fov_degrees, 50.0);
    }
}
