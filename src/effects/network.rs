//! Graph-shaped effects: the proximity web, the layered feed-forward network
//! and the double helix.

use crate::buffer::SpriteInstance;
use crate::color::{palette, rgb};
use crate::motion::{flow_progress, Spin, Wave};
use crate::scene::{write_nodes, Animated, Material, Node, Primitive, Transform};
use crate::shaders::{NeuralNodeUniforms, ShaderMaterial};
use crate::spawn::{make_rng, SpawnContext};
use glam::{Mat4, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuralWebConfig {
    pub node_count: usize,
    /// Nodes are scattered uniformly inside this box.
    pub bounds: Vec3,
    /// Each node gets between 1 and this many nominal connections, which
    /// brighten it.
    pub max_connections: u32,
    /// Only pairs closer than this can be linked.
    pub link_distance: f32,
    /// Chance that a close pair is linked.
    pub link_chance: f32,
    pub node_radius: f32,
    pub seed: Option<u64>,
}

impl Default for NeuralWebConfig {
    fn default() -> Self {
        Self {
            node_count: 25,
            bounds: Vec3::new(4.0, 3.0, 2.0),
            max_connections: 6,
            link_distance: 1.5,
            link_chance: 0.3,
            node_radius: 0.03,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebNode {
    pub position: Vec3,
    pub connections: u32,
}

/// Undirected link, `from < to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebEdge {
    pub from: usize,
    pub to: usize,
    /// `1 - distance / link_distance`, in `(0, 1]`.
    pub strength: f32,
}

/// Randomly scattered nodes linked to their near neighbours.
///
/// Nodes pulse in size and brightness; edge opacity follows link strength.
pub struct NeuralWeb {
    nodes: Vec<WebNode>,
    edges: Vec<WebEdge>,
    node_views: Vec<Node>,
    edge_views: Vec<Node>,
    material: ShaderMaterial,
}

impl NeuralWeb {
    pub fn new(config: NeuralWebConfig) -> Self {
        let mut rng = make_rng(config.seed);
        let n = config.node_count;

        let nodes: Vec<WebNode> = (0..n)
            .map(|i| {
                let position = SpawnContext::new(i, n, &mut rng).random_in_box(config.bounds);
                let connections = rng.gen_range(1..=config.max_connections.max(1));
                WebNode {
                    position,
                    connections,
                }
            })
            .collect();

        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let distance = nodes[i].position.distance(nodes[j].position);
                if distance < config.link_distance && rng.gen::<f32>() < config.link_chance {
                    edges.push(WebEdge {
                        from: i,
                        to: j,
                        strength: 1.0 - distance / config.link_distance,
                    });
                }
            }
        }

        let node_views = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                Node::new(
                    format!("web-node-{}", i),
                    Primitive::Sphere {
                        radius: config.node_radius,
                    },
                    Material::new(rgb(palette::TEAL)),
                )
                .at(node.position)
            })
            .collect();

        let edge_views = edges
            .iter()
            .map(|edge| {
                Node::new(
                    format!("web-edge-{}-{}", edge.from, edge.to),
                    Primitive::Line {
                        points: vec![nodes[edge.from].position, nodes[edge.to].position],
                    },
                    Material::new(rgb(palette::BLUE)),
                )
            })
            .collect();

        log::debug!("Neural web: {} nodes, {} edges", nodes.len(), edges.len());

        Self {
            nodes,
            edges,
            node_views,
            edge_views,
            material: NeuralNodeUniforms {
                time: 0.0,
                node_size: config.node_radius,
            }
            .into(),
        }
    }

    pub fn nodes(&self) -> &[WebNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WebEdge] {
        &self.edges
    }

    pub fn node_views(&self) -> &[Node] {
        &self.node_views
    }

    pub fn edge_views(&self) -> &[Node] {
        &self.edge_views
    }

    pub fn material(&self) -> &ShaderMaterial {
        &self.material
    }
}

impl Animated for NeuralWeb {
    fn name(&self) -> &str {
        "neural-web"
    }

    fn advance(&mut self, elapsed: f64, _delta: f32) {
        self.material.set_time(elapsed);
        let flicker = Wave::oscillate(0.2, 3.0).value(elapsed);
        for (node, view) in self.nodes.iter().zip(&mut self.node_views) {
            let scale = Wave::pulse(1.0, 0.1, 2.0)
                .with_phase(node.position.x)
                .value(elapsed);
            view.transform.scale = Vec3::splat(scale);
            view.material.opacity = 0.5 + node.connections as f32 / 10.0 * 0.5 + flicker;
        }

        let shimmer = Wave::pulse(0.3, 0.1, 2.0).value(elapsed);
        for (edge, view) in self.edges.iter().zip(&mut self.edge_views) {
            view.material.opacity = edge.strength * shimmer;
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        write_nodes(&self.edge_views, Mat4::IDENTITY, out);
        write_nodes(&self.node_views, Mat4::IDENTITY, out);
    }
}

/// One column of neurons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpec {
    pub count: usize,
    pub x: f32,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayeredNetworkConfig {
    pub layers: Vec<LayerSpec>,
    /// Vertical gap between neurons in a layer.
    pub spacing: f32,
    /// Depth jitter range per neuron.
    pub depth_jitter: f32,
    pub neuron_radius: f32,
    pub packets_per_synapse: usize,
    /// Progress gap between packets on one synapse.
    pub packet_gap: f32,
    /// Packets are hidden once past this fraction of the synapse.
    pub hide_after: f32,
    /// Loose background specks around the network.
    pub dust_count: usize,
    pub dust_bounds: Vec3,
    pub seed: Option<u64>,
}

impl Default for LayeredNetworkConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                LayerSpec {
                    count: 6,
                    x: -2.5,
                    color: palette::TEAL,
                },
                LayerSpec {
                    count: 8,
                    x: 0.0,
                    color: palette::BLUE,
                },
                LayerSpec {
                    count: 6,
                    x: 2.5,
                    color: palette::PURPLE,
                },
            ],
            spacing: 0.6,
            depth_jitter: 0.4,
            neuron_radius: 0.08,
            packets_per_synapse: 3,
            packet_gap: 0.1,
            hide_after: 0.8,
            dust_count: 50,
            dust_bounds: Vec3::new(20.0, 15.0, 10.0),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neuron {
    pub position: Vec3,
    /// Random activation in `[0, 1)`; phases the pulse and sets the glow.
    pub activity: f32,
    pub layer: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synapse {
    pub from: usize,
    pub to: usize,
    pub activity: f32,
}

/// Fully connected layers with amber packets travelling along each synapse.
pub struct LayeredNetwork {
    config: LayeredNetworkConfig,
    neurons: Vec<Neuron>,
    synapses: Vec<Synapse>,
    neuron_views: Vec<Node>,
    synapse_views: Vec<Node>,
    /// `packets_per_synapse` consecutive entries per synapse.
    packets: Vec<Node>,
    /// Static markers and background dust, outside the rotating group.
    extras: Vec<Node>,
    group: Transform,
}

impl LayeredNetwork {
    pub fn new(config: LayeredNetworkConfig) -> Self {
        let mut rng = make_rng(config.seed);

        let mut neurons = Vec::new();
        let mut layer_ranges = Vec::with_capacity(config.layers.len());
        for (layer, spec) in config.layers.iter().enumerate() {
            let start = neurons.len();
            for i in 0..spec.count {
                let y = (i as f32 - (spec.count as f32 - 1.0) / 2.0) * config.spacing;
                let z = (rng.gen::<f32>() - 0.5) * config.depth_jitter;
                neurons.push(Neuron {
                    position: Vec3::new(spec.x, y, z),
                    activity: rng.gen(),
                    layer,
                });
            }
            layer_ranges.push(start..neurons.len());
        }

        let mut synapses = Vec::new();
        for pair in layer_ranges.windows(2) {
            for from in pair[0].clone() {
                for to in pair[1].clone() {
                    synapses.push(Synapse {
                        from,
                        to,
                        activity: rng.gen(),
                    });
                }
            }
        }

        let neuron_views = neurons
            .iter()
            .enumerate()
            .map(|(i, neuron)| {
                let color = rgb(config.layers[neuron.layer].color);
                Node::new(
                    format!("neuron-{}", i),
                    Primitive::Sphere {
                        radius: config.neuron_radius,
                    },
                    Material::new(color)
                        .with_emissive(neuron.activity * 0.5 + 0.2)
                        .with_opacity(0.9),
                )
                .at(neuron.position)
            })
            .collect();

        let synapse_views = synapses
            .iter()
            .map(|s| {
                Node::new(
                    format!("synapse-{}-{}", s.from, s.to),
                    Primitive::Line {
                        points: vec![neurons[s.from].position, neurons[s.to].position],
                    },
                    Material::new(rgb(palette::TEAL)).with_opacity(s.activity * 0.6 + 0.2),
                )
            })
            .collect();

        let packets = synapses
            .iter()
            .flat_map(|s| {
                let start = neurons[s.from].position;
                (0..config.packets_per_synapse).map(move |_| {
                    Node::new(
                        "packet",
                        Primitive::Sphere { radius: 0.02 },
                        Material::new(rgb(palette::AMBER)).with_opacity(0.8),
                    )
                    .at(start)
                })
            })
            .collect();

        let mut extras = vec![
            Node::new(
                "marker-amber",
                Primitive::Sphere { radius: 0.03 },
                Material::new(rgb(palette::AMBER)),
            )
            .at(Vec3::new(-3.0, 1.5, 0.5)),
            Node::new(
                "marker-green",
                Primitive::Sphere { radius: 0.03 },
                Material::new(rgb(palette::GREEN)),
            )
            .at(Vec3::new(3.0, -1.2, -0.3)),
        ];
        for i in 0..config.dust_count {
            let position =
                SpawnContext::new(i, config.dust_count, &mut rng).random_in_box(config.dust_bounds);
            let opacity = rng.gen::<f32>() * 0.3 + 0.1;
            extras.push(
                Node::new(
                    "dust",
                    Primitive::Sphere { radius: 0.01 },
                    Material::new(rgb(palette::TEAL)).with_opacity(opacity),
                )
                .at(position),
            );
        }

        log::debug!(
            "Layered network: {} neurons, {} synapses",
            neurons.len(),
            synapses.len()
        );

        Self {
            config,
            neurons,
            synapses,
            neuron_views,
            synapse_views,
            packets,
            extras,
            group: Transform::IDENTITY,
        }
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    pub fn packets(&self) -> &[Node] {
        &self.packets
    }

    pub fn group(&self) -> Transform {
        self.group
    }

    /// Progress of packet `index` on synapse `synapse` at `elapsed`.
    pub fn packet_progress(&self, synapse: usize, index: usize, elapsed: f64) -> f32 {
        let activity = self.synapses.get(synapse).map_or(0.0, |s| s.activity);
        flow_progress(elapsed, index as f32 * self.config.packet_gap + activity, 1.0)
    }
}

impl Animated for LayeredNetwork {
    fn name(&self) -> &str {
        "layered-network"
    }

    fn advance(&mut self, elapsed: f64, _delta: f32) {
        self.group.rotation = Vec3::new(
            Wave::oscillate(0.1, 0.15).value(elapsed),
            Wave::oscillate(0.2, 0.1).value(elapsed),
            0.0,
        );

        for (neuron, view) in self.neurons.iter().zip(&mut self.neuron_views) {
            let pulse = Wave::pulse(1.0, 0.1, 2.0)
                .with_phase(neuron.activity)
                .value(elapsed);
            view.transform.scale = Vec3::splat(pulse);
        }

        let per = self.config.packets_per_synapse;
        if per == 0 {
            return;
        }
        for (s, synapse) in self.synapses.iter().enumerate() {
            let start = self.neurons[synapse.from].position;
            let end = self.neurons[synapse.to].position;
            for j in 0..per {
                let t = flow_progress(
                    elapsed,
                    j as f32 * self.config.packet_gap + synapse.activity,
                    1.0,
                );
                let packet = &mut self.packets[s * per + j];
                packet.transform.position = start.lerp(end, t);
                packet.visible = t < self.config.hide_after;
            }
        }
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let group = self.group.matrix();
        write_nodes(&self.synapse_views, group, out);
        write_nodes(&self.neuron_views, group, out);
        write_nodes(&self.packets, group, out);
        write_nodes(&self.extras, Mat4::IDENTITY, out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DnaHelixConfig {
    /// Base pairs along the helix.
    pub rungs: usize,
    /// Full turns over the whole length.
    pub turns: f32,
    /// Height between consecutive rungs.
    pub rise: f32,
    pub radius: f32,
    /// Draw a cross link on every n-th rung.
    pub link_every: usize,
    pub spin_per_frame: f32,
    pub bob: Wave,
    pub scale: f32,
}

impl Default for DnaHelixConfig {
    fn default() -> Self {
        Self {
            rungs: 40,
            turns: 2.0,
            rise: 0.1,
            radius: 0.3,
            link_every: 3,
            spin_per_frame: 0.01,
            bob: Wave::oscillate(0.1, 1.0),
            scale: 0.8,
        }
    }
}

/// Two counter-phased strands of beads with periodic cross links.
pub struct DnaHelix {
    config: DnaHelixConfig,
    beads: Vec<Node>,
    links: Vec<Node>,
    spin: Spin,
    group: Transform,
}

impl DnaHelix {
    pub fn new(config: DnaHelixConfig) -> Self {
        let mut beads = Vec::with_capacity(config.rungs * 2);
        let mut links = Vec::new();
        let half = config.rungs as f32 / 2.0;

        for i in 0..config.rungs {
            let angle = i as f32 / config.rungs as f32 * config.turns * TAU;
            let y = (i as f32 - half) * config.rise;
            let a = Vec3::new(angle.cos() * config.radius, y, angle.sin() * config.radius);
            let b = Vec3::new(
                (angle + PI).cos() * config.radius,
                y,
                (angle + PI).sin() * config.radius,
            );

            let bead = |name: &str, color: u32, at: Vec3| {
                Node::new(
                    name,
                    Primitive::Sphere { radius: 0.02 },
                    Material::new(rgb(color)).with_emissive(0.3),
                )
                .at(at)
            };
            beads.push(bead("strand-a", palette::GREEN, a));
            beads.push(bead("strand-b", palette::PURPLE, b));

            if config.link_every > 0 && i % config.link_every == 0 {
                links.push(Node::new(
                    "link",
                    Primitive::Line { points: vec![a, b] },
                    Material::new(rgb(palette::TEAL)).with_opacity(0.4),
                ));
            }
        }

        Self {
            spin: Spin::per_frame(Vec3::new(0.0, config.spin_per_frame, 0.0)),
            group: Transform::IDENTITY.with_scale(config.scale),
            config,
            beads,
            links,
        }
    }

    pub fn beads(&self) -> &[Node] {
        &self.beads
    }

    pub fn links(&self) -> &[Node] {
        &self.links
    }

    pub fn group(&self) -> Transform {
        self.group
    }
}

impl Animated for DnaHelix {
    fn name(&self) -> &str {
        "dna-helix"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        self.spin.advance(delta);
        self.group.rotation.y = self.spin.angle().y;
        self.group.position.y = self.config.bob.value(elapsed);
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let group = self.group.matrix();
        write_nodes(&self.links, group, out);
        write_nodes(&self.beads, group, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_edges_respect_distance() {
        let web = NeuralWeb::new(NeuralWebConfig {
            node_count: 60,
            seed: Some(11),
            ..Default::default()
        });
        assert_eq!(web.nodes().len(), 60);
        for edge in web.edges() {
            assert!(edge.from < edge.to);
            let d = web.nodes()[edge.from]
                .position
                .distance(web.nodes()[edge.to].position);
            assert!(d < 1.5);
            assert!((edge.strength - (1.0 - d / 1.5)).abs() < 1e-5);
        }
        for node in web.nodes() {
            assert!((1..=6).contains(&node.connections));
            assert!(node.position.x.abs() <= 2.0 && node.position.y.abs() <= 1.5);
        }
    }

    #[test]
    fn test_web_is_reproducible_with_seed() {
        let config = NeuralWebConfig {
            seed: Some(3),
            ..Default::default()
        };
        let a = NeuralWeb::new(config);
        let b = NeuralWeb::new(config);
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_web_pulse() {
        let mut web = NeuralWeb::new(NeuralWebConfig {
            seed: Some(8),
            ..Default::default()
        });
        web.advance(0.0, 0.0);
        for (node, view) in web.nodes().iter().zip(web.node_views()) {
            let scale = 1.0 + node.position.x.sin() * 0.1;
            assert!((view.transform.scale.x - scale).abs() < 1e-5);
            let opacity = 0.5 + node.connections as f32 / 20.0;
            assert!((view.material.opacity - opacity).abs() < 1e-5);
        }
    }

    #[test]
    fn test_layers_fully_connect() {
        let network = LayeredNetwork::new(LayeredNetworkConfig {
            seed: Some(2),
            ..Default::default()
        });
        assert_eq!(network.neurons().len(), 20);
        assert_eq!(network.synapses().len(), 6 * 8 + 8 * 6);
        assert_eq!(network.packets().len(), network.synapses().len() * 3);
        for s in network.synapses() {
            let from = network.neurons()[s.from].layer;
            let to = network.neurons()[s.to].layer;
            assert_eq!(to, from + 1);
        }
        // Layers are centered vertically.
        let first: Vec<_> = network.neurons().iter().filter(|n| n.layer == 0).collect();
        let mean_y: f32 = first.iter().map(|n| n.position.y).sum::<f32>() / first.len() as f32;
        assert!(mean_y.abs() < 1e-5);
    }

    #[test]
    fn test_packets_travel_and_hide() {
        let mut network = LayeredNetwork::new(LayeredNetworkConfig {
            seed: Some(6),
            dust_count: 0,
            ..Default::default()
        });
        network.advance(1.3, 0.016);
        let synapse = network.synapses()[0];
        let start = network.neurons()[synapse.from].position;
        let end = network.neurons()[synapse.to].position;
        for j in 0..3 {
            let t = network.packet_progress(0, j, 1.3);
            let packet = &network.packets()[j];
            assert!((packet.transform.position - start.lerp(end, t)).length() < 1e-4);
            assert_eq!(packet.visible, t < 0.8);
        }
    }

    #[test]
    fn test_helix_strands_are_opposite() {
        let helix = DnaHelix::new(DnaHelixConfig::default());
        assert_eq!(helix.beads().len(), 80);
        assert_eq!(helix.links().len(), 14);
        for pair in helix.beads().chunks(2) {
            let a = pair[0].transform.position;
            let b = pair[1].transform.position;
            assert!((a.y - b.y).abs() < 1e-6);
            assert!((a.x + b.x).abs() < 1e-5 && (a.z + b.z).abs() < 1e-5);
        }
    }

    #[test]
    fn test_helix_turns_and_bobs() {
        let mut helix = DnaHelix::new(DnaHelixConfig::default());
        helix.advance(std::f64::consts::FRAC_PI_2, 1.0);
        assert!((helix.group().rotation.y - 0.6).abs() < 1e-5);
        assert!((helix.group().position.y - 0.1).abs() < 1e-5);
        assert_eq!(helix.group().scale, Vec3::splat(0.8));
    }
}
