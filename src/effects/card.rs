//! Small visuals embedded in project cards.
//!
//! Card `i` shows one of three visuals, cycling by index, inside its own
//! little scene.

use super::field::{QuantumField, QuantumFieldConfig};
use super::network::{DnaHelix, DnaHelixConfig};
use crate::buffer::SpriteInstance;
use crate::color::{palette, rgb};
use crate::scene::{write_nodes, Animated, Light, Material, Node, Primitive, SceneConfig, Transform};
use glam::Vec3;

/// A 3x4 grid of nodes, the first two columns fully linked and the last two
/// linked row by row.
pub struct CardNetwork {
    /// Phase offset so neighbouring cards do not sway in sync.
    index: usize,
    nodes: Vec<Node>,
    links: Vec<Node>,
    links_by_index: Vec<(usize, usize)>,
    group: Transform,
}

impl CardNetwork {
    const LAYERS: usize = 3;
    const PER_LAYER: usize = 4;

    pub fn new(index: usize) -> Self {
        let mut positions = Vec::with_capacity(Self::LAYERS * Self::PER_LAYER);
        for layer in 0..Self::LAYERS {
            for node in 0..Self::PER_LAYER {
                positions.push(Vec3::new(
                    (layer as f32 - 1.0) * 1.5,
                    (node as f32 - 1.5) * 0.5,
                    0.0,
                ));
            }
        }

        let mut links_by_index = Vec::new();
        for i in 0..Self::PER_LAYER {
            for j in Self::PER_LAYER..Self::PER_LAYER * 2 {
                links_by_index.push((i, j));
            }
        }
        for j in Self::PER_LAYER * 2..Self::PER_LAYER * 3 {
            links_by_index.push((j - Self::PER_LAYER, j));
        }

        let nodes = positions
            .iter()
            .map(|&p| {
                Node::new(
                    "card-node",
                    Primitive::Sphere { radius: 0.05 },
                    Material::new(rgb(palette::TEAL)).with_emissive(0.2),
                )
                .at(p)
            })
            .collect();

        let links = links_by_index
            .iter()
            .map(|&(a, b)| {
                Node::new(
                    "card-link",
                    Primitive::Line {
                        points: vec![positions[a], positions[b]],
                    },
                    Material::new(rgb(palette::BLUE)).with_opacity(0.6),
                )
            })
            .collect();

        Self {
            index,
            nodes,
            links,
            links_by_index,
            group: Transform::IDENTITY.with_scale(0.3),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[(usize, usize)] {
        &self.links_by_index
    }

    pub fn group(&self) -> Transform {
        self.group
    }
}

impl Animated for CardNetwork {
    fn name(&self) -> &str {
        "card-network"
    }

    fn advance(&mut self, elapsed: f64, _delta: f32) {
        let arg = (elapsed * 0.5 + self.index as f64).rem_euclid(std::f64::consts::TAU);
        self.group.rotation.y = arg.sin() as f32 * 0.2;
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        let group = self.group.matrix();
        write_nodes(&self.links, group, out);
        write_nodes(&self.nodes, group, out);
    }
}

/// Which visual a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVisualKind {
    Neural,
    DnaHelix,
    QuantumField,
}

impl CardVisualKind {
    pub fn for_index(index: usize) -> Self {
        match index % 3 {
            0 => CardVisualKind::Neural,
            1 => CardVisualKind::DnaHelix,
            _ => CardVisualKind::QuantumField,
        }
    }
}

/// The visual for one card.
pub enum CardVisual {
    Neural(CardNetwork),
    DnaHelix(DnaHelix),
    QuantumField(QuantumField),
}

impl CardVisual {
    pub fn for_card(index: usize, seed: Option<u64>) -> Self {
        match CardVisualKind::for_index(index) {
            CardVisualKind::Neural => CardVisual::Neural(CardNetwork::new(index)),
            CardVisualKind::DnaHelix => CardVisual::DnaHelix(DnaHelix::new(DnaHelixConfig::default())),
            CardVisualKind::QuantumField => CardVisual::QuantumField(QuantumField::new(
                QuantumFieldConfig {
                    seed,
                    ..Default::default()
                },
            )),
        }
    }

    pub fn kind(&self) -> CardVisualKind {
        match self {
            CardVisual::Neural(_) => CardVisualKind::Neural,
            CardVisual::DnaHelix(_) => CardVisualKind::DnaHelix,
            CardVisual::QuantumField(_) => CardVisualKind::QuantumField,
        }
    }

    /// A complete card scene: camera, the card's lighting and this visual.
    pub fn scene(index: usize, seed: Option<u64>) -> SceneConfig {
        SceneConfig::new()
            .with_camera_position(Vec3::new(0.0, 0.0, 4.0))
            .with_field_of_view(50.0)
            .with_light(Light::ambient(0.1))
            .with_light(Light::point(Vec3::new(2.0, 2.0, 2.0), 0.8).with_color(palette::TEAL))
            .with_light(Light::point(Vec3::new(-2.0, -2.0, -2.0), 0.6).with_color(palette::BLUE))
            .with_child(Self::for_card(index, seed))
    }

    fn inner(&self) -> &dyn Animated {
        match self {
            CardVisual::Neural(v) => v,
            CardVisual::DnaHelix(v) => v,
            CardVisual::QuantumField(v) => v,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Animated {
        match self {
            CardVisual::Neural(v) => v,
            CardVisual::DnaHelix(v) => v,
            CardVisual::QuantumField(v) => v,
        }
    }
}

impl Animated for CardVisual {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        self.inner_mut().advance(elapsed, delta);
    }

    fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        self.inner().collect_sprites(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cycles_by_index() {
        let kinds: Vec<_> = (0..6).map(CardVisualKind::for_index).collect();
        assert_eq!(
            kinds,
            vec![
                CardVisualKind::Neural,
                CardVisualKind::DnaHelix,
                CardVisualKind::QuantumField,
                CardVisualKind::Neural,
                CardVisualKind::DnaHelix,
                CardVisualKind::QuantumField,
            ]
        );
        assert_eq!(CardVisual::for_card(4, Some(1)).kind(), CardVisualKind::DnaHelix);
    }

    #[test]
    fn test_card_network_links() {
        let network = CardNetwork::new(0);
        assert_eq!(network.nodes().len(), 12);
        assert_eq!(network.links().len(), 20);
        assert!(network.links().contains(&(4, 8)));
        assert!(network.links().contains(&(7, 11)));
        assert!(!network.links().contains(&(4, 9)));
    }

    #[test]
    fn test_card_network_sway_is_offset_by_index() {
        let mut a = CardNetwork::new(0);
        let mut b = CardNetwork::new(1);
        a.advance(0.0, 0.0);
        b.advance(0.0, 0.0);
        assert_eq!(a.group().rotation.y, 0.0);
        assert!((b.group().rotation.y - 1f32.sin() * 0.2).abs() < 1e-6);
        assert_eq!(a.group().scale, Vec3::splat(0.3));
    }

    #[test]
    fn test_visual_dispatch() {
        let mut visual = CardVisual::for_card(2, Some(7));
        assert_eq!(visual.name(), "quantum-field");
        visual.advance(0.1, 0.016);
        let mut out = Vec::new();
        visual.collect_sprites(&mut out);
        assert_eq!(out.len(), 200);
    }

    #[test]
    fn test_card_scene_lighting() {
        let config = CardVisual::scene(0, None);
        assert_eq!(config.lights().len(), 3);
        assert_eq!(config.camera().position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(config.child_count(), 1);
    }
}
