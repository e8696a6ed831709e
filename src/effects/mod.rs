//! Animated entities. Each one owns its buffers and nodes and implements
//! [`Animated`](crate::scene::Animated).

mod bars;
mod card;
mod field;
mod flow;
mod geometry;
mod network;
mod rain;

pub use bars::{bar_glow, DataBars, DataBarsConfig};
pub use card::{CardNetwork, CardVisual, CardVisualKind};
pub use field::{
    ParticleCloud, ParticleCloudConfig, ParticleField, ParticleFieldConfig, ParticleWave,
    ParticleWaveConfig, QuantumField, QuantumFieldConfig,
};
pub use flow::{DataFlow, DataFlowConfig, FlowTheme, Stream};
pub use geometry::{
    FloatingGeometry, FloatingGeometryConfig, HoloPlane, HoloPlaneConfig, MorphingMesh,
    MorphingMeshConfig, MorphingShape, MorphingShapeConfig, SolidShape,
};
pub use network::{
    DnaHelix, DnaHelixConfig, LayerSpec, LayeredNetwork, LayeredNetworkConfig, NeuralWeb,
    NeuralWebConfig, Neuron, Synapse, WebEdge, WebNode,
};
pub use rain::{MatrixRain, MatrixRainConfig, GLYPHS};
