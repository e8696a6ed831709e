//! # folio-fx - animated scenes for a portfolio site
//!
//! Procedural particle fields, networks and shader materials behind every
//! canvas of the site, with a small wgpu preview renderer.
//!
//! folio-fx owns the per-frame math (spin, waves, flowing packets, easing) so
//! each canvas only declares what it shows and where the camera sits.
//!
//! ## Quick Start
//!
//! ```ignore
//! use folio_fx::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     folio_fx::init();
//!
//!     let mut stage = Stage::new().with_viewport(1280, 720);
//!     let id = stage.mount(
//!         SceneConfig::new()
//!             .with_camera_position(Vec3::new(0.0, 0.0, 5.0))
//!             .with_field_of_view(60.0)
//!             .with_light(Light::ambient(0.2))
//!             .with_child(ParticleField::new(ParticleFieldConfig::default())),
//!     )?;
//!
//!     let mut time = Time::new();
//!     let (_, delta) = time.update();
//!     stage.tick(delta);
//!
//!     stage.unmount(id);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field generation
//!
//! A [`FieldRule`](spawn::FieldRule) fills a [`ParticleBuffer`](buffer::ParticleBuffer)
//! with positions and colors. Rules are pure functions of the particle index
//! and a seeded RNG, so the same seed always gives the same field:
//!
//! ```ignore
//! let galaxy = generate_seeded(&FieldRule::spiral(), 2000, 7);
//! ```
//!
//! ### Entities
//!
//! Everything that moves implements [`Animated`](scene::Animated). The effects
//! in [`effects`] cover every canvas on the site: particle fields, neural
//! webs, layered networks with flowing packets, morphing meshes, holographic
//! planes, bar charts and the matrix rain overlay.
//!
//! ### Stage and scenes
//!
//! A [`Stage`](scene::Stage) is the frame-callback registry. Mounting a
//! [`SceneConfig`](scene::SceneConfig) registers one callback and the
//! entities' resize listeners; unmounting removes both and drops the scene.
//!
//! ### Shader materials
//!
//! The [`shaders`] module holds the six WGSL pairs and their uniform schemas.
//! A [`ShaderMaterial`](shaders::ShaderMaterial) is only constructible from a
//! complete value set, and its bytes match the WGSL struct layout.
//!
//! ### Showcases
//!
//! [`Showcase`](showcase::Showcase) names each ready-made canvas. The
//! `folio-fx` binary opens a window and renders one:
//!
//! ```text
//! cargo run --release -- flow-quantum
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade. [`init`] installs `env_logger`
//! if no logger is set yet; filter with `RUST_LOG=folio_fx=debug`.

pub mod buffer;
pub mod color;
pub mod content;
pub mod effects;
pub mod error;
pub mod gpu;
pub mod motion;
pub mod scene;
pub mod shaders;
pub mod showcase;
pub mod spawn;
pub mod time;
pub mod tween;

pub use bytemuck;
pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Prepare the process-wide state scenes depend on.
///
/// Installs a default `env_logger` (ignored if the host already set one) and
/// builds the shader library. Safe to call more than once; returns true only
/// on the call that did the work.
pub fn init() -> bool {
    let _ = env_logger::try_init();
    let built = shaders::ShaderLibrary::install();
    if built {
        log::info!("folio-fx {} initialized", env!("CARGO_PKG_VERSION"));
    } else {
        log::debug!("folio-fx already initialized");
    }
    built
}

/// Whether [`init`] has run. [`Stage::mount`](scene::Stage::mount) refuses
/// scenes until it has.
pub fn is_initialized() -> bool {
    shaders::ShaderLibrary::global().is_some()
}

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use folio_fx::prelude::*;
/// ```
///
/// This imports:
/// - [`Stage`], [`SceneConfig`], [`Light`], [`Camera`] - scene composition
/// - every effect and its config
/// - [`Showcase`] - the ready-made canvases
/// - [`Time`], [`Spin`], [`Wave`], [`Tween`] - animation primitives
/// - [`FieldRule`] and the generators
/// - [`Vec2`], [`Vec3`], [`Vec4`] - glam vector types
/// - the error types
pub mod prelude {
    pub use crate::buffer::{ParticleBuffer, SpriteInstance};
    pub use crate::color::{palette, rgb};
    pub use crate::effects::*;
    pub use crate::error::{
        ContactError, GpuError, MaterialError, SceneError, SnapshotError, ViewerError,
    };
    pub use crate::motion::{
        approach, flow_progress, CatmullRom, Curve, FlowPacket, Segment, Spin, Wave,
    };
    pub use crate::scene::{
        Animated, Camera, Light, LightKind, Material, Node, Primitive, Scene, SceneConfig,
        SceneId, Stage, Transform,
    };
    pub use crate::shaders::{ShaderLibrary, ShaderMaterial, UniformValue};
    pub use crate::showcase::Showcase;
    pub use crate::spawn::{generate, generate_seeded, FieldRule, SpawnContext};
    pub use crate::time::Time;
    pub use crate::tween::{Ease, Repeat, Tween};
    pub use crate::{Mat4, Vec2, Vec3, Vec4};
}
