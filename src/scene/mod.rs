//! Scene composition and the frame-callback registry.
//!
//! A [`SceneConfig`] gathers a camera, lights and animated entities. Mounting
//! it on a [`Stage`] produces a live [`Scene`] with its own clock; every
//! [`Stage::tick`] advances each mounted scene exactly once.
//!
//! ```ignore
//! use folio_fx::prelude::*;
//!
//! folio_fx::init();
//!
//! let mut stage = Stage::new();
//! let id = stage.mount(
//!     SceneConfig::new()
//!         .with_camera_position(Vec3::new(0.0, 5.0, 10.0))
//!         .with_field_of_view(60.0)
//!         .with_light(Light::ambient(0.2))
//!         .with_child(ParticleWave::new(ParticleWaveConfig::default())),
//! )?;
//!
//! stage.tick(1.0 / 60.0);
//! stage.unmount(id);
//! ```

mod camera;
mod light;
mod node;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::{Material, Node, Primitive, Transform};

use crate::buffer::SpriteInstance;
use crate::color::{palette, rgb};
use crate::error::SceneError;
use glam::{Mat4, Vec3};

/// Something that changes every frame.
///
/// Entities own their particle buffers and scene nodes. The scene calls
/// [`advance`](Self::advance) once per tick with the scene's elapsed time and
/// the frame delta, both in seconds.
pub trait Animated {
    /// Name used in log output.
    fn name(&self) -> &str;

    fn advance(&mut self, elapsed: f64, delta: f32);

    /// Viewport changed. Only called when [`listens_for_resize`](Self::listens_for_resize)
    /// returns true.
    fn on_resize(&mut self, _width: u32, _height: u32) {}

    fn listens_for_resize(&self) -> bool {
        false
    }

    /// Append billboards for the preview backend.
    fn collect_sprites(&self, _out: &mut Vec<SpriteInstance>) {}
}

/// Scene description, consumed by [`Stage::mount`].
pub struct SceneConfig {
    camera: Camera,
    lights: Vec<Light>,
    background: Vec3,
    children: Vec<Box<dyn Animated>>,
}

impl SceneConfig {
    /// Empty scene with the default camera and a night background.
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            lights: Vec::new(),
            background: rgb(palette::NIGHT),
            children: Vec::new(),
        }
    }

    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera.position = position;
        self
    }

    /// Vertical field of view in degrees.
    pub fn with_field_of_view(mut self, degrees: f32) -> Self {
        self.camera.fov_degrees = degrees;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_child<A: Animated + 'static>(mut self, child: A) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn with_boxed_child(mut self, child: Box<dyn Animated>) -> Self {
        self.children.push(child);
        self
    }

    /// Clear color as `0xRRGGBB`.
    pub fn with_background(mut self, hex: u32) -> Self {
        self.background = rgb(hex);
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A mounted scene.
pub struct Scene {
    camera: Camera,
    lights: Vec<Light>,
    background: Vec3,
    children: Vec<Box<dyn Animated>>,
    elapsed: f64,
    frame: u64,
}

impl Scene {
    fn from_config(config: SceneConfig) -> Self {
        Self {
            camera: config.camera,
            lights: config.lights,
            background: config.background,
            children: config.children,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Advance the scene clock, then every entity once.
    pub fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.elapsed += delta as f64;
        self.frame += 1;
        for child in &mut self.children {
            child.advance(self.elapsed, delta);
        }
    }

    /// Seconds since mount.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Ticks since mount.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> Vec3 {
        self.background
    }

    pub fn children(&self) -> &[Box<dyn Animated>] {
        &self.children
    }

    fn resize(&mut self, width: u32, height: u32) {
        for child in &mut self.children {
            if child.listens_for_resize() {
                child.on_resize(width, height);
            }
        }
    }

    fn resize_listeners(&self) -> usize {
        self.children
            .iter()
            .filter(|c| c.listens_for_resize())
            .count()
    }

    pub fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        for child in &self.children {
            child.collect_sprites(out);
        }
    }
}

/// Handle to a mounted scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

/// Registry of mounted scenes, driven once per frame by the render loop.
pub struct Stage {
    scenes: Vec<(SceneId, Scene)>,
    next_id: u64,
    viewport: Option<(u32, u32)>,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            next_id: 0,
            viewport: None,
        }
    }

    /// Stage with a known viewport; resize listeners receive it at mount.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    /// Register a scene's frame callback and resize listeners.
    pub fn mount(&mut self, config: SceneConfig) -> Result<SceneId, SceneError> {
        if !crate::is_initialized() {
            return Err(SceneError::NotInitialized);
        }

        let id = SceneId(self.next_id);
        self.next_id += 1;

        let mut scene = Scene::from_config(config);
        if scene.children.is_empty() {
            log::warn!("Scene {:?} has no entities; only the background will render", id);
        }
        if let Some((width, height)) = self.viewport {
            scene.resize(width, height);
        }

        log::debug!(
            "Mounted scene {:?} with {} entities ({} resize listeners)",
            id,
            scene.children.len(),
            scene.resize_listeners()
        );
        self.scenes.push((id, scene));
        Ok(id)
    }

    /// Deregister a scene and drop everything it owns.
    ///
    /// Returns false if the id was not mounted.
    pub fn unmount(&mut self, id: SceneId) -> bool {
        match self.scenes.iter().position(|(sid, _)| *sid == id) {
            Some(index) => {
                let (_, scene) = self.scenes.remove(index);
                log::debug!("Unmounted scene {:?} after {} frames", id, scene.frame);
                true
            }
            None => false,
        }
    }

    /// Advance every mounted scene by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        for (_, scene) in &mut self.scenes {
            scene.advance(delta);
        }
    }

    /// Forward a viewport change to every listening entity.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        log::debug!("Stage resized to {}x{}", width, height);
        for (_, scene) in &mut self.scenes {
            scene.resize(width, height);
        }
    }

    /// Number of registered frame callbacks (one per mounted scene).
    pub fn frame_callbacks(&self) -> usize {
        self.scenes.len()
    }

    /// Number of registered resize listeners across all scenes.
    pub fn resize_listeners(&self) -> usize {
        self.scenes.iter().map(|(_, s)| s.resize_listeners()).sum()
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|(sid, _)| *sid == id).map(|(_, s)| s)
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().map(|(_, s)| s)
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    pub fn collect_sprites(&self, out: &mut Vec<SpriteInstance>) {
        for (_, scene) in &self.scenes {
            scene.collect_sprites(out);
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

/// Write one node list under a group transform. Shared by the effects.
pub(crate) fn write_nodes(nodes: &[Node], group: Mat4, out: &mut Vec<SpriteInstance>) {
    for node in nodes {
        node.write_sprites(group, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        ticks: u32,
        last_elapsed: f64,
        resized: Option<(u32, u32)>,
        listens: bool,
    }

    impl Counter {
        fn new(listens: bool) -> Self {
            Self {
                ticks: 0,
                last_elapsed: 0.0,
                resized: None,
                listens,
            }
        }
    }

    impl Animated for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn advance(&mut self, elapsed: f64, _delta: f32) {
            assert!(elapsed >= self.last_elapsed);
            self.last_elapsed = elapsed;
            self.ticks += 1;
        }

        fn on_resize(&mut self, width: u32, height: u32) {
            self.resized = Some((width, height));
        }

        fn listens_for_resize(&self) -> bool {
            self.listens
        }
    }

    #[test]
    fn test_mount_requires_init() {
        // Other tests in this binary may have initialized already.
        if !crate::is_initialized() {
            let mut stage = Stage::new();
            assert_eq!(
                stage.mount(SceneConfig::new()).err(),
                Some(SceneError::NotInitialized)
            );
        }
        crate::init();
        assert!(Stage::new().mount(SceneConfig::new()).is_ok());
    }

    #[test]
    fn test_tick_advances_each_scene_once() {
        crate::init();
        let mut stage = Stage::new();
        let a = stage
            .mount(SceneConfig::new().with_child(Counter::new(false)))
            .unwrap();
        let b = stage.mount(SceneConfig::new()).unwrap();
        assert_eq!(stage.frame_callbacks(), 2);

        for _ in 0..10 {
            stage.tick(0.1);
        }

        let scene = stage.scene(a).unwrap();
        assert_eq!(scene.frame(), 10);
        assert!((scene.elapsed() - 1.0).abs() < 1e-6);
        assert_eq!(stage.scene(b).unwrap().frame(), 10);
    }

    #[test]
    fn test_unmount_deregisters() {
        crate::init();
        let mut stage = Stage::new();
        let id = stage
            .mount(SceneConfig::new().with_child(Counter::new(true)))
            .unwrap();
        assert_eq!(stage.resize_listeners(), 1);

        assert!(stage.unmount(id));
        assert_eq!(stage.frame_callbacks(), 0);
        assert_eq!(stage.resize_listeners(), 0);
        assert!(stage.scene(id).is_none());
        assert!(!stage.unmount(id));
    }

    #[test]
    fn test_viewport_delivered_at_mount() {
        crate::init();
        let mut stage = Stage::new().with_viewport(800, 600);
        stage
            .mount(
                SceneConfig::new()
                    .with_child(Counter::new(true))
                    .with_child(Counter::new(false)),
            )
            .unwrap();
        stage.resize(1024, 768);
        assert_eq!(stage.viewport(), Some((1024, 768)));
        assert_eq!(stage.resize_listeners(), 1);
    }

    #[test]
    fn test_config_builder() {
        let config = SceneConfig::new()
            .with_camera_position(Vec3::new(0.0, 5.0, 10.0))
            .with_field_of_view(60.0)
            .with_light(Light::ambient(0.2));
        assert_eq!(config.camera().position, Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(config.camera().fov_degrees, 60.0);
        assert_eq!(config.lights().len(), 1);
        assert_eq!(config.child_count(), 0);
    }
}
