use std::sync::Arc;

use folio_fx::error::ViewerError;
use folio_fx::gpu::SpriteRenderer;
use folio_fx::scene::{SceneId, Stage};
use folio_fx::showcase::Showcase;
use folio_fx::time::Time;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Preview window showing one showcase.
pub struct App {
    showcase: Showcase,
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    stage: Stage,
    scene: Option<SceneId>,
    time: Time,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(showcase: Showcase) -> Self {
        Self {
            showcase,
            window: None,
            renderer: None,
            stage: Stage::new(),
            scene: None,
            time: Time::new(),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<ViewerError> {
        self.error.take()
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(format!("folio-fx - {}", self.showcase.name()))
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(SpriteRenderer::new(window.clone()))?;

        let (width, height) = renderer.size();
        self.stage = Stage::new().with_viewport(width, height);
        self.scene = Some(self.stage.mount(self.showcase.config())?);
        self.time.reset();

        log::info!("Showing '{}' at {}x{}", self.showcase.name(), width, height);
        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (_, delta) = self.time.update();
        self.stage.tick(delta);

        let (Some(renderer), Some(id)) = (&mut self.renderer, self.scene) else {
            return;
        };
        let Some(scene) = self.stage.scene(id) else {
            return;
        };

        match renderer.render(scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = renderer.size();
                renderer.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, closing");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.time.frame() % 600 == 0 {
            log::debug!("Frame {} at {:.1} fps", self.time.frame(), self.time.fps());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(id) = self.scene.take() {
                    self.stage.unmount(id);
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.stage.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => {
                    self.time.toggle_pause();
                    log::info!("{}", if self.time.is_paused() { "Paused" } else { "Resumed" });
                }
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
