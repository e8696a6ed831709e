//! Error types for folio-fx.
//!
//! The animation layer itself cannot fail. These types cover the edges that
//! can: scene registration before [`init`](crate::init), shader material
//! construction, contact-form validation, surface snapshots and the preview
//! backend.

use std::fmt;

/// Errors raised while mounting scenes on a [`Stage`](crate::scene::Stage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// [`init`](crate::init) has not been called yet.
    NotInitialized,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NotInitialized => write!(
                f,
                "folio-fx is not initialized. Call folio_fx::init() before mounting scenes."
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Errors raised when a shader material's uniform set does not match its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// A uniform declared by the pair has no value.
    MissingUniform {
        pair: &'static str,
        name: &'static str,
    },
    /// A value was supplied for a uniform the pair does not declare.
    UnknownUniform { pair: &'static str, name: String },
    /// A value has a different type than the declared slot.
    KindMismatch {
        pair: &'static str,
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::MissingUniform { pair, name } => {
                write!(f, "Shader pair '{}' requires uniform '{}'", pair, name)
            }
            MaterialError::UnknownUniform { pair, name } => {
                write!(f, "Shader pair '{}' has no uniform named '{}'", pair, name)
            }
            MaterialError::KindMismatch {
                pair,
                name,
                expected,
                found,
            } => write!(
                f,
                "Uniform '{}' of shader pair '{}' expects {} but got {}",
                name, pair, expected, found
            ),
        }
    }
}

impl std::error::Error for MaterialError {}

/// Errors raised by contact-form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required field is empty.
    MissingField(&'static str),
    /// The email field is not an address.
    InvalidEmail(String),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::MissingField(field) => write!(f, "Field '{}' is required", field),
            ContactError::InvalidEmail(email) => {
                write!(f, "'{}' is not a valid email address", email)
            }
        }
    }
}

impl std::error::Error for ContactError {}

/// Errors raised when exporting a 2D effect surface.
#[derive(Debug)]
pub enum SnapshotError {
    /// The surface has zero width or height (not yet sized).
    EmptySurface,
    /// Failed to encode or write the image.
    Image(image::ImageError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::EmptySurface => write!(f, "Surface has no pixels to export"),
            SnapshotError::Image(e) => write!(f, "Failed to write snapshot: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Image(e) => Some(e),
            SnapshotError::EmptySurface => None,
        }
    }
}

impl From<image::ImageError> for SnapshotError {
    fn from(e: image::ImageError) -> Self {
        SnapshotError::Image(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the preview viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The requested showcase scene does not exist.
    UnknownShowcase(String),
    /// Mounting the scene failed.
    Scene(SceneError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ViewerError::UnknownShowcase(name) => write!(f, "Unknown showcase scene '{}'", name),
            ViewerError::Scene(e) => write!(f, "Scene error: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
            ViewerError::Scene(e) => Some(e),
            ViewerError::UnknownShowcase(_) => None,
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

impl From<SceneError> for ViewerError {
    fn from(e: SceneError) -> Self {
        ViewerError::Scene(e)
    }
}
