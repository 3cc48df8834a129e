//! wgpu raster backend.
//!
//! Implements [`RasterBackend`](voxsprite_render::RasterBackend) with three
//! pipelines sharing one uniform block: indexed camera-facing quads,
//! instanced point sprites, and a fullscreen pass over the field texture.
//!
//! # Invariants
//! - Geometry buffers are written once, at creation.
//! - Each `draw` records exactly one render pass and presents one frame.

mod backend;
mod shaders;

pub use backend::WgpuBackend;

/// Errors from device setup and frame submission.
#[derive(Debug, thiserror::Error)]
pub enum WgpuError {
    #[error("no suitable GPU adapter")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("shader or pipeline error: {0}")]
    Shader(String),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("surface lost or outdated; frame skipped after reconfigure")]
    SurfaceReconfigured,
    #[error("unknown geometry handle {0}")]
    UnknownGeometry(u32),
    #[error("unknown texture handle {0}")]
    UnknownTexture(u32),
    #[error("fullscreen draw without a field texture")]
    MissingFieldTexture,
    #[error("texture {width}x{height} does not match {len} bytes")]
    InvalidTexture { width: u32, height: u32, len: usize },
}
