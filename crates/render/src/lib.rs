//! Rendering core: renderer-agnostic frame loop.
//!
//! # Invariants
//! - Geometry is uploaded once when the [`FrameContext`] is created and never
//!   rebuilt; only uniforms change per tick.
//! - No draw call is issued while the [`ResourceGate`] is `Loading`; every
//!   tick after it opens issues exactly one.
//! - The loop requests its next tick unconditionally.
//!
//! The GPU is reached only through [`RasterBackend`]. [`RecordingBackend`]
//! stands in for it in headless runs and tests.

mod backend;
mod camera;
mod drawable;
mod frame;
mod gate;

pub use backend::{
    DrawCall, FrameUniforms, GeometryHandle, RasterBackend, RasterCommand, RecordingBackend,
    TextureHandle, TextureSource,
};
pub use camera::{
    ORBIT_OFFSET, OrbitCamera, PITCH_LIMIT, POINTER_PIXELS_PER_RADIAN, orbit_transform,
    view_matrix,
};
pub use drawable::{Drawable, FieldImage, Primitive};
pub use frame::{
    FrameContext, FrameLoop, FrameScheduler, FrameSettings, FrameStats, ManualScheduler,
    TickOutcome, perspective,
};
pub use gate::{GateState, ResourceGate};

pub fn crate_info() -> &'static str {
    "voxsprite-render v0.1.0"
}
