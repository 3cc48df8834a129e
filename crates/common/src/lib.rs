//! Shared types for voxsprite: the voxel field buffer, field sampling, and the
//! viewer configuration consumed by every other crate.
//!
//! # Invariants
//! - A `VoxelField` length always equals the product of its dimensions.
//! - Field index arithmetic is fixed: `x + y*size + z*size*size`.

mod config;
mod sampler;
mod types;

pub use config::{
    CameraConfig, ConfigError, FieldConfig, MeshConfig, RenderConfig, SpriteConfig, ViewerConfig,
};
pub use sampler::{field_index, sample};
pub use types::{DrawableKind, FieldError, GridDims, IndexWidth, SceneKind, VoxelField};

pub fn crate_info() -> &'static str {
    "voxsprite-common v0.1.0"
}
