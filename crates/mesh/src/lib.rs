//! Field-to-mesh derivation.
//!
//! Scans slice `z = 0` of a [`VoxelField`](voxsprite_common::VoxelField)
//! and emits one camera-facing quad (or one point sprite) per active cell.
//!
//! # Invariants
//! - Every emitted index is below `4 * quad_count`.
//! - Cells with `value <= 0` contribute no vertices and no indices.
//! - Meshes are built once and never mutated afterwards.

mod builder;
mod layout;

pub use builder::{
    MAX_U16_QUADS, MeshError, MeshOptions, MeshStats, ParticleMesh, PointList, QUAD_CORNERS,
    QUAD_INDICES, QUAD_TEXCOORDS, count_active, is_active, resolve_index_width,
};
pub use layout::{
    AttributeLayout, CENTER_ATTRIBUTE, CORNER_ATTRIBUTE, IndexBuffer, NumericType,
    TEXCOORD_ATTRIBUTE,
};

impl From<&voxsprite_common::MeshConfig> for MeshOptions {
    fn from(config: &voxsprite_common::MeshConfig) -> Self {
        Self {
            value_scale: config.value_scale,
            index_width: config.index_width,
        }
    }
}

pub fn crate_info() -> &'static str {
    "voxsprite-mesh v0.1.0"
}
