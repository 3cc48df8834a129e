//! Field provider: composable signed-distance shapes sampled into voxel grids.
//!
//! The renderer's only contract with this crate is "array in": a
//! [`VoxelField`] whose cells are active when their value is positive.

mod encode;

pub use encode::{cell_position, encode, march, ray_march};
pub use sdfu::SDF;

use sdfu::{Box as Cuboid, Sphere};
use ultraviolet::Vec3;
use voxsprite_common::{FieldConfig, GridDims, SceneKind, VoxelField};

/// Anything that can hand the renderer a scalar grid.
pub trait FieldProvider {
    fn dims(&self) -> GridDims;

    fn compute(&self) -> VoxelField;
}

/// Provider for one of the built-in scenes.
#[derive(Debug, Clone, Copy)]
pub struct SceneField {
    pub scene: SceneKind,
    pub dims: GridDims,
}

impl SceneField {
    pub fn new(scene: SceneKind, dims: GridDims) -> Self {
        Self { scene, dims }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(config.scene, config.dims())
    }
}

impl FieldProvider for SceneField {
    fn dims(&self) -> GridDims {
        match self.scene {
            SceneKind::Marched => GridDims::square(self.dims.size),
            _ => self.dims,
        }
    }

    fn compute(&self) -> VoxelField {
        tracing::debug!(scene = ?self.scene, size = self.dims.size, depth = self.dims.depth, "computing field");
        match self.scene {
            SceneKind::Sphere => encode(Sphere::new(0.6), self.dims),
            SceneKind::Emblem => encode(emblem(), self.dims),
            SceneKind::Marched => march(
                Sphere::new(0.4).translate(Vec3::new(0.5, 0.5, 0.0)),
                self.dims.size,
            ),
        }
    }
}

/// Sphere with two smooth lobes, carved by a vertical slot, a horizontal bar
/// and a square eye in each lobe. Centered on the `z = 0` plane.
pub fn emblem() -> impl SDF<f32, Vec3> {
    let eye = Vec3::new(0.25, 0.25, 3.0);
    Sphere::new(0.9)
        .subtract(Cuboid::new(Vec3::new(0.5, 0.5, 3.0)))
        .union_smooth(Sphere::new(0.6).translate(Vec3::new(0.6, 0.6, 0.0)), 0.2)
        .union_smooth(Sphere::new(0.6).translate(Vec3::new(-0.6, 0.6, 0.0)), 0.2)
        .subtract(Cuboid::new(eye).translate(Vec3::new(-0.6, 0.6, 0.0)))
        .subtract(Cuboid::new(eye).translate(Vec3::new(0.6, 0.6, 0.0)))
        .subtract(Cuboid::new(Vec3::new(3.0, 0.2, 0.2)).translate(Vec3::new(0.0, 0.6, 0.0)))
        .subtract(Cuboid::new(Vec3::new(0.4, 4.0, 0.4)))
}

pub fn crate_info() -> &'static str {
    "voxsprite-field v0.1.0"
}
