use voxsprite_common::{DrawableKind, IndexWidth, VoxelField};
use voxsprite_mesh::{MeshError, MeshOptions, ParticleMesh, PointList};

/// The `z = 0` slice of a field, uploaded as a single-channel float texture.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldImage {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f32>,
}

impl FieldImage {
    pub fn from_field(field: &VoxelField) -> Self {
        let len = field.dims().slice_len();
        Self {
            width: field.size() as u32,
            height: field.size() as u32,
            values: field.values()[..len].to_vec(),
        }
    }
}

/// CPU-side geometry for one of the three draw strategies. Built once at
/// startup, never rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    FullscreenField(FieldImage),
    IndexedMesh(ParticleMesh),
    PointList(PointList),
}

/// What a single draw call rasterizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Indexed triangle list; `index_width` is resolved (never `Auto`).
    Triangles { index_count: u32, index_width: IndexWidth },
    /// One sprite per point.
    Points { count: u32 },
    /// A single fullscreen triangle.
    Fullscreen,
}

impl Drawable {
    pub fn build(
        kind: DrawableKind,
        field: &VoxelField,
        options: &MeshOptions,
    ) -> Result<Self, MeshError> {
        Ok(match kind {
            DrawableKind::FullscreenField => Drawable::FullscreenField(FieldImage::from_field(field)),
            DrawableKind::Quads => Drawable::IndexedMesh(ParticleMesh::build(field, options)?),
            DrawableKind::Points => Drawable::PointList(PointList::build(field, options)?),
        })
    }

    pub fn kind(&self) -> DrawableKind {
        match self {
            Drawable::FullscreenField(_) => DrawableKind::FullscreenField,
            Drawable::IndexedMesh(_) => DrawableKind::Quads,
            Drawable::PointList(_) => DrawableKind::Points,
        }
    }

    pub fn primitive(&self) -> Primitive {
        match self {
            Drawable::FullscreenField(_) => Primitive::Fullscreen,
            Drawable::IndexedMesh(mesh) => Primitive::Triangles {
                index_count: mesh.indices().len() as u32,
                index_width: mesh.indices().width(),
            },
            Drawable::PointList(points) => Primitive::Points {
                count: points.len() as u32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxsprite_common::GridDims;

    fn checker(size: usize) -> VoxelField {
        let values: Vec<f32> = (0..size * size)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        VoxelField::new(GridDims::square(size), values).unwrap()
    }

    #[test]
    fn build_selects_strategy() {
        let field = checker(4);
        let options = MeshOptions::default();
        for kind in [DrawableKind::FullscreenField, DrawableKind::Quads, DrawableKind::Points] {
            assert_eq!(Drawable::build(kind, &field, &options).unwrap().kind(), kind);
        }
    }

    #[test]
    fn primitive_counts() {
        let field = checker(4);
        let options = MeshOptions::default();
        let quads = Drawable::build(DrawableKind::Quads, &field, &options).unwrap();
        assert_eq!(
            quads.primitive(),
            Primitive::Triangles {
                index_count: 8 * 6,
                index_width: IndexWidth::U16
            }
        );
        let points = Drawable::build(DrawableKind::Points, &field, &options).unwrap();
        assert_eq!(points.primitive(), Primitive::Points { count: 8 });
    }

    #[test]
    fn field_image_takes_first_slice() {
        let values: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let field = VoxelField::new(GridDims::volume(2, 2), values).unwrap();
        let image = FieldImage::from_field(&field);
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.values, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
