use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Logical shape of a voxel grid: `size × size × depth`, row-major with x fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub size: usize,
    pub depth: usize,
}

impl GridDims {
    /// Square 2D grid (`depth == 1`).
    pub fn square(size: usize) -> Self {
        Self { size, depth: 1 }
    }

    pub fn volume(size: usize, depth: usize) -> Self {
        Self { size, depth }
    }

    /// Number of cells, i.e. the required buffer length.
    pub fn cell_count(&self) -> usize {
        self.size * self.size * self.depth
    }

    /// Number of cells in one z slice.
    pub fn slice_len(&self) -> usize {
        self.size * self.size
    }
}

/// Errors raised when constructing a field buffer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("field length {actual} does not match dims {size}x{size}x{depth} ({expected} cells)")]
    LengthMismatch {
        size: usize,
        depth: usize,
        expected: usize,
        actual: usize,
    },
    #[error("field size must be non-zero")]
    EmptyDims,
    #[error("slice z={z} out of range for depth {depth}")]
    SliceOutOfRange { z: usize, depth: usize },
}

/// Immutable flat scalar grid produced by a field provider.
///
/// Cloning is cheap: the buffer is shared. The length always equals
/// `dims.cell_count()`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelField {
    dims: GridDims,
    values: Arc<[f32]>,
}

impl VoxelField {
    pub fn new(dims: GridDims, values: impl Into<Arc<[f32]>>) -> Result<Self, FieldError> {
        if dims.size == 0 || dims.depth == 0 {
            return Err(FieldError::EmptyDims);
        }
        let values = values.into();
        if values.len() != dims.cell_count() {
            return Err(FieldError::LengthMismatch {
                size: dims.size,
                depth: dims.depth,
                expected: dims.cell_count(),
                actual: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn size(&self) -> usize {
        self.dims.size
    }

    pub fn depth(&self) -> usize {
        self.dims.depth
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Bounds-checked read; `None` outside the grid.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        let size = self.dims.size;
        if x >= size || y >= size || z >= self.dims.depth {
            return None;
        }
        Some(self.values[crate::field_index(size, x, y, z)])
    }

    /// The `size × size` values of slice `z`.
    pub fn slice(&self, z: usize) -> Result<&[f32], FieldError> {
        if z >= self.dims.depth {
            return Err(FieldError::SliceOutOfRange {
                z,
                depth: self.dims.depth,
            });
        }
        let len = self.dims.slice_len();
        Ok(&self.values[z * len..(z + 1) * len])
    }
}

/// Which draw strategy renders the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawableKind {
    /// Fullscreen fragment pass over the field slice uploaded as a float texture.
    FullscreenField,
    /// Camera-facing quad per active cell, indexed triangles.
    #[default]
    Quads,
    /// One point sprite per active cell.
    Points,
}

/// Index element width used for mesh index buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexWidth {
    #[default]
    U16,
    U32,
    /// 16-bit when the mesh fits, 32-bit otherwise.
    Auto,
}

/// Built-in field scenes offered by the field provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Sphere,
    #[default]
    Emblem,
    Marched,
}

impl std::str::FromStr for DrawableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullscreen_field" | "fullscreen" => Ok(DrawableKind::FullscreenField),
            "quads" => Ok(DrawableKind::Quads),
            "points" => Ok(DrawableKind::Points),
            other => Err(format!(
                "unknown drawable '{other}' (expected fullscreen_field, quads or points)"
            )),
        }
    }
}

impl std::str::FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sphere" => Ok(SceneKind::Sphere),
            "emblem" => Ok(SceneKind::Emblem),
            "marched" => Ok(SceneKind::Marched),
            other => Err(format!("unknown scene '{other}' (expected sphere, emblem or marched)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        let err = VoxelField::new(GridDims::square(3), vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            FieldError::LengthMismatch {
                size: 3,
                depth: 1,
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn new_rejects_empty_dims() {
        assert_eq!(
            VoxelField::new(GridDims::square(0), Vec::new()).unwrap_err(),
            FieldError::EmptyDims
        );
    }

    #[test]
    fn get_is_bounds_checked() {
        let field = VoxelField::new(GridDims::volume(2, 2), (0..8).map(|v| v as f32).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(field.get(1, 1, 1), Some(7.0));
        assert_eq!(field.get(2, 0, 0), None);
        assert_eq!(field.get(0, 0, 2), None);
    }

    #[test]
    fn slice_returns_one_layer() {
        let field = VoxelField::new(GridDims::volume(2, 2), (0..8).map(|v| v as f32).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(field.slice(1).unwrap(), &[4.0, 5.0, 6.0, 7.0]);
        assert!(field.slice(2).is_err());
    }

    #[test]
    fn drawable_kind_default_is_quads() {
        assert_eq!(DrawableKind::default(), DrawableKind::Quads);
    }

    #[test]
    fn kinds_parse_from_cli_names() {
        assert_eq!("points".parse::<DrawableKind>(), Ok(DrawableKind::Points));
        assert_eq!("fullscreen".parse::<DrawableKind>(), Ok(DrawableKind::FullscreenField));
        assert!("lines".parse::<DrawableKind>().is_err());
        assert_eq!("marched".parse::<SceneKind>(), Ok(SceneKind::Marched));
    }
}
