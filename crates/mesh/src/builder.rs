use voxsprite_common::{IndexWidth, VoxelField, sample};

use crate::layout::{
    AttributeLayout, CENTER_ATTRIBUTE, CORNER_ATTRIBUTE, IndexBuffer, TEXCOORD_ATTRIBUTE,
};

/// Corner offsets of a quad, counter-clockwise from bottom-left.
pub const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
pub const QUAD_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// Two triangles over the four quad corners.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Largest quad count whose indices fit in 16 bits (`4 * quads - 1 <= 65535`).
pub const MAX_U16_QUADS: usize = (u16::MAX as usize + 1) / 4;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MeshError {
    #[error("{quads} active cells exceed the 16-bit index budget of {max} quads")]
    IndexOverflow { quads: usize, max: usize },
    #[error("value scale must be positive and finite, got {0}")]
    InvalidScale(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Divisor turning a cell value into the quad's z offset.
    pub value_scale: f32,
    pub index_width: IndexWidth,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            value_scale: 4.0,
            index_width: IndexWidth::U16,
        }
    }
}

impl MeshOptions {
    fn validate(&self) -> Result<(), MeshError> {
        if !(self.value_scale.is_finite() && self.value_scale > 0.0) {
            return Err(MeshError::InvalidScale(self.value_scale));
        }
        Ok(())
    }
}

/// Emission predicate. Zero is inactive.
#[inline]
pub fn is_active(value: f32) -> bool {
    value > 0.0
}

/// Visit every active cell of slice `z = 0`, `x` outer and `y` inner.
fn for_each_active(field: &VoxelField, mut visit: impl FnMut(usize, usize, f32)) {
    let size = field.size();
    for x in 0..size {
        for y in 0..size {
            let value = sample(field, x, y, 0);
            if is_active(value) {
                visit(x, y, value);
            }
        }
    }
}

/// Number of cells a build would emit.
pub fn count_active(field: &VoxelField) -> usize {
    let mut count = 0;
    for_each_active(field, |_, _, _| count += 1);
    count
}

/// Pick the concrete index width for `quads`, failing when 16 bits were
/// requested and do not suffice.
pub fn resolve_index_width(requested: IndexWidth, quads: usize) -> Result<IndexWidth, MeshError> {
    match requested {
        IndexWidth::U16 if quads > MAX_U16_QUADS => Err(MeshError::IndexOverflow {
            quads,
            max: MAX_U16_QUADS,
        }),
        IndexWidth::U16 => Ok(IndexWidth::U16),
        IndexWidth::U32 => Ok(IndexWidth::U32),
        IndexWidth::Auto if quads > MAX_U16_QUADS => Ok(IndexWidth::U32),
        IndexWidth::Auto => Ok(IndexWidth::U16),
    }
}

fn center_of(field: &VoxelField, x: usize, y: usize, value: f32, value_scale: f32) -> [f32; 3] {
    let size = field.size() as f32;
    [x as f32 / size, y as f32 / size, value / value_scale]
}

/// Quad particle geometry: three parallel attribute streams plus indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleMesh {
    corners: Vec<[f32; 2]>,
    texcoords: Vec<[f32; 2]>,
    centers: Vec<[f32; 3]>,
    indices: IndexBuffer,
    quad_count: usize,
}

impl ParticleMesh {
    /// Scan slice `z = 0` of `field` and emit one quad per active cell.
    ///
    /// The quad counter only advances on emission, so indices never skip a
    /// base for inactive cells.
    pub fn build(field: &VoxelField, options: &MeshOptions) -> Result<Self, MeshError> {
        options.validate()?;
        let _span = tracing::debug_span!("build_quads", size = field.size()).entered();

        let active = count_active(field);
        let width = resolve_index_width(options.index_width, active)?;

        let mut mesh = ParticleMesh {
            corners: Vec::with_capacity(active * 4),
            texcoords: Vec::with_capacity(active * 4),
            centers: Vec::with_capacity(active * 4),
            indices: IndexBuffer::with_width(width, active * 6),
            quad_count: 0,
        };

        for_each_active(field, |x, y, value| {
            let center = center_of(field, x, y, value, options.value_scale);
            mesh.push_quad(center);
        });

        tracing::debug!(
            quads = mesh.quad_count,
            indices = mesh.indices.len(),
            width = ?mesh.indices.width(),
            "quad mesh built"
        );
        Ok(mesh)
    }

    fn push_quad(&mut self, center: [f32; 3]) {
        let base = 4 * self.quad_count as u32;
        self.corners.extend_from_slice(&QUAD_CORNERS);
        self.texcoords.extend_from_slice(&QUAD_TEXCOORDS);
        self.centers.extend_from_slice(&[center; 4]);
        for index in QUAD_INDICES {
            self.indices.push(base + index);
        }
        self.quad_count += 1;
    }

    pub fn quad_count(&self) -> usize {
        self.quad_count
    }

    pub fn vertex_count(&self) -> usize {
        self.corners.len()
    }

    pub fn corners(&self) -> &[[f32; 2]] {
        &self.corners
    }

    pub fn texcoords(&self) -> &[[f32; 2]] {
        &self.texcoords
    }

    pub fn centers(&self) -> &[[f32; 3]] {
        &self.centers
    }

    pub fn indices(&self) -> &IndexBuffer {
        &self.indices
    }

    /// Attribute streams paired with their packed bytes, in location order.
    pub fn attribute_streams(&self) -> [(AttributeLayout, &[u8]); 3] {
        [
            (CORNER_ATTRIBUTE, bytemuck::cast_slice(&self.corners)),
            (TEXCOORD_ATTRIBUTE, bytemuck::cast_slice(&self.texcoords)),
            (CENTER_ATTRIBUTE, bytemuck::cast_slice(&self.centers)),
        ]
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            quads: self.quad_count,
            vertices: self.vertex_count(),
            indices: self.indices.len(),
            index_width: self.indices.width(),
        }
    }
}

/// One center per active cell, for the point-sprite draw strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct PointList {
    centers: Vec<[f32; 3]>,
}

impl PointList {
    pub fn build(field: &VoxelField, options: &MeshOptions) -> Result<Self, MeshError> {
        options.validate()?;
        let _span = tracing::debug_span!("build_points", size = field.size()).entered();
        let mut centers = Vec::with_capacity(count_active(field));
        for_each_active(field, |x, y, value| {
            centers.push(center_of(field, x, y, value, options.value_scale));
        });
        tracing::debug!(points = centers.len(), "point list built");
        Ok(Self { centers })
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn centers(&self) -> &[[f32; 3]] {
        &self.centers
    }

    pub fn attribute_stream(&self) -> (AttributeLayout, &[u8]) {
        (CENTER_ATTRIBUTE, bytemuck::cast_slice(&self.centers))
    }
}

/// Summary of a built mesh for logging and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub quads: usize,
    pub vertices: usize,
    pub indices: usize,
    pub index_width: IndexWidth,
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "quads={} vertices={} indices={} index_width={:?}",
            self.quads, self.vertices, self.indices, self.index_width
        )
    }
}
