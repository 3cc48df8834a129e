use voxsprite_common::IndexWidth;

/// Scalar type of one vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    Float32,
}

impl NumericType {
    pub fn byte_size(self) -> u64 {
        match self {
            NumericType::Float32 => 4,
        }
    }
}

/// Layout of one tightly packed attribute stream: `(components, type, stride, offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub name: &'static str,
    pub location: u32,
    pub components: u32,
    pub numeric: NumericType,
    pub stride: u64,
    pub offset: u64,
}

impl AttributeLayout {
    const fn float(name: &'static str, location: u32, components: u32) -> Self {
        Self {
            name,
            location,
            components,
            numeric: NumericType::Float32,
            stride: components as u64 * 4,
            offset: 0,
        }
    }
}

pub const CORNER_ATTRIBUTE: AttributeLayout = AttributeLayout::float("corner", 0, 2);
pub const TEXCOORD_ATTRIBUTE: AttributeLayout = AttributeLayout::float("texcoord", 1, 2);
pub const CENTER_ATTRIBUTE: AttributeLayout = AttributeLayout::float("center", 2, 3);

/// Index data in the element width chosen at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved width, never `Auto`.
    pub fn width(&self) -> IndexWidth {
        match self {
            IndexBuffer::U16(_) => IndexWidth::U16,
            IndexBuffer::U32(_) => IndexWidth::U32,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            IndexBuffer::U16(v) => Box::new(v.iter().map(|i| u32::from(*i))),
            IndexBuffer::U32(v) => Box::new(v.iter().copied()),
        }
    }

    pub(crate) fn with_width(width: IndexWidth, capacity: usize) -> Self {
        match width {
            IndexWidth::U32 => IndexBuffer::U32(Vec::with_capacity(capacity)),
            _ => IndexBuffer::U16(Vec::with_capacity(capacity)),
        }
    }

    /// Append one index. The caller has validated that it fits.
    pub(crate) fn push(&mut self, index: u32) {
        match self {
            IndexBuffer::U16(v) => v.push(index as u16),
            IndexBuffer::U32(v) => v.push(index),
        }
    }
}
