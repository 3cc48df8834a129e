use crate::types::VoxelField;

/// Flat index of cell `(x, y, z)` in a grid of edge `size`.
#[inline]
pub fn field_index(size: usize, x: usize, y: usize, z: usize) -> usize {
    x + y * size + z * size * size
}

/// Read the scalar at `(x, y, z)`.
///
/// Panics when any coordinate is outside the grid, in every build profile.
/// Use [`VoxelField::get`] when the coordinates are untrusted.
#[inline]
pub fn sample(field: &VoxelField, x: usize, y: usize, z: usize) -> f32 {
    let size = field.size();
    assert!(
        x < size && y < size && z < field.depth(),
        "sample ({x}, {y}, {z}) outside {size}x{size}x{}",
        field.depth()
    );
    field.values()[field_index(size, x, y, z)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridDims;

    #[test]
    fn index_is_x_fastest() {
        assert_eq!(field_index(4, 0, 0, 0), 0);
        assert_eq!(field_index(4, 1, 0, 0), 1);
        assert_eq!(field_index(4, 0, 1, 0), 4);
        assert_eq!(field_index(4, 0, 0, 1), 16);
        assert_eq!(field_index(4, 3, 2, 1), 3 + 8 + 16);
    }

    #[test]
    fn sample_reads_row_major() {
        let values: Vec<f32> = (0..27).map(|v| v as f32).collect();
        let field = VoxelField::new(GridDims::volume(3, 3), values).unwrap();
        assert_eq!(sample(&field, 2, 0, 0), 2.0);
        assert_eq!(sample(&field, 0, 2, 0), 6.0);
        assert_eq!(sample(&field, 1, 1, 2), 1.0 + 3.0 + 18.0);
    }

    #[test]
    #[should_panic]
    fn sample_out_of_bounds_panics() {
        let field = VoxelField::new(GridDims::square(2), vec![0.0; 4]).unwrap();
        sample(&field, 0, 0, 1);
    }

    #[test]
    #[should_panic(expected = "outside 2x2x2")]
    fn sample_x_overflow_panics_even_when_index_fits() {
        // (2, 0, 0) flattens to 2, which is a valid slot in an 8-cell buffer
        let field = VoxelField::new(GridDims::volume(2, 2), vec![0.0; 8]).unwrap();
        sample(&field, 2, 0, 0);
    }
}
