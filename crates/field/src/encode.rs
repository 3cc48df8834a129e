use sdfu::SDF;
use ultraviolet::Vec3;
use voxsprite_common::{GridDims, VoxelField};

const MARCH_STEPS: usize = 32;
const MARCH_HIT_DISTANCE: f32 = 0.001;
const MARCH_MAX_DISTANCE: f32 = 1000.0;

/// Center of cell `i` along an axis of `n` cells, mapped into `[-1, 1]`.
fn cell_coord(i: usize, n: usize) -> f32 {
    if n == 1 {
        return 0.0;
    }
    (i as f32 + 0.5) / n as f32 * 2.0 - 1.0
}

/// World position of cell `(x, y, z)`. x and y span `[-1, 1]`; slice 0 lies
/// on the `z = 0` plane and deeper slices step towards `z = 1`.
pub fn cell_position(dims: GridDims, x: usize, y: usize, z: usize) -> Vec3 {
    Vec3::new(
        cell_coord(x, dims.size),
        cell_coord(y, dims.size),
        z as f32 / dims.depth as f32,
    )
}

/// Sample `shape` over every cell of `dims` (x fastest, then y, then z).
///
/// Stored values are negated distances: cells inside the shape are positive.
/// Panics if either dimension is zero.
pub fn encode<S>(shape: S, dims: GridDims) -> VoxelField
where
    S: SDF<f32, Vec3>,
{
    let _span = tracing::debug_span!("encode_field", size = dims.size, depth = dims.depth).entered();
    let values: Vec<f32> = (0..dims.depth)
        .flat_map(|z| (0..dims.size).flat_map(move |y| (0..dims.size).map(move |x| (x, y, z))))
        .map(|(x, y, z)| -shape.dist(cell_position(dims, x, y, z)))
        .collect();
    VoxelField::new(dims, values).expect("encode produces exactly cell_count values")
}

/// Distance travelled along `direction` from `origin` until `shape` is hit, or 0 on a miss.
pub fn ray_march<S>(shape: S, origin: Vec3, direction: Vec3) -> f32
where
    S: SDF<f32, Vec3>,
{
    let length = direction.mag();
    if length == 0.0 {
        return 0.0;
    }
    let direction = direction / length;
    let mut travelled = 0.0;
    for _ in 0..MARCH_STEPS {
        let closest = shape.dist(origin + direction * travelled);
        if closest < MARCH_HIT_DISTANCE {
            return travelled;
        }
        if travelled > MARCH_MAX_DISTANCE {
            break;
        }
        travelled += closest;
    }
    0.0
}

/// A `size × size` field of hit distances for rays cast from behind the
/// image plane through each cell. Panics if `size` is zero.
pub fn march<S>(shape: S, size: usize) -> VoxelField
where
    S: SDF<f32, Vec3>,
{
    let _span = tracing::debug_span!("march_field", size).entered();
    let origin = Vec3::new(0.0, 0.0, -2.0);
    let values: Vec<f32> = (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .map(|(x, y)| {
            let target = Vec3::new(cell_coord(x, size), cell_coord(y, size), 0.0);
            ray_march(shape, origin, target - origin)
        })
        .collect();
    VoxelField::new(GridDims::square(size), values).expect("march produces size*size values")
}
