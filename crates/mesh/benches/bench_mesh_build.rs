use std::hint::black_box;
use std::time::Instant;

use voxsprite_common::{GridDims, IndexWidth, SceneKind};
use voxsprite_field::{FieldProvider, SceneField};
use voxsprite_mesh::{MeshOptions, ParticleMesh, PointList};

fn bench_quads(size: usize, iterations: usize) {
    let field = SceneField::new(SceneKind::Emblem, GridDims::square(size)).compute();
    let options = MeshOptions {
        index_width: IndexWidth::Auto,
        ..MeshOptions::default()
    };

    let start = Instant::now();
    let mut quads = 0;
    for _ in 0..iterations {
        let mesh = ParticleMesh::build(black_box(&field), &options).expect("mesh builds");
        quads = mesh.quad_count();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  quads ({size}x{size}, {quads} active, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_points(size: usize, iterations: usize) {
    let field = SceneField::new(SceneKind::Emblem, GridDims::square(size)).compute();
    let options = MeshOptions::default();

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(PointList::build(black_box(&field), &options).expect("points build"));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  points ({size}x{size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("mesh build benchmarks");
    for size in [32, 128, 256] {
        bench_quads(size, 50);
    }
    for size in [32, 128, 256] {
        bench_points(size, 50);
    }
}
