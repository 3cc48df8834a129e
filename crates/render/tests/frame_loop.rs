//! End-to-end frame loop behavior: field in, draw calls out.

use glam::Vec3;
use tokio::sync::oneshot;
use voxsprite_assets::SpriteImage;
use voxsprite_common::{
    DrawableKind, GridDims, IndexWidth, RenderConfig, SceneKind, VoxelField,
};
use voxsprite_field::{FieldProvider, SceneField};
use voxsprite_mesh::{MeshOptions, ParticleMesh};
use voxsprite_render::{
    Drawable, FrameContext, FrameLoop, FrameSettings, GateState, Primitive, RasterCommand,
    RecordingBackend, ResourceGate, TickOutcome,
};

fn settings() -> FrameSettings {
    FrameSettings::from_config(&RenderConfig::default(), Vec3::ZERO, 16.0 / 9.0)
}

fn gated_loop(
    kind: DrawableKind,
    field: &VoxelField,
) -> (FrameLoop<RecordingBackend>, oneshot::Sender<SpriteImage>) {
    let drawable = Drawable::build(kind, field, &MeshOptions::default()).unwrap();
    let (tx, rx) = oneshot::channel();
    let ctx = FrameContext::new(
        RecordingBackend::new(),
        &drawable,
        ResourceGate::new(rx),
        settings(),
    )
    .unwrap();
    (FrameLoop::new(ctx), tx)
}

#[test]
fn no_draws_before_ready_then_one_per_tick() {
    let field = SceneField::new(SceneKind::Emblem, GridDims::volume(32, 4)).compute();
    for kind in [DrawableKind::Quads, DrawableKind::Points, DrawableKind::FullscreenField] {
        let (mut frame_loop, tx) = gated_loop(kind, &field);
        let mut tx = Some(tx);
        let mut draws_seen = Vec::new();

        frame_loop.run_headless_with(12, |tick, ctx| {
            draws_seen.push(ctx.backend().draw_count());
            if tick == 5 {
                if let Some(tx) = tx.take() {
                    tx.send(SpriteImage::radial(8)).unwrap();
                }
            }
        });

        // before_tick sees the count from all previous ticks
        assert_eq!(&draws_seen[..6], &[0, 0, 0, 0, 0, 0]);
        let stats = frame_loop.context().stats();
        assert_eq!(stats.ticks, 12);
        assert_eq!(stats.gated, 5);
        assert_eq!(stats.draws, 7);
        assert_eq!(frame_loop.context().backend().draw_count(), 7);
        assert_eq!(frame_loop.context().gate_state(), GateState::Ready);
    }
}

#[test]
fn failed_load_never_draws() {
    let field = SceneField::new(SceneKind::Sphere, GridDims::square(16)).compute();
    let (mut frame_loop, tx) = gated_loop(DrawableKind::Quads, &field);
    drop(tx);
    let stats = frame_loop.run_headless(20);
    assert_eq!(stats.ticks, 20);
    assert_eq!(stats.gated, 20);
    assert_eq!(frame_loop.context().backend().draw_count(), 0);
    assert_eq!(frame_loop.context().gate_state(), GateState::Loading);
}

#[test]
fn two_by_two_scenario() {
    // active cells at (0,0) and (1,1)
    let field = VoxelField::new(GridDims::square(2), vec![1.0, 0.0, 0.0, 2.0]).unwrap();
    let mesh = ParticleMesh::build(&field, &MeshOptions::default()).unwrap();
    assert_eq!(mesh.quad_count(), 2);
    assert_eq!(mesh.centers()[0], [0.0, 0.0, 0.25]);
    assert_eq!(mesh.centers()[4], [0.5, 0.5, 0.5]);
    let indices: Vec<u32> = mesh.indices().iter().collect();
    assert_eq!(indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);

    let (mut frame_loop, tx) = gated_loop(DrawableKind::Quads, &field);
    tx.send(SpriteImage::radial(4)).unwrap();
    let mut scheduler = voxsprite_render::ManualScheduler::new();
    assert_eq!(frame_loop.on_tick(&mut scheduler), TickOutcome::Drawn);
    let draw = frame_loop.context().backend().draws().next().copied().unwrap();
    assert_eq!(
        draw.primitive,
        Primitive::Triangles {
            index_count: 12,
            index_width: IndexWidth::U16
        }
    );
}

#[test]
fn indices_stay_below_vertex_count() {
    let field = SceneField::new(SceneKind::Emblem, GridDims::volume(64, 2)).compute();
    let mesh = ParticleMesh::build(&field, &MeshOptions::default()).unwrap();
    let bound = 4 * mesh.quad_count() as u32;
    assert!(mesh.quad_count() > 0);
    assert!(mesh.indices().iter().all(|i| i < bound));
}

#[test]
fn pointer_input_changes_view_not_projection() {
    let field = SceneField::new(SceneKind::Sphere, GridDims::square(8)).compute();
    let (mut frame_loop, tx) = gated_loop(DrawableKind::Points, &field);
    tx.send(SpriteImage::radial(4)).unwrap();
    frame_loop.run_headless_with(3, |tick, ctx| {
        ctx.on_pointer_move(tick as f32 * 40.0, tick as f32 * 5.0);
    });

    let uniforms: Vec<_> = frame_loop
        .context()
        .backend()
        .commands()
        .iter()
        .filter_map(|c| match c {
            RasterCommand::WriteUniforms(u) => Some(*u),
            _ => None,
        })
        .collect();
    assert_eq!(uniforms.len(), 3);
    assert_ne!(uniforms[0].view, uniforms[2].view);
    assert_eq!(uniforms[0].projection, uniforms[2].projection);
    assert_eq!(uniforms[2].camera_position, frame_loop.context().camera().eye());
}
