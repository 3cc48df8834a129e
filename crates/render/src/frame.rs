use glam::{Mat4, Vec3};
use voxsprite_assets::SpriteImage;
use voxsprite_common::RenderConfig;

use crate::backend::{
    DrawCall, FrameUniforms, GeometryHandle, RasterBackend, TextureHandle, TextureSource,
};
use crate::camera::OrbitCamera;
use crate::drawable::{Drawable, Primitive};
use crate::gate::{GateState, ResourceGate};

/// Values that stay fixed from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSettings {
    pub projection: Mat4,
    pub focus: Vec3,
    pub clear_color: [f64; 4],
    pub particle_size: f32,
    pub point_scale: f32,
}

impl FrameSettings {
    pub fn from_config(config: &RenderConfig, focus: Vec3, aspect: f32) -> Self {
        Self {
            projection: perspective(config, aspect),
            focus,
            clear_color: config.clear_color,
            particle_size: config.particle_size,
            point_scale: config.point_scale,
        }
    }
}

/// Right-handed perspective projection for `aspect = width / height`.
pub fn perspective(config: &RenderConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(config.fov_degrees.to_radians(), aspect, config.near, config.far)
}

/// Counters accumulated over the lifetime of a frame context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub ticks: u64,
    /// Ticks skipped because the gate was still `Loading`.
    pub gated: u64,
    pub draws: u64,
    /// Ticks where the backend returned an error.
    pub failed: u64,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Gated,
    Drawn,
    Failed,
}

/// Everything a tick needs, created once at startup and threaded through
/// every tick. Nothing else touches the backend handles.
pub struct FrameContext<B: RasterBackend> {
    backend: B,
    camera: OrbitCamera,
    gate: ResourceGate<SpriteImage>,
    geometry: GeometryHandle,
    primitive: Primitive,
    field_texture: Option<TextureHandle>,
    sprite: Option<TextureHandle>,
    settings: FrameSettings,
    stats: FrameStats,
}

impl<B: RasterBackend> FrameContext<B> {
    /// Upload `drawable` and take ownership of the backend. Any error here
    /// is fatal to the caller.
    pub fn new(
        mut backend: B,
        drawable: &Drawable,
        gate: ResourceGate<SpriteImage>,
        settings: FrameSettings,
    ) -> Result<Self, B::Error> {
        let geometry = backend.create_geometry(drawable)?;
        let field_texture = match drawable {
            Drawable::FullscreenField(image) => Some(backend.create_texture(TextureSource::Float32 {
                width: image.width,
                height: image.height,
                values: &image.values,
            })?),
            _ => None,
        };
        let primitive = drawable.primitive();
        tracing::debug!(kind = ?drawable.kind(), ?primitive, "frame context ready");
        Ok(Self {
            backend,
            camera: OrbitCamera::new(),
            gate,
            geometry,
            primitive,
            field_texture,
            sprite: None,
            settings,
            stats: FrameStats::default(),
        })
    }

    /// Run one tick: poll the gate and, once it is open, clear, upload
    /// uniforms and issue exactly one draw.
    pub fn tick(&mut self) -> Result<TickOutcome, B::Error> {
        self.stats.ticks += 1;
        if self.gate.poll() == GateState::Loading {
            self.stats.gated += 1;
            tracing::trace!(tick = self.stats.ticks, "gated");
            return Ok(TickOutcome::Gated);
        }
        let Some(sprite) = self.ensure_sprite()? else {
            self.stats.gated += 1;
            return Ok(TickOutcome::Gated);
        };

        self.backend.clear(self.settings.clear_color)?;
        let uniforms = FrameUniforms {
            view: self.camera.view_matrix(self.settings.focus),
            projection: self.settings.projection,
            camera_position: self.camera.eye(),
            focus: self.settings.focus,
            particle_size: self.settings.particle_size,
            point_scale: self.settings.point_scale,
        };
        self.backend.write_uniforms(&uniforms)?;
        self.backend.draw(&DrawCall {
            geometry: self.geometry,
            primitive: self.primitive,
            sprite,
            field: self.field_texture,
        })?;
        self.stats.draws += 1;
        tracing::trace!(tick = self.stats.ticks, "drawn");
        Ok(TickOutcome::Drawn)
    }

    fn ensure_sprite(&mut self) -> Result<Option<TextureHandle>, B::Error> {
        if self.sprite.is_some() {
            return Ok(self.sprite);
        }
        let Some(image) = self.gate.resource() else {
            return Ok(None);
        };
        let handle = self.backend.create_texture(TextureSource::Rgba8 {
            width: image.width,
            height: image.height,
            pixels: &image.pixels,
        })?;
        tracing::debug!(width = image.width, height = image.height, "sprite uploaded");
        // the CPU copy is no longer needed once the texture exists
        self.gate.take_resource();
        self.sprite = Some(handle);
        Ok(self.sprite)
    }

    /// Pointer input is applied immediately, regardless of the gate.
    pub fn on_pointer_move(&mut self, page_x: f32, page_y: f32) {
        self.camera.on_pointer_move(page_x, page_y);
    }

    pub fn set_focus(&mut self, focus: Vec3) {
        self.settings.focus = focus;
    }

    /// Replace the projection, e.g. after a resize.
    pub fn set_projection(&mut self, projection: Mat4) {
        self.settings.projection = projection;
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn settings(&self) -> &FrameSettings {
        &self.settings
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Asks the host for one more tick.
pub trait FrameScheduler {
    fn request_tick(&mut self);
}

/// Scheduler for headless runs: remembers whether a tick was requested.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

/// Drives a [`FrameContext`] from a [`FrameScheduler`].
pub struct FrameLoop<B: RasterBackend> {
    context: FrameContext<B>,
}

impl<B: RasterBackend> FrameLoop<B> {
    pub fn new(context: FrameContext<B>) -> Self {
        Self { context }
    }

    /// Run one tick and request the next one. Backend errors are logged and
    /// do not stop the loop.
    pub fn on_tick(&mut self, scheduler: &mut dyn FrameScheduler) -> TickOutcome {
        let outcome = match self.context.tick() {
            Ok(outcome) => outcome,
            Err(e) => {
                self.context.stats.failed += 1;
                tracing::error!("frame tick failed: {e}");
                TickOutcome::Failed
            }
        };
        scheduler.request_tick();
        outcome
    }

    /// Tick `ticks` times against a [`ManualScheduler`].
    pub fn run_headless(&mut self, ticks: u64) -> FrameStats {
        self.run_headless_with(ticks, |_, _| {})
    }

    /// Like [`run_headless`](Self::run_headless), calling `before_tick` with
    /// the zero-based tick number ahead of every tick.
    pub fn run_headless_with<F>(&mut self, ticks: u64, mut before_tick: F) -> FrameStats
    where
        F: FnMut(u64, &mut FrameContext<B>),
    {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_tick();
        let mut tick = 0;
        while tick < ticks && scheduler.take() {
            before_tick(tick, &mut self.context);
            self.on_tick(&mut scheduler);
            tick += 1;
        }
        self.context.stats()
    }

    pub fn context(&self) -> &FrameContext<B> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut FrameContext<B> {
        &mut self.context
    }

    pub fn into_context(self) -> FrameContext<B> {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RasterCommand, RecordingBackend};
    use crate::drawable::FieldImage;
    use tokio::sync::oneshot;

    fn settings() -> FrameSettings {
        FrameSettings::from_config(&RenderConfig::default(), Vec3::ZERO, 1.0)
    }

    fn fullscreen() -> Drawable {
        Drawable::FullscreenField(FieldImage {
            width: 2,
            height: 2,
            values: vec![1.0, -1.0, 0.0, 2.0],
        })
    }

    #[test]
    fn fullscreen_uploads_field_texture() {
        let ctx = FrameContext::new(
            RecordingBackend::new(),
            &fullscreen(),
            ResourceGate::ready(SpriteImage::radial(4)),
            settings(),
        )
        .unwrap();
        let textures = ctx
            .backend()
            .commands()
            .iter()
            .filter(|c| matches!(c, RasterCommand::CreateTexture { .. }))
            .count();
        assert_eq!(textures, 1);
        assert_eq!(ctx.primitive(), Primitive::Fullscreen);
    }

    #[test]
    fn sprite_uploaded_once_on_first_ready_tick() {
        let (tx, rx) = oneshot::channel();
        let mut ctx = FrameContext::new(
            RecordingBackend::new(),
            &fullscreen(),
            ResourceGate::new(rx),
            settings(),
        )
        .unwrap();
        assert_eq!(ctx.tick().unwrap(), TickOutcome::Gated);

        tx.send(SpriteImage::radial(8)).unwrap();
        assert_eq!(ctx.tick().unwrap(), TickOutcome::Drawn);
        assert_eq!(ctx.tick().unwrap(), TickOutcome::Drawn);

        let sprite_uploads = ctx
            .backend()
            .commands()
            .iter()
            .filter(|c| matches!(c, RasterCommand::CreateTexture { width: 8, .. }))
            .count();
        assert_eq!(sprite_uploads, 1);
        let draw = ctx.backend().draws().next().unwrap();
        assert_eq!(draw.field, Some(TextureHandle(0)));
        assert_eq!(draw.sprite, TextureHandle(1));
    }

    #[test]
    fn tick_orders_clear_uniforms_draw() {
        let mut ctx = FrameContext::new(
            RecordingBackend::new(),
            &fullscreen(),
            ResourceGate::ready(SpriteImage::radial(2)),
            settings(),
        )
        .unwrap();
        ctx.backend_mut().clear_commands();
        ctx.tick().unwrap();
        let commands = ctx.backend().commands();
        // sprite upload, then the frame itself
        assert!(matches!(commands[0], RasterCommand::CreateTexture { .. }));
        assert!(matches!(commands[1], RasterCommand::Clear(_)));
        assert!(matches!(commands[2], RasterCommand::WriteUniforms(_)));
        assert!(matches!(commands[3], RasterCommand::Draw(_)));
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn pointer_moves_apply_while_gated() {
        let (_tx, rx) = oneshot::channel();
        let mut ctx = FrameContext::new(
            RecordingBackend::new(),
            &fullscreen(),
            ResourceGate::new(rx),
            settings(),
        )
        .unwrap();
        ctx.on_pointer_move(50.0, 0.0);
        assert_eq!(ctx.tick().unwrap(), TickOutcome::Gated);
        assert_eq!(ctx.camera().y_rotation(), -1.0);
    }

    #[test]
    fn loop_always_reschedules() {
        let (_tx, rx) = oneshot::channel();
        let ctx = FrameContext::new(
            RecordingBackend::new(),
            &fullscreen(),
            ResourceGate::new(rx),
            settings(),
        )
        .unwrap();
        let mut frame_loop = FrameLoop::new(ctx);
        let mut scheduler = ManualScheduler::new();
        for _ in 0..3 {
            assert_eq!(frame_loop.on_tick(&mut scheduler), TickOutcome::Gated);
            assert!(scheduler.take());
        }
        assert_eq!(scheduler.requests(), 3);
    }

    #[test]
    fn projection_is_constant_across_ticks() {
        let ctx = FrameContext::new(
            RecordingBackend::new(),
            &fullscreen(),
            ResourceGate::ready(SpriteImage::radial(2)),
            settings(),
        )
        .unwrap();
        let mut frame_loop = FrameLoop::new(ctx);
        frame_loop.run_headless_with(4, |tick, ctx| ctx.on_pointer_move(tick as f32 * 10.0, 0.0));
        let projections: Vec<Mat4> = frame_loop
            .context()
            .backend()
            .commands()
            .iter()
            .filter_map(|c| match c {
                RasterCommand::WriteUniforms(u) => Some(u.projection),
                _ => None,
            })
            .collect();
        assert_eq!(projections.len(), 4);
        assert!(projections.iter().all(|p| *p == settings().projection));
    }

    #[derive(Debug)]
    struct SkippedFrame;

    impl std::fmt::Display for SkippedFrame {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("frame skipped")
        }
    }

    impl std::error::Error for SkippedFrame {}

    /// Records like [`RecordingBackend`] but rejects the first `skip` draws.
    struct FlakyBackend {
        inner: RecordingBackend,
        skip: u32,
    }

    impl RasterBackend for FlakyBackend {
        type Error = SkippedFrame;

        fn create_geometry(&mut self, drawable: &Drawable) -> Result<GeometryHandle, SkippedFrame> {
            Ok(self.inner.create_geometry(drawable).unwrap())
        }

        fn create_texture(
            &mut self,
            source: TextureSource<'_>,
        ) -> Result<TextureHandle, SkippedFrame> {
            Ok(self.inner.create_texture(source).unwrap())
        }

        fn clear(&mut self, color: [f64; 4]) -> Result<(), SkippedFrame> {
            self.inner.clear(color).unwrap();
            Ok(())
        }

        fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), SkippedFrame> {
            self.inner.write_uniforms(uniforms).unwrap();
            Ok(())
        }

        fn draw(&mut self, call: &DrawCall) -> Result<(), SkippedFrame> {
            if self.skip > 0 {
                self.skip -= 1;
                return Err(SkippedFrame);
            }
            self.inner.draw(call).unwrap();
            Ok(())
        }
    }

    #[test]
    fn rejected_draw_counts_as_failed_not_drawn() {
        let backend = FlakyBackend {
            inner: RecordingBackend::new(),
            skip: 1,
        };
        let ctx = FrameContext::new(
            backend,
            &fullscreen(),
            ResourceGate::ready(SpriteImage::radial(2)),
            settings(),
        )
        .unwrap();
        let mut frame_loop = FrameLoop::new(ctx);
        let mut scheduler = ManualScheduler::new();

        assert_eq!(frame_loop.on_tick(&mut scheduler), TickOutcome::Failed);
        assert!(scheduler.take());
        let stats = frame_loop.context().stats();
        assert_eq!((stats.ticks, stats.draws, stats.failed), (1, 0, 1));

        assert_eq!(frame_loop.on_tick(&mut scheduler), TickOutcome::Drawn);
        let stats = frame_loop.context().stats();
        assert_eq!((stats.ticks, stats.draws, stats.failed), (2, 1, 1));
        assert_eq!(frame_loop.context().backend().inner.draws().count(), 1);
    }
}
