use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};
use voxsprite_assets::{AssetSource, SpriteImage, load_sprite};
use voxsprite_common::{DrawableKind, SceneKind, ViewerConfig};
use voxsprite_field::{FieldProvider, SceneField};
use voxsprite_mesh::MeshOptions;
use voxsprite_render::{
    Drawable, FrameContext, FrameLoop, FrameScheduler, FrameSettings, ResourceGate, perspective,
};
use voxsprite_render_wgpu::{WgpuBackend, WgpuError};

#[derive(Parser)]
#[command(name = "voxsprite-desktop", about = "Voxsprite particle field viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw strategy: fullscreen_field, quads or points
    #[arg(long)]
    drawable: Option<DrawableKind>,

    /// Grid edge length
    #[arg(long)]
    size: Option<usize>,

    /// Built-in scene: sphere, emblem or marched
    #[arg(long)]
    scene: Option<SceneKind>,
}

impl Cli {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(drawable) = self.drawable {
            config.render.drawable = drawable;
        }
        if let Some(size) = self.size {
            config.field.size = size;
        }
        if let Some(scene) = self.scene {
            config.field.scene = scene;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Requests the next tick as a window redraw.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_tick(&mut self) {
        self.0.request_redraw();
    }
}

/// Inputs prepared before the window exists, consumed on first resume.
struct Startup {
    drawable: Drawable,
    gate: ResourceGate<SpriteImage>,
}

struct GpuApp {
    config: ViewerConfig,
    startup: Option<Startup>,
    window: Option<Arc<Window>>,
    frame_loop: Option<FrameLoop<WgpuBackend>>,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: ViewerConfig, startup: Startup) -> Self {
        Self {
            config,
            startup: Some(startup),
            window: None,
            frame_loop: None,
            fatal: None,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<FrameLoop<WgpuBackend>> {
        let startup = self
            .startup
            .take()
            .context("viewer already initialized")?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .map_err(WgpuError::from)?;

        let size = window.inner_size();
        let backend = pollster::block_on(WgpuBackend::new(
            &instance,
            surface,
            size.width,
            size.height,
        ))?;

        let settings =
            FrameSettings::from_config(&self.config.render, self.config.focus(), backend.aspect());
        let ctx = FrameContext::new(backend, &startup.drawable, startup.gate, settings)?;
        Ok(FrameLoop::new(ctx))
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("voxsprite")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fatal = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        match self.init_gpu(window.clone()) {
            Ok(frame_loop) => {
                self.frame_loop = Some(frame_loop);
                // first tick; every later one is requested by the loop itself
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                tracing::error!("GPU setup failed: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(frame_loop)) = (&self.window, &mut self.frame_loop) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                let stats = frame_loop.context().stats();
                tracing::info!(
                    ticks = stats.ticks,
                    gated = stats.gated,
                    draws = stats.draws,
                    failed = stats.failed,
                    "closing"
                );
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let ctx = frame_loop.context_mut();
                ctx.backend_mut().resize(new_size.width, new_size.height);
                let aspect = ctx.backend().aspect();
                ctx.set_projection(perspective(&self.config.render, aspect));
            }
            WindowEvent::CursorMoved { position, .. } => {
                frame_loop
                    .context_mut()
                    .on_pointer_move(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => {
                frame_loop.on_tick(&mut RedrawScheduler(window));
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("voxsprite-desktop starting");

    let config = cli.viewer_config()?;

    // geometry is built once, before the first tick
    let field = SceneField::from_config(&config.field).compute();
    let drawable = Drawable::build(
        config.render.drawable,
        &field,
        &MeshOptions::from(&config.mesh),
    )?;
    let gate = ResourceGate::new(load_sprite(AssetSource::from(&config.sprite)));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(config, Startup { drawable, gate });
    event_loop.run_app(&mut app)?;

    match app.fatal {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
